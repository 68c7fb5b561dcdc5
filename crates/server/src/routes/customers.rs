use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::DataResponse;
use service::customer::domain::{Customer, CustomerRequest};
use tracing::info;

use crate::errors::ApiError;
use crate::metrics;
use crate::routes::ServerState;

/// Path ids must be positive integers written as plain digits.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    if raw.starts_with('+') {
        return Err(ApiError::bad_request("invalid input ID"));
    }
    let id: i64 = raw.parse().map_err(|_| ApiError::bad_request("invalid input ID"))?;
    if id <= 0 {
        return Err(ApiError::bad_request("invalid id provided: id must be a positive non-zero number"));
    }
    i32::try_from(id).map_err(|_| ApiError::bad_request("invalid input ID"))
}

#[utoipa::path(
    post, path = "/api/v1/customers", tag = "customers",
    request_body = crate::openapi::CustomerRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CustomerEnvelopeDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponseDoc),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorResponseDoc),
        (status = 422, description = "Unprocessable Entity", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Customer>>), ApiError> {
    let Json(input) = payload.map_err(ApiError::unprocessable)?;
    let created = state.customers.create(input).await?;
    metrics::CUSTOMERS_CREATED_TOTAL.inc();
    info!(id = created.id, customer_number = created.customer_number, "created customer");
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

#[utoipa::path(
    get, path = "/api/v1/customers", tag = "customers",
    responses(
        (status = 200, description = "List OK", body = crate::openapi::CustomerListEnvelopeDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<DataResponse<Vec<Customer>>>, ApiError> {
    let customers = state.customers.get_all().await?;
    info!(count = customers.len(), "list customers");
    Ok(Json(DataResponse::new(customers)))
}

#[utoipa::path(
    get, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerEnvelopeDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataResponse<Customer>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let customer = state.customers.get(id).await?;
    Ok(Json(DataResponse::new(customer)))
}

#[utoipa::path(
    put, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = crate::openapi::CustomerRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerEnvelopeDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorResponseDoc),
        (status = 422, description = "Unprocessable Entity", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<Json<DataResponse<Customer>>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(input) = payload.map_err(ApiError::unprocessable)?;
    let updated = state.customers.update(input, id).await?;
    metrics::CUSTOMERS_UPDATED_TOTAL.inc();
    info!(id, customer_number = updated.customer_number, "updated customer");
    Ok(Json(DataResponse::new(updated)))
}

#[utoipa::path(
    delete, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(raw_id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state.customers.delete(id).await?;
    metrics::CUSTOMERS_DELETED_TOTAL.inc();
    info!(id, "deleted customer");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("2147483647").unwrap(), i32::MAX);
    }

    #[test]
    fn parse_id_rejects_zero_and_negatives() {
        for raw in ["0", "-3"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.message, "invalid id provided: id must be a positive non-zero number");
        }
    }

    #[test]
    fn parse_id_rejects_garbage_and_overflow() {
        for raw in ["abc", "1.5", "", " 5", "5 ", "+5", "99999999999"] {
            assert_eq!(parse_id(raw).unwrap_err().message, "invalid input ID");
        }
    }
}
