use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::customer::{repository::CustomerRepository, CustomerService};

use crate::metrics::encode_metrics;
use crate::openapi::ApiDoc;

pub mod customers;

#[derive(Clone)]
pub struct ServerState {
    pub customers: Arc<CustomerService<dyn CustomerRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customers: Arc::new(CustomerService::new(repo)) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> impl IntoResponse {
    encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router: customer CRUD under `/api/v1`, plus health, metrics and the OpenAPI document.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/v1/customers", get(customers::list).post(customers::create))
        .route(
            "/api/v1/customers/:id",
            get(customers::get).put(customers::update).delete(customers::delete),
        );

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api/v1/docs/openapi.json", get(openapi_json));

    api.merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request carrying method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
