use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CustomerRequestDoc {
    #[schema(example = 999)]
    pub customer_number: i32,
    #[schema(example = "Danilo")]
    pub first_name: String,
    #[schema(example = "Sano")]
    pub last_name: String,
}

#[derive(ToSchema)]
pub struct CustomerDoc {
    pub id: i32,
    pub customer_number: i32,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "2021-01-01T00:00:00Z")]
    pub created_at: String,
    /// Omitted until the customer is first updated.
    pub updated_at: Option<String>,
}

#[derive(ToSchema)]
pub struct CustomerEnvelopeDoc { pub data: CustomerDoc }

#[derive(ToSchema)]
pub struct CustomerListEnvelopeDoc { pub data: Vec<CustomerDoc> }

#[derive(ToSchema)]
pub struct ErrorResponseDoc {
    #[schema(example = "customer not found")]
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::list,
        crate::routes::customers::create,
        crate::routes::customers::get,
        crate::routes::customers::update,
        crate::routes::customers::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CustomerRequestDoc,
            CustomerDoc,
            CustomerEnvelopeDoc,
            CustomerListEnvelopeDoc,
            ErrorResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers")
    )
)]
pub struct ApiDoc;
