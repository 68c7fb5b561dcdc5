use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static CUSTOMERS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("customer_api_customers_created_total", "Customers created")
        .expect("register customers_created_total")
});

pub static CUSTOMERS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("customer_api_customers_updated_total", "Customers updated")
        .expect("register customers_updated_total")
});

pub static CUSTOMERS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("customer_api_customers_deleted_total", "Customers soft-deleted")
        .expect("register customers_deleted_total")
});

pub static ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "customer_api_errors_total",
        "Rejected or failed customer requests by kind",
        &["kind"]
    )
    .expect("register errors_total")
});

pub fn record_error(kind: &str) {
    ERRORS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
