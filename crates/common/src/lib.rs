//! Shared building blocks for the customer API crates: response envelopes,
//! health payloads and tracing setup.

pub mod types;
pub mod utils;
