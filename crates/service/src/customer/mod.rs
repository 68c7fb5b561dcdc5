//! Customer module: three-layer architecture (domain, repository, service).
//!
//! Request validation and the business rules around customer-number
//! uniqueness, existence checks and soft delete live here; persistence sits
//! behind [`repository::CustomerRepository`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::CustomerService;
