use thiserror::Error;

pub const MSG_CUSTOMER_NOT_FOUND: &str = "customer not found";
pub const MSG_CUSTOMER_NUMBER_EXISTS: &str = "customer number already exists";

/// Business errors for customer workflows. Compare by variant, not by message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Repository(String),
}

impl CustomerError {
    pub fn not_found() -> Self { Self::NotFound(MSG_CUSTOMER_NOT_FOUND.into()) }

    pub fn number_taken() -> Self { Self::Conflict(MSG_CUSTOMER_NUMBER_EXISTS.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            CustomerError::Validation(_) => 2001,
            CustomerError::Conflict(_) => 2002,
            CustomerError::NotFound(_) => 2003,
            CustomerError::Repository(_) => 2200,
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CustomerError::Validation(_) => "validation",
            CustomerError::Conflict(_) => "conflict",
            CustomerError::NotFound(_) => "not_found",
            CustomerError::Repository(_) => "repository",
        }
    }
}

impl From<models::errors::ModelError> for CustomerError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(m) => CustomerError::Validation(m),
            models::errors::ModelError::Db(m) => CustomerError::Repository(m),
        }
    }
}
