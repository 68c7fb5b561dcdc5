use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::CustomerError;

/// Create/update payload. `customer_number` stays optional so that a missing
/// value can be told apart from an explicit zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequest {
    #[serde(default)]
    pub customer_number: Option<i32>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

pub type CreateCustomerRequest = CustomerRequest;
pub type UpdateCustomerRequest = CustomerRequest;

impl CustomerRequest {
    pub fn new(customer_number: i32, first_name: &str, last_name: &str) -> Self {
        Self {
            customer_number: Some(customer_number),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    /// Shape checks shared by create and update. Pure; no I/O.
    pub fn validate(&self) -> Result<(), CustomerError> {
        match self.customer_number {
            None => return Err(CustomerError::Validation("invalid input: customer number is required".into())),
            Some(n) if n <= 0 => {
                return Err(CustomerError::Validation("invalid input: customer number must be greater than 0".into()))
            }
            Some(_) => {}
        }
        if self.first_name.is_empty() {
            return Err(CustomerError::Validation("invalid input: first name is required".into()));
        }
        if self.last_name.is_empty() {
            return Err(CustomerError::Validation("invalid input: last name is required".into()));
        }
        Ok(())
    }

    /// The business key of a request that passed [`validate`](Self::validate).
    pub fn required_customer_number(&self) -> Result<i32, CustomerError> {
        self.validate()?;
        self.customer_number
            .ok_or_else(|| CustomerError::Validation("invalid input: customer number is required".into()))
    }
}

/// Customer as returned to callers (hydrated from storage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub customer_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self {
            id: m.id,
            customer_number: m.customer_number,
            first_name: m.first_name,
            last_name: m.last_name,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

/// Row to insert; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub customer_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of the mutable fields of an existing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub id: i32,
    pub customer_number: i32,
    pub first_name: String,
    pub last_name: String,
    pub updated_at: DateTime<Utc>,
}
