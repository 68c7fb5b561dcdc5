use async_trait::async_trait;

use super::domain::{Customer, CustomerUpdate, NewCustomer};
use super::errors::CustomerError;

/// Repository abstraction for customer persistence.
///
/// Every method only sees rows that have not been soft-deleted.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All live customers in insertion (id) order.
    async fn get_all(&self) -> Result<Vec<Customer>, CustomerError>;
    /// Fails with `NotFound` when no live row has this id.
    async fn get(&self, id: i32) -> Result<Customer, CustomerError>;
    /// Fails with `NotFound` when no live row has this customer number.
    async fn get_by_customer_number(&self, customer_number: i32) -> Result<Customer, CustomerError>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, CustomerError>;
    async fn exists_by_customer_number(&self, customer_number: i32) -> Result<bool, CustomerError>;
    async fn exists_by_id_and_customer_number(&self, id: i32, customer_number: i32) -> Result<bool, CustomerError>;

    /// Returns the id assigned by storage.
    async fn save(&self, customer: NewCustomer) -> Result<i32, CustomerError>;
    async fn update(&self, customer: CustomerUpdate) -> Result<(), CustomerError>;
    /// Soft delete; returns the number of rows affected.
    async fn delete(&self, id: i32) -> Result<u64, CustomerError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct Row {
        customer: Customer,
        deleted_at: Option<DateTime<Utc>>,
    }

    #[derive(Default)]
    struct State {
        rows: Vec<Row>,
        last_id: i32,
        writes: usize,
        failures: HashMap<&'static str, String>,
    }

    #[derive(Default)]
    pub struct MockCustomerRepository {
        state: Mutex<State>,
    }

    impl MockCustomerRepository {
        /// Make the named operation (e.g. `"save"`, `"get"`) fail with a repository error.
        pub fn fail_on(&self, operation: &'static str, message: &str) {
            self.state.lock().unwrap().failures.insert(operation, message.to_string());
        }

        /// Stored rows, soft-deleted ones included.
        pub fn row_count(&self) -> usize {
            self.state.lock().unwrap().rows.len()
        }

        /// Number of successful insert/update/delete calls.
        pub fn write_count(&self) -> usize {
            self.state.lock().unwrap().writes
        }

        pub fn is_deleted(&self, id: i32) -> bool {
            self.state.lock().unwrap().rows.iter().any(|r| r.customer.id == id && r.deleted_at.is_some())
        }

        fn check(state: &State, operation: &'static str) -> Result<(), CustomerError> {
            match state.failures.get(operation) {
                Some(m) => Err(CustomerError::Repository(m.clone())),
                None => Ok(()),
            }
        }

        fn live(state: &State) -> impl Iterator<Item = &Row> {
            state.rows.iter().filter(|r| r.deleted_at.is_none())
        }
    }

    #[async_trait]
    impl CustomerRepository for MockCustomerRepository {
        async fn get_all(&self) -> Result<Vec<Customer>, CustomerError> {
            let state = self.state.lock().unwrap();
            Self::check(&state, "get_all")?;
            let rows = Self::live(&state).map(|r| r.customer.clone()).collect();
            Ok(rows)
        }

        async fn get(&self, id: i32) -> Result<Customer, CustomerError> {
            let state = self.state.lock().unwrap();
            Self::check(&state, "get")?;
            let found = Self::live(&state)
                .find(|r| r.customer.id == id)
                .map(|r| r.customer.clone())
                .ok_or_else(CustomerError::not_found);
            found
        }

        async fn get_by_customer_number(&self, customer_number: i32) -> Result<Customer, CustomerError> {
            let state = self.state.lock().unwrap();
            Self::check(&state, "get_by_customer_number")?;
            let found = Self::live(&state)
                .find(|r| r.customer.customer_number == customer_number)
                .map(|r| r.customer.clone())
                .ok_or_else(CustomerError::not_found);
            found
        }

        async fn exists_by_id(&self, id: i32) -> Result<bool, CustomerError> {
            let state = self.state.lock().unwrap();
            Self::check(&state, "exists_by_id")?;
            let hit = Self::live(&state).any(|r| r.customer.id == id);
            Ok(hit)
        }

        async fn exists_by_customer_number(&self, customer_number: i32) -> Result<bool, CustomerError> {
            let state = self.state.lock().unwrap();
            Self::check(&state, "exists_by_customer_number")?;
            let hit = Self::live(&state).any(|r| r.customer.customer_number == customer_number);
            Ok(hit)
        }

        async fn exists_by_id_and_customer_number(&self, id: i32, customer_number: i32) -> Result<bool, CustomerError> {
            let state = self.state.lock().unwrap();
            Self::check(&state, "exists_by_id_and_customer_number")?;
            let hit = Self::live(&state).any(|r| r.customer.id == id && r.customer.customer_number == customer_number);
            Ok(hit)
        }

        async fn save(&self, customer: NewCustomer) -> Result<i32, CustomerError> {
            let mut state = self.state.lock().unwrap();
            Self::check(&state, "save")?;
            state.last_id += 1;
            let id = state.last_id;
            state.rows.push(Row {
                customer: Customer {
                    id,
                    customer_number: customer.customer_number,
                    first_name: customer.first_name,
                    last_name: customer.last_name,
                    created_at: customer.created_at,
                    updated_at: None,
                },
                deleted_at: None,
            });
            state.writes += 1;
            Ok(id)
        }

        async fn update(&self, customer: CustomerUpdate) -> Result<(), CustomerError> {
            let mut state = self.state.lock().unwrap();
            Self::check(&state, "update")?;
            if let Some(row) = state
                .rows
                .iter_mut()
                .find(|r| r.customer.id == customer.id && r.deleted_at.is_none())
            {
                row.customer.customer_number = customer.customer_number;
                row.customer.first_name = customer.first_name;
                row.customer.last_name = customer.last_name;
                row.customer.updated_at = Some(customer.updated_at);
            }
            state.writes += 1;
            Ok(())
        }

        async fn delete(&self, id: i32) -> Result<u64, CustomerError> {
            let mut state = self.state.lock().unwrap();
            Self::check(&state, "delete")?;
            let now = Utc::now();
            let mut affected = 0;
            for row in state.rows.iter_mut().filter(|r| r.customer.id == id && r.deleted_at.is_none()) {
                row.deleted_at = Some(now);
                affected += 1;
            }
            state.writes += 1;
            Ok(affected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCustomerRepository;
    use super::*;
    use chrono::{DateTime, Utc};

    fn new_customer(n: i32) -> NewCustomer {
        NewCustomer {
            customer_number: n,
            first_name: "Danilo".into(),
            last_name: "Sano".into(),
            created_at: DateTime::<Utc>::from_timestamp(1_609_459_200, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn mock_lookups_see_only_live_rows() {
        let repo = MockCustomerRepository::default();
        let a = repo.save(new_customer(1)).await.unwrap();
        let b = repo.save(new_customer(2)).await.unwrap();

        assert_eq!(repo.get(a).await.unwrap().customer_number, 1);
        assert_eq!(repo.get_by_customer_number(2).await.unwrap().id, b);
        assert!(repo.exists_by_id(a).await.unwrap());
        assert!(repo.exists_by_customer_number(2).await.unwrap());
        assert!(repo.exists_by_id_and_customer_number(b, 2).await.unwrap());
        assert!(!repo.exists_by_id_and_customer_number(a, 2).await.unwrap());

        assert_eq!(repo.delete(a).await.unwrap(), 1);
        assert_eq!(repo.get(a).await.unwrap_err(), CustomerError::not_found());
        assert_eq!(repo.get_by_customer_number(1).await.unwrap_err(), CustomerError::not_found());
        assert!(!repo.exists_by_id(a).await.unwrap());
        assert!(!repo.exists_by_customer_number(1).await.unwrap());
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mock_injected_failure_surfaces_as_repository_error() {
        let repo = MockCustomerRepository::default();
        repo.fail_on("exists_by_id", "connection reset");
        let err = repo.exists_by_id(1).await.unwrap_err();
        assert_eq!(err, CustomerError::Repository("connection reset".into()));
    }
}
