use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, instrument};

use super::domain::{CreateCustomerRequest, Customer, CustomerUpdate, NewCustomer, UpdateCustomerRequest};
use super::errors::CustomerError;
use super::repository::CustomerRepository;

/// Customer business service independent of web framework.
///
/// Stateless apart from the repository handle. Each operation is a short
/// sequence of guard checks followed by at most one write and one read.
/// The uniqueness check and the write that follows are not atomic: two
/// concurrent requests with the same customer number can both pass the check.
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repo: Arc<R>,
}

/// Current time truncated to whole seconds.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a customer and return it as stored.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{CustomerService, domain::CustomerRequest, repository::mock::MockCustomerRepository};
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(MockCustomerRepository::default()));
    /// let created = tokio_test::block_on(svc.create(CustomerRequest::new(2, "Danilo", "Sano"))).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.customer_number, 2);
    /// assert!(created.updated_at.is_none());
    /// ```
    #[instrument(skip(self, input), fields(customer_number = ?input.customer_number))]
    pub async fn create(&self, input: CreateCustomerRequest) -> Result<Customer, CustomerError> {
        let customer_number = input.required_customer_number()?;

        if self.repo.exists_by_customer_number(customer_number).await? {
            debug!(customer_number, "customer number taken");
            return Err(CustomerError::number_taken());
        }

        let new = NewCustomer {
            customer_number,
            first_name: input.first_name,
            last_name: input.last_name,
            created_at: now(),
        };
        let id = self.repo.save(new).await?;
        let created = self.repo.get(id).await?;
        info!(id, customer_number, "customer_created");
        Ok(created)
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>, CustomerError> {
        self.repo.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Customer, CustomerError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(CustomerError::not_found());
        }
        self.repo.get(id).await
    }

    /// Update a customer in place.
    ///
    /// Keeping the row's own customer number never conflicts; taking one
    /// held by another live row does.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{CustomerService, domain::CustomerRequest, repository::mock::MockCustomerRepository};
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(MockCustomerRepository::default()));
    /// let c = tokio_test::block_on(svc.create(CustomerRequest::new(2, "Danilo", "Sano"))).unwrap();
    /// let u = tokio_test::block_on(svc.update(CustomerRequest::new(3, "Danilo", "Sano"), c.id)).unwrap();
    /// assert_eq!(u.customer_number, 3);
    /// assert!(u.updated_at.is_some());
    /// ```
    #[instrument(skip(self, input), fields(customer_number = ?input.customer_number))]
    pub async fn update(&self, input: UpdateCustomerRequest, id: i32) -> Result<Customer, CustomerError> {
        let customer_number = input.required_customer_number()?;

        if !self.repo.exists_by_id(id).await? {
            return Err(CustomerError::not_found());
        }

        let keeps_own_number = self.repo.exists_by_id_and_customer_number(id, customer_number).await?;
        if !keeps_own_number && self.repo.exists_by_customer_number(customer_number).await? {
            debug!(id, customer_number, "customer number held by another customer");
            return Err(CustomerError::number_taken());
        }

        let change = CustomerUpdate {
            id,
            customer_number,
            first_name: input.first_name,
            last_name: input.last_name,
            updated_at: now(),
        };
        self.repo.update(change).await?;
        let updated = self.repo.get(id).await?;
        info!(id, customer_number, "customer_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), CustomerError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(CustomerError::not_found());
        }
        // zero rows means the row went away between the probe and the write
        if self.repo.delete(id).await? == 0 {
            return Err(CustomerError::not_found());
        }
        info!(id, "customer_deleted");
        Ok(())
    }
}
