use sea_orm::{ColumnTrait, DatabaseConnection};

use crate::customer::domain::{Customer, CustomerUpdate, NewCustomer};
use crate::customer::errors::CustomerError;
use crate::customer::repository::CustomerRepository;
use models::customer::{self, Column};

pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn get_all(&self) -> Result<Vec<Customer>, CustomerError> {
        let rows = customer::find_all_active(&self.db).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn get(&self, id: i32) -> Result<Customer, CustomerError> {
        customer::find_active_by_id(&self.db, id)
            .await?
            .map(Customer::from)
            .ok_or_else(CustomerError::not_found)
    }

    async fn get_by_customer_number(&self, customer_number: i32) -> Result<Customer, CustomerError> {
        customer::find_active_by_customer_number(&self.db, customer_number)
            .await?
            .map(Customer::from)
            .ok_or_else(CustomerError::not_found)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, CustomerError> {
        let cond = customer::active().add(Column::Id.eq(id));
        Ok(customer::exists_active(&self.db, cond).await?)
    }

    async fn exists_by_customer_number(&self, customer_number: i32) -> Result<bool, CustomerError> {
        let cond = customer::active().add(Column::CustomerNumber.eq(customer_number));
        Ok(customer::exists_active(&self.db, cond).await?)
    }

    async fn exists_by_id_and_customer_number(&self, id: i32, customer_number: i32) -> Result<bool, CustomerError> {
        let cond = customer::active()
            .add(Column::Id.eq(id))
            .add(Column::CustomerNumber.eq(customer_number));
        Ok(customer::exists_active(&self.db, cond).await?)
    }

    async fn save(&self, c: NewCustomer) -> Result<i32, CustomerError> {
        let id = customer::insert(&self.db, c.customer_number, &c.first_name, &c.last_name, c.created_at.into()).await?;
        Ok(id)
    }

    async fn update(&self, c: CustomerUpdate) -> Result<(), CustomerError> {
        customer::update_active(&self.db, c.id, c.customer_number, &c.first_name, &c.last_name, c.updated_at.into())
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<u64, CustomerError> {
        let affected = customer::soft_delete(&self.db, id, chrono::Utc::now().into()).await?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::{DateTime, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn new_customer(n: i32) -> NewCustomer {
        NewCustomer { customer_number: n, first_name: "Danilo".into(), last_name: "Sano".into(), created_at: at(1_609_459_200) }
    }

    #[tokio::test]
    async fn save_then_probe_and_fetch() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCustomerRepository::new(get_db().await?);

        let id = repo.save(new_customer(999)).await?;
        assert!(id > 0);
        assert!(repo.exists_by_id(id).await?);
        assert!(repo.exists_by_customer_number(999).await?);
        assert!(repo.exists_by_id_and_customer_number(id, 999).await?);
        assert!(!repo.exists_by_id_and_customer_number(id, 1000).await?);

        let found = repo.get_by_customer_number(999).await?;
        assert_eq!(found.id, id);
        assert_eq!(found.created_at, at(1_609_459_200));
        assert_eq!(found.updated_at, None);
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_mutable_fields() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCustomerRepository::new(get_db().await?);
        let id = repo.save(new_customer(999)).await?;

        repo.update(CustomerUpdate {
            id,
            customer_number: 1000,
            first_name: "Dan".into(),
            last_name: "S".into(),
            updated_at: at(1_609_459_300),
        })
        .await?;

        let got = repo.get(id).await?;
        assert_eq!(
            got,
            Customer {
                id,
                customer_number: 1000,
                first_name: "Dan".into(),
                last_name: "S".into(),
                created_at: at(1_609_459_200),
                updated_at: Some(at(1_609_459_300)),
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_soft_and_reports_affected_rows() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCustomerRepository::new(get_db().await?);
        let id = repo.save(new_customer(5)).await?;

        assert_eq!(repo.delete(id).await?, 1);
        assert!(!repo.exists_by_id(id).await?);
        assert!(!repo.exists_by_customer_number(5).await?);
        assert!(matches!(repo.get(id).await, Err(CustomerError::NotFound(_))));
        assert_eq!(repo.delete(id).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn missing_customer_number_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCustomerRepository::new(get_db().await?);
        let err = repo.get_by_customer_number(999_999).await.unwrap_err();
        assert_eq!(err, CustomerError::not_found());
        Ok(())
    }

    #[tokio::test]
    async fn get_all_skips_deleted_rows() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCustomerRepository::new(get_db().await?);
        assert!(repo.get_all().await?.is_empty());

        let a = repo.save(new_customer(1)).await?;
        let b = repo.save(new_customer(2)).await?;
        let c = repo.save(new_customer(3)).await?;
        repo.delete(b).await?;

        let ids: Vec<i32> = repo.get_all().await?.into_iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![a, c]);
        Ok(())
    }
}
