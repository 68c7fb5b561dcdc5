use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Not unique: soft-deleted rows keep their customer_number, so
        // uniqueness among live rows is checked by the service layer.
        manager
            .create_index(
                Index::create()
                    .name("idx_customers_customer_number")
                    .table(Customers::Table)
                    .col(Customers::CustomerNumber)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_customers_deleted_at")
                    .table(Customers::Table)
                    .col(Customers::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_customers_deleted_at").table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customers_customer_number").table(Customers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customers { Table, CustomerNumber, DeletedAt }
