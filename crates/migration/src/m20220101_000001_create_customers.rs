//! Create `customers` table.
//!
//! Rows are never physically removed; `deleted_at` marks a soft delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk_auto(Customers::Id))
                    .col(integer(Customers::CustomerNumber).not_null())
                    .col(text(Customers::FirstName).not_null())
                    .col(text(Customers::LastName).not_null())
                    .col(timestamp_with_time_zone(Customers::CreatedAt).not_null())
                    .col(
                        ColumnDef::new(Customers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Customers::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customers { Table, Id, CustomerNumber, FirstName, LastName, CreatedAt, UpdatedAt, DeletedAt }
