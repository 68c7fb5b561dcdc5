use anyhow::Result;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::connect_with_config;


/// CRUD and soft-delete tests for the customer entity
pub mod crud_tests;


/// Fresh in-memory SQLite database with the schema applied.
/// A single pooled connection keeps every query on the same memory database.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
