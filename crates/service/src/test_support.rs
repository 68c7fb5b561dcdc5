#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use configs::DatabaseConfig;
use models::db::connect_with_config;

/// Fresh in-memory SQLite database with migrations applied.
/// Each test gets its own database; the pool is capped at one connection
/// so all queries land on the same memory store.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
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
