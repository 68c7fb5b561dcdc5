use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use service::customer::repo::SeaOrmCustomerRepository;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Wire the SeaORM-backed repository into the router.
pub fn app_with_db(db: DatabaseConnection) -> Router {
    let repo = Arc::new(SeaOrmCustomerRepository::new(db));
    routes::build_router(ServerState::new(repo), build_cors())
}

/// Connect to the configured database, applying pending migrations when enabled.
pub async fn prepare_database(cfg: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.run_migrations {
        Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migrations failed: {e}")))?;
        info!("database migrations applied");
    }
    Ok(db)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let db = prepare_database(&cfg).await?;
    let app = app_with_db(db);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting customer api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
