// src/bin/api_server.rs

use restaurant_api::infra::logging;
use restaurant_api::transport;
use restaurant_api::{
    Config, InMemoryRestaurantRepository, PgRestaurantRepository, RestaurantRepository,
    RestaurantService, StorageKind,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env()?;
    tracing::info!(storage = ?config.storage, addr = %config.socket_addr(), "configuration loaded");

    // --- Repository Initialization ---
    let repo: Arc<dyn RestaurantRepository> = match config.storage {
        StorageKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
            let repo = PgRestaurantRepository::connect(database_url, config.db_max_connections).await?;
            tracing::info!(max_connections = config.db_max_connections, "connected to PostgreSQL");
            Arc::new(repo)
        }
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage; data is lost on shutdown");
            Arc::new(InMemoryRestaurantRepository::new())
        }
    };

    // --- Service Initialization ---
    let app_state = transport::http::AppState::new(Arc::new(RestaurantService::new(repo)));

    // --- API Server Initialization ---
    let app = transport::http::create_app(app_state);
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("API server listening on http://{}", listener.local_addr()?);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
