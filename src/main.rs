//! ledgerbook - personal-finance bookkeeping backend.
//!
//! A REST API for user-owned ledger accounts and the transactions that move
//! value between them.
//!
//! # Architecture
//!
//! - **Web framework**: Axum
//! - **Database**: PostgreSQL via sqlx
//! - **Authentication**: bearer tokens, stored as SHA-256 hashes
//! - **Format**: JSON, every reply wrapped in the `{_data, _metadata}` envelope
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the database connection pool
//! 3. Run migrations
//! 4. Build the router: public `/health`, authenticated `/v1` group
//! 5. Serve on the configured port

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod response;
mod services;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::db::DbPool;

/// Build the application router over a connection pool.
fn app(pool: DbPool) -> Router {
    // Everything under /v1 requires a valid bearer token
    let authenticated_routes = Router::new()
        // Account management routes
        .route("/v1/accounts", post(handlers::accounts::create_account))
        .route("/v1/accounts", get(handlers::accounts::list_accounts))
        .route("/v1/accounts/{id}", get(handlers::accounts::get_account))
        .route(
            "/v1/accounts/{id}",
            patch(handlers::accounts::update_account),
        )
        .route(
            "/v1/accounts/{id}",
            delete(handlers::accounts::delete_account),
        )
        // Transaction routes
        .route(
            "/v1/transactions",
            post(handlers::transactions::create_transaction),
        )
        .route(
            "/v1/transactions",
            get(handlers::transactions::list_transactions),
        )
        // Category pick list
        .route("/v1/categories", get(handlers::categories::list_categories))
        .route_layer(axum_middleware::from_fn_with_state(
            pool.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity, default "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let app = app(pool);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
