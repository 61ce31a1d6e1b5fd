//! Database pool and migrations.

use sqlx::{Pool, Postgres};

/// Connection pool shared by every handler.
pub type DbPool = Pool<Postgres>;

/// Create the PostgreSQL connection pool.
///
/// Connections are created lazily and reused across requests.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the server is
/// unreachable.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Run pending migrations from the `migrations/` directory.
///
/// Applied migrations are tracked in `_sqlx_migrations`, so each file runs
/// once.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
