//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The directory is
//! single-caller and fully sequential, so the pool is effectively one
//! connection held for the whole session.

use clientele_core::DbSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool. The directory never has
/// more than one caller, so this is headroom, not throughput.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open a pool from loaded settings.
///
/// # Example
///
/// ```ignore
/// let settings = DbSettings::load("settings.toml")?;
/// let pool = connect(&settings).await?;
/// ```
pub async fn connect(settings: &DbSettings) -> Result<PgPool, sqlx::Error> {
    create_pool(&settings.url()).await
}

/// Create a PostgreSQL connection pool from a connection URL.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with an explicit connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
