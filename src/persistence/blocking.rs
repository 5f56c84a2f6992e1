//! Pool construction and blocking-offload helpers.

use crate::config::AppConfig;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use thiserror::Error;

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type.
pub type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Errors raised while building a connection pool.
#[derive(Debug, Error)]
pub enum PoolSetupError {
    /// `DATABASE_URL` is not configured.
    #[error("DATABASE_URL is not configured")]
    MissingDatabaseUrl,

    /// The pool could not establish its initial connections.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`PoolSetupError::MissingDatabaseUrl`] when no URL is configured
/// or [`PoolSetupError::Pool`] when the database is unreachable.
pub fn build_pool(config: &AppConfig) -> Result<PgPool, PoolSetupError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or(PoolSetupError::MissingDatabaseUrl)?;
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(config.database_max_connections)
        .build(manager)?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "postgres connection pool ready"
    );
    Ok(pool)
}

/// Runs a blocking task and maps join errors into the caller's error type.
///
/// # Errors
///
/// Returns the task's own error, or the mapped join error when the task
/// panicked or was cancelled.
pub async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
///
/// # Errors
///
/// Returns the mapped pool error when no connection is available.
pub fn get_conn_with<E, M>(pool: &PgPool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}

#[cfg(test)]
mod tests {
    use super::{PoolSetupError, build_pool};
    use crate::config::AppConfig;

    #[test]
    fn build_pool_requires_database_url() {
        let config = AppConfig::from_lookup(|key| (key == "JWT_SECRET").then(|| "s".to_owned()))
            .expect("valid config");

        assert!(matches!(
            build_pool(&config),
            Err(PoolSetupError::MissingDatabaseUrl)
        ));
    }
}
