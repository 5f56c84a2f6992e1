//! `PostgreSQL` plumbing shared by the Diesel adapters.
//!
//! Connection pools are built from [`AppConfig`](crate::config::AppConfig)
//! and every Diesel call is offloaded to the blocking thread pool so that
//! adapters never stall the async executor.

mod blocking;

pub use blocking::{
    PgPool, PoolSetupError, PooledConn, build_pool, get_conn_with, run_blocking_with,
};
