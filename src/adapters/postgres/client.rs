//! PostgreSQL client
//!
//! Builds a deadpool connection pool from typed connection parameters and
//! probes it once. Connecting is a single attempt, fail-fast: the job runs
//! only once the database is known to be ready, so there is no retry here.

use crate::config::DatabaseConfig;
use crate::domain::{KursError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::NoTls;

/// PostgreSQL client for Kurs
///
/// Owns the connection pool for the duration of one run. Connections are
/// returned to the pool when the checked-out [`Object`] is dropped, on
/// every exit path.
pub struct PgClient {
    pool: Pool,
}

impl PgClient {
    /// Open a pool to the configured database and verify it with `SELECT 1`
    ///
    /// # Errors
    ///
    /// Returns `KursError::Connection` if the database is unreachable, the
    /// credentials are rejected, or the database does not exist. No retry
    /// is performed.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .user(&config.user)
            .password(config.password.expose_secret().as_str())
            .dbname(&config.dbname)
            .connect_timeout(Duration::from_secs(config.connection_timeout_seconds));

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .build()
            .map_err(|e| KursError::Connection(format!("Failed to create connection pool: {e}")))?;

        let client = Self { pool };
        client.probe().await?;

        tracing::info!(
            target_db = %config.safe_display(),
            "Connected to PostgreSQL"
        );

        Ok(client)
    }

    /// Single-attempt connectivity check
    async fn probe(&self) -> Result<()> {
        let conn = self.get().await?;
        conn.query_one("SELECT 1", &[])
            .await
            .map_err(|e| KursError::Connection(format!("Connection test failed: {e}")))?;
        Ok(())
    }

    /// Check out a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns `KursError::Connection` if a connection cannot be obtained.
    pub async fn get(&self) -> Result<Object> {
        self.pool.get().await.map_err(|e| {
            KursError::Connection(format!("Failed to get connection from pool: {e}"))
        })
    }
}
