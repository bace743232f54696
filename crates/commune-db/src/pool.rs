use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use commune_core::config::{DatabaseConfig, Environment};
use commune_core::error::{CommuneError, Result};

/// Database connection wrapper providing a single pooled connection set.
///
/// This layer is single-operator and single-run; there is no replica routing
/// and no concurrent caller coordination.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect using the given configuration and environment.
    pub async fn connect(config: &DatabaseConfig, env: Environment) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_secs))
            .connect(&config.connect_url(env))
            .await
            .map_err(|e| CommuneError::Database(format!("Failed to connect: {}", e)))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| CommuneError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Close all connections gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
