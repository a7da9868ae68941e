//! PostgreSQL client
//!
//! Connection pooling and statement execution for the PostgreSQL-backed
//! record store.

use crate::config::schema::PostgresConfig;
use crate::domain::{CarelogError, Result};
use deadpool_postgres::{Config as PoolConfig, Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::{NoTls, Row};

/// Pooled PostgreSQL client
pub struct PostgresClient {
    pool: Pool,
    config: PostgresConfig,
}

impl PostgresClient {
    /// Create a new client with a connection pool sized from configuration
    ///
    /// Pool construction is lazy; use [`test_connection`](Self::test_connection)
    /// to verify the server is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string does not parse or the pool
    /// cannot be built.
    pub fn new(config: PostgresConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_ref()
            .parse()
            .map_err(|e| {
                CarelogError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
            })?;

        let mut pool_config = PoolConfig::new();
        pool_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let manager = Manager::from_config(pg_config, NoTls, pool_config.manager.unwrap());

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .recycle_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .build()
            .map_err(|e| CarelogError::Storage(format!("Failed to create connection pool: {e}")))?;

        Ok(Self { pool, config })
    }

    /// Test the connection by executing a trivial query
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| CarelogError::Storage(format!("Connection test failed: {e}")))?;

        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Create the tables and indexes if they don't exist
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.get_connection().await?;

        let migration_sql = include_str!("../../../migrations/001_initial_schema.sql");

        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| CarelogError::Storage(format!("Failed to apply schema: {e}")))?;

        tracing::info!("PostgreSQL schema initialized");
        Ok(())
    }

    async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            CarelogError::Storage(format!("Failed to get connection from pool: {e}"))
        })
    }

    async fn apply_statement_timeout(&self, client: &deadpool_postgres::Object) -> Result<()> {
        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client
            .execute(&timeout_query, &[])
            .await
            .map_err(|e| CarelogError::Storage(format!("Failed to set statement timeout: {e}")))?;
        Ok(())
    }

    /// Execute a query and return its rows
    pub async fn query(
        &self,
        query: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<Row>> {
        let client = self.get_connection().await?;
        self.apply_statement_timeout(&client).await?;

        client
            .query(query, params)
            .await
            .map_err(|e| CarelogError::Storage(format!("Query failed: {e}")))
    }

    /// Execute a query expected to return exactly one row
    pub async fn query_one(
        &self,
        query: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Row> {
        let client = self.get_connection().await?;
        self.apply_statement_timeout(&client).await?;

        client
            .query_one(query, params)
            .await
            .map_err(|e| CarelogError::Storage(format!("Query failed: {e}")))
    }

    /// Execute a statement and return the number of affected rows
    pub async fn execute(
        &self,
        statement: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<u64> {
        let client = self.get_connection().await?;
        self.apply_statement_timeout(&client).await?;

        client
            .execute(statement, params)
            .await
            .map_err(|e| CarelogError::Storage(format!("Statement execution failed: {e}")))
    }

    /// Connection string with credentials redacted, for logging
    pub fn connection_string_safe(&self) -> String {
        self.config
            .connection_string
            .expose_secret()
            .as_ref()
            .split('@')
            .next_back()
            .map(|s| format!("postgresql://***@{s}"))
            .unwrap_or_else(|| "postgresql://***".to_string())
    }
}
