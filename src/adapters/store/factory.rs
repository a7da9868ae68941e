//! Record store factory
//!
//! Creates the store implementation selected by configuration.

use crate::adapters::postgresql::{PostgresClient, PostgresStore};
use crate::adapters::store::memory::MemoryStore;
use crate::adapters::store::traits::RecordStore;
use crate::config::schema::{CarelogConfig, StorageBackend};
use crate::domain::Result;
use std::sync::Arc;

/// Create a record store based on the configuration
///
/// For the PostgreSQL backend this verifies connectivity and applies the
/// schema before returning, so a returned store is ready for traffic.
///
/// # Errors
///
/// Returns an error if the configured backend cannot be initialized.
pub async fn create_store(config: &CarelogConfig) -> Result<Arc<dyn RecordStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Creating in-memory record store");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn RecordStore>)
        }
        StorageBackend::Postgresql => {
            let pg_config = config
                .storage
                .postgresql
                .as_ref()
                .expect("postgresql config should be validated");

            let client = PostgresClient::new(pg_config.clone())?;
            tracing::info!(
                server = %client.connection_string_safe(),
                "Creating PostgreSQL record store"
            );
            client.test_connection().await?;
            client.ensure_schema().await?;

            Ok(Arc::new(PostgresStore::new(client)) as Arc<dyn RecordStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::traits::PatientStore;
    use crate::config::schema::CarelogConfig;

    #[tokio::test]
    async fn test_memory_backend_is_default() {
        let config = CarelogConfig::default();
        let store = create_store(&config).await.unwrap();
        assert!(store.list_patients().await.unwrap().is_empty());
    }
}
