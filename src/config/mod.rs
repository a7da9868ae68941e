//! Configuration management for carelog.
//!
//! TOML-based configuration with environment variable substitution
//! (`${VAR_NAME}`), `CARELOG_*` overrides, defaults for every optional
//! setting, and validation before use.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "carelog"
//! log_level = "info"
//!
//! [storage]
//! backend = "postgresql"
//!
//! [storage.postgresql]
//! connection_string = "${CARELOG_DATABASE_URL}"
//! max_connections = 10
//!
//! [pagination]
//! default_page_size = 10
//!
//! [logging]
//! file_enabled = true
//! file_path = "logs"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CarelogConfig, LoggingConfig, PaginationConfig, PostgresConfig,
    StorageBackend, StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
