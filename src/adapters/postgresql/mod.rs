//! PostgreSQL adapter
//!
//! Durable implementation of the record store backed by PostgreSQL with
//! connection pooling.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgresStore;
pub use client::PostgresClient;
