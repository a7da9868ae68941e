//! Core business logic for carelog.
//!
//! - [`registry`] - Identification-number uniqueness checking
//! - [`relations`] - Entity lifecycle and cascade orchestration
//! - [`query`] - Read-side retrieval, pagination and filtering
//!
//! Each operation executes as one unit of work against the store; there
//! is no shared mutable state between requests and no background tasks.
//! Writes rely on the store's isolation guarantees under concurrent
//! callers; the core performs no retries and no optimistic locking.

pub mod query;
pub mod registry;
pub mod relations;

pub use query::QueryEngine;
pub use registry::IdentityRegistry;
pub use relations::RelationshipManager;
