// carelog - Hospital nursing-records engine
// Copyright (c) 2025 Carelog Contributors
// Licensed under the MIT License

//! # carelog - hospital nursing-records engine
//!
//! carelog manages hospital patients, each patient's single clinical
//! history, and the time-series of nursing vital-sign observations taken
//! against that history. It enforces the relational invariants of that
//! hierarchy and answers the read side: fast lookup, paginated browsing,
//! keyword search and bounded time-range review.
//!
//! ## Architecture
//!
//! - [`domain`] - Entities, typed identifiers, pagination and error types
//! - [`core`] - Identity registry, relationship manager, query engine
//! - [`adapters`] - Store contract, in-memory backend, PostgreSQL backend
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging setup
//!
//! The crate is the core of a larger system: an external request layer
//! maps HTTP traffic onto the operations here and maps the typed errors
//! back to status codes.
//!
//! ## Quick Start
//!
//! ```rust
//! use carelog::adapters::store::create_store;
//! use carelog::config::CarelogConfig;
//! use carelog::core::{QueryEngine, RelationshipManager};
//! use carelog::domain::{Patient, PersonInfo};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CarelogConfig::default();
//!     let store = create_store(&config).await?;
//!
//!     let manager = RelationshipManager::new(store.clone());
//!     let queries = QueryEngine::new(store);
//!
//!     let person = PersonInfo::new(
//!         "Ana", "Suárez", "30111222", "555-0101",
//!         NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
//!     )?;
//!     let patient = manager
//!         .admit_patient(
//!             Patient::builder()
//!                 .person(person)
//!                 .admission_date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap())
//!                 .room(210)
//!                 .bed(2)
//!                 .service("Cardiología")
//!                 .build()?,
//!         )
//!         .await?;
//!
//!     let found = queries.find_patient(patient.id).await?;
//!     assert_eq!(found.person.id_number, "30111222");
//!     Ok(())
//! }
//! ```
//!
//! ## Invariants
//!
//! - A patient owns at most one clinical history; creating a second fails
//!   with `AlreadyExists`.
//! - Identification numbers are unique across patients, checked at
//!   admission.
//! - Deleting a history removes all of its observations; deleting a
//!   patient removes its history and, transitively, the observations.
//!   Cascades run children first, so no interruption can orphan a child.
//! - Time-range queries reject bounds in the future.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
