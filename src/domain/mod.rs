//! Domain models and types for carelog.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`HistoryId`],
//!   [`ObservationId`])
//! - **Entity models** ([`Patient`], [`ClinicalHistory`],
//!   [`NursingObservation`]) with builders, plus the embedded
//!   [`PersonInfo`] value
//! - **Pagination types** ([`Page`], [`PageRequest`])
//! - **Error types** ([`CarelogError`]) and the crate-wide [`Result`] alias
//!
//! Ownership is one-directional throughout: children store the id of their
//! parent, parents store no child pointers. Navigating downwards is a store
//! query, so entity graphs never cycle and records serialize flat.

pub mod errors;
pub mod history;
pub mod ids;
pub mod observation;
pub mod page;
pub mod patient;
pub mod person;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::CarelogError;
pub use history::{ClinicalHistory, ClinicalHistoryBuilder};
pub use ids::{HistoryId, ObservationId, PatientId};
pub use observation::{NursingObservation, NursingObservationBuilder};
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use patient::{Patient, PatientBuilder};
pub use person::PersonInfo;
pub use result::Result;
