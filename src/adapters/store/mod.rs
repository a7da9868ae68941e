//! Persistence store abstraction
//!
//! Trait-based store contract plus the factory that selects a backend
//! from configuration. Backends live in sibling adapter modules.

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_store;
pub use memory::MemoryStore;
pub use traits::{HistoryStore, ObservationStore, PatientStore, RecordStore};
