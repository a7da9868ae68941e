//! Identity registry
//!
//! Uniqueness checking for patient identification numbers. Kept separate
//! from the relationship manager because the check is read-only and
//! reusable by any layer that needs an admission precondition.

use crate::adapters::store::traits::{PatientStore, RecordStore};
use crate::domain::{CarelogError, Result};
use std::sync::Arc;

/// Read-only registry of known patient identification numbers
pub struct IdentityRegistry {
    store: Arc<dyn RecordStore>,
}

impl IdentityRegistry {
    /// Creates a registry over the given store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// True if any stored patient already carries `id_number`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank identification number and
    /// `Storage` if the lookup fails.
    pub async fn is_registered(&self, id_number: &str) -> Result<bool> {
        if id_number.trim().is_empty() {
            return Err(CarelogError::InvalidArgument(
                "identification number cannot be blank".to_string(),
            ));
        }

        self.store.exists_by_id_number(id_number).await
    }
}
