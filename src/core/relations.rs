//! Relationship manager
//!
//! Owns the create/update/delete lifecycle of the Patient →
//! ClinicalHistory → NursingObservation hierarchy. Every mutation
//! re-validates both halves of the parent/child relationship immediately
//! before writing, so callers get typed causes (`NotFound`,
//! `AlreadyExists`) instead of opaque constraint violations.
//!
//! Cascade deletes are orchestrated here, children first. Child-first
//! ordering means an interrupted cascade can leave a parent with fewer
//! children, never a child without its parent.

use crate::adapters::store::traits::{
    HistoryStore, ObservationStore, PatientStore, RecordStore,
};
use crate::core::registry::IdentityRegistry;
use crate::domain::{
    CarelogError, ClinicalHistory, HistoryId, NursingObservation, ObservationId, Patient,
    PatientId, Result,
};
use std::sync::Arc;

/// Lifecycle and cardinality enforcement across the record hierarchy
pub struct RelationshipManager {
    store: Arc<dyn RecordStore>,
    registry: IdentityRegistry,
}

impl RelationshipManager {
    /// Creates a manager over the given store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let registry = IdentityRegistry::new(store.clone());
        Self { store, registry }
    }

    /// Admits a new patient
    ///
    /// Admission does not create a clinical history; that is a separate,
    /// explicit step.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if a patient with the same identification
    /// number is already admitted.
    pub async fn admit_patient(&self, patient: Patient) -> Result<Patient> {
        if self.registry.is_registered(&patient.person.id_number).await? {
            return Err(CarelogError::AlreadyExists(format!(
                "a patient with identification number {} is already registered",
                patient.person.id_number
            )));
        }

        let stored = self.store.save_patient(patient).await?;
        tracing::info!(patient_id = %stored.id, "Patient admitted");
        Ok(stored)
    }

    /// Replaces a patient record in full
    ///
    /// The clinical history link is untouched: histories reference the
    /// patient by id and the id is the one field a replace cannot change.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no patient with `updates.id` exists.
    pub async fn update_patient(&self, updates: Patient) -> Result<Patient> {
        if self.store.get_patient(updates.id).await?.is_none() {
            return Err(CarelogError::NotFound(format!(
                "patient {} does not exist",
                updates.id
            )));
        }

        let stored = self.store.save_patient(updates).await?;
        tracing::info!(patient_id = %stored.id, "Patient updated");
        Ok(stored)
    }

    /// Deletes a patient and, transitively, its clinical history and all
    /// of that history's observations
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such patient exists; a repeated delete of
    /// the same id therefore fails rather than silently succeeding.
    pub async fn delete_patient(&self, patient_id: PatientId) -> Result<()> {
        if self.store.get_patient(patient_id).await?.is_none() {
            return Err(CarelogError::NotFound(format!(
                "patient {patient_id} does not exist"
            )));
        }

        if let Some(history) = self.store.find_history_by_patient(patient_id).await? {
            let removed = self.store.delete_observations_by_history(history.id).await?;
            self.store.delete_history(history.id).await?;
            tracing::debug!(
                history_id = %history.id,
                observations_removed = removed,
                "Cascaded delete through clinical history"
            );
        }

        self.store.delete_patient(patient_id).await?;
        tracing::info!(patient_id = %patient_id, "Patient deleted");
        Ok(())
    }

    /// Creates the clinical history of a patient
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the patient does not exist and
    /// `AlreadyExists` if the patient already owns a history.
    pub async fn create_history(
        &self,
        history: ClinicalHistory,
        patient_id: PatientId,
    ) -> Result<ClinicalHistory> {
        let patient = self
            .store
            .get_patient(patient_id)
            .await?
            .ok_or_else(|| {
                CarelogError::NotFound(format!("patient {patient_id} does not exist"))
            })?;

        if self.store.find_history_by_patient(patient_id).await?.is_some() {
            return Err(CarelogError::AlreadyExists(format!(
                "patient {} already has a clinical history; modify the existing one",
                patient.person.full_name()
            )));
        }

        let mut history = history;
        history.patient_id = patient_id;

        let stored = self.store.save_history(history).await?;
        tracing::info!(
            patient_id = %patient_id,
            history_id = %stored.id,
            "Clinical history created"
        );
        Ok(stored)
    }

    /// Replaces a patient's clinical history in full
    ///
    /// The replacement is keyed to the stored history: its id and its
    /// ownership are taken from the existing record and `patient_id`, so
    /// a caller cannot move a history between patients.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` unless the patient exists and owns a history.
    pub async fn update_history(
        &self,
        updates: ClinicalHistory,
        patient_id: PatientId,
    ) -> Result<ClinicalHistory> {
        let patient = self.store.get_patient(patient_id).await?;
        let existing = self.store.find_history_by_patient(patient_id).await?;

        let (Some(_), Some(existing)) = (patient, existing) else {
            return Err(CarelogError::NotFound(
                "patient does not exist or has no clinical history".to_string(),
            ));
        };

        let mut replacement = updates;
        replacement.id = existing.id;
        replacement.patient_id = patient_id;

        let stored = self.store.save_history(replacement).await?;
        tracing::info!(history_id = %stored.id, "Clinical history updated");
        Ok(stored)
    }

    /// Deletes a clinical history and every observation bound to it
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no history with `history_id` exists.
    pub async fn delete_history(&self, history_id: HistoryId) -> Result<()> {
        if self.store.get_history(history_id).await?.is_none() {
            return Err(CarelogError::NotFound(format!(
                "clinical history {history_id} does not exist"
            )));
        }

        let removed = self.store.delete_observations_by_history(history_id).await?;
        self.store.delete_history(history_id).await?;

        tracing::info!(
            history_id = %history_id,
            observations_removed = removed,
            "Clinical history deleted"
        );
        Ok(())
    }

    /// Records a nursing observation against a clinical history
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the history does not exist.
    pub async fn create_observation(
        &self,
        observation: NursingObservation,
        history_id: HistoryId,
    ) -> Result<NursingObservation> {
        if self.store.get_history(history_id).await?.is_none() {
            return Err(CarelogError::NotFound(
                "patient does not exist or has no clinical history to record against".to_string(),
            ));
        }

        let mut observation = observation;
        observation.history_id = history_id;

        let stored = self.store.save_observation(observation).await?;
        tracing::info!(
            history_id = %history_id,
            observation_id = %stored.id,
            "Nursing observation recorded"
        );
        Ok(stored)
    }

    /// Replaces a nursing observation in full
    ///
    /// The observation is identified by `updates.id`; its ownership is
    /// re-bound to `history_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` unless both the history and the observation
    /// exist.
    pub async fn update_observation(
        &self,
        updates: NursingObservation,
        history_id: HistoryId,
    ) -> Result<NursingObservation> {
        let history = self.store.get_history(history_id).await?;
        let existing = self.store.get_observation(updates.id).await?;

        if history.is_none() || existing.is_none() {
            return Err(CarelogError::NotFound(
                "clinical history or nursing observation does not exist".to_string(),
            ));
        }

        let mut replacement = updates;
        replacement.history_id = history_id;

        let stored = self.store.save_observation(replacement).await?;
        tracing::info!(observation_id = %stored.id, "Nursing observation updated");
        Ok(stored)
    }

    /// Deletes a nursing observation
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no observation with `observation_id` exists.
    pub async fn delete_observation(&self, observation_id: ObservationId) -> Result<()> {
        if self.store.get_observation(observation_id).await?.is_none() {
            return Err(CarelogError::NotFound(format!(
                "nursing observation {observation_id} does not exist"
            )));
        }

        self.store.delete_observation(observation_id).await?;
        tracing::info!(observation_id = %observation_id, "Nursing observation deleted");
        Ok(())
    }
}
