//! Query engine
//!
//! Read-side retrieval over patients and observations: lookups, listings,
//! pagination, keyword search and bounded time-range review. Reads are
//! side-effect free and run concurrently without coordination.

use crate::adapters::store::traits::{
    HistoryStore, ObservationStore, PatientStore, RecordStore,
};
use crate::domain::{
    CarelogError, ClinicalHistory, HistoryId, NursingObservation, ObservationId, Page,
    PageRequest, Patient, PatientId, Result,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Read-side query operations over the record hierarchy
pub struct QueryEngine {
    store: Arc<dyn RecordStore>,
}

impl QueryEngine {
    /// Creates a query engine over the given store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Fetches a patient by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the patient does not exist.
    pub async fn find_patient(&self, patient_id: PatientId) -> Result<Patient> {
        self.store.get_patient(patient_id).await?.ok_or_else(|| {
            CarelogError::NotFound(format!("patient {patient_id} does not exist"))
        })
    }

    /// All patients, ordered by last name then first name
    pub async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.store.list_patients().await
    }

    /// One page of the patient listing
    pub async fn page_patients(&self, request: &PageRequest) -> Result<Page<Patient>> {
        self.store.page_patients(request).await
    }

    /// Patients whose first name, last name or assigned service contains
    /// `keyword` (any one match suffices)
    pub async fn search_patients(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> Result<Page<Patient>> {
        self.store.search_patients(keyword, request).await
    }

    /// Fetches a clinical history by id, if it exists
    pub async fn find_history(&self, history_id: HistoryId) -> Result<Option<ClinicalHistory>> {
        self.store.get_history(history_id).await
    }

    /// Fetches the clinical history owned by a patient
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the patient has no clinical history.
    pub async fn find_history_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<ClinicalHistory> {
        self.store
            .find_history_by_patient(patient_id)
            .await?
            .ok_or_else(|| {
                CarelogError::NotFound("patient has no clinical history".to_string())
            })
    }

    /// Fetches a nursing observation by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the observation does not exist.
    pub async fn find_observation(
        &self,
        observation_id: ObservationId,
    ) -> Result<NursingObservation> {
        self.store
            .get_observation(observation_id)
            .await?
            .ok_or_else(|| {
                CarelogError::NotFound(format!(
                    "nursing observation {observation_id} does not exist"
                ))
            })
    }

    /// All observations of a patient's clinical history, oldest first
    ///
    /// A patient whose history holds no observations yet gets an empty
    /// listing, the same way an out-of-range page is empty rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the patient does not exist or has no
    /// clinical history.
    pub async fn list_observations(&self, patient_id: PatientId) -> Result<Vec<NursingObservation>> {
        self.find_patient(patient_id).await?;
        let history = self.find_history_by_patient(patient_id).await?;
        self.store.list_observations_by_history(history.id).await
    }

    /// One page of a history's observations, oldest first
    pub async fn page_observations(
        &self,
        history_id: HistoryId,
        request: &PageRequest,
    ) -> Result<Page<NursingObservation>> {
        self.store
            .page_observations_by_history(history_id, request)
            .await
    }

    /// One page of a history's observations taken within `[start, end]`,
    /// oldest first
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either bound lies in the future or
    /// the range is inverted.
    pub async fn page_observations_in_range(
        &self,
        history_id: HistoryId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        request: &PageRequest,
    ) -> Result<Page<NursingObservation>> {
        let now = Utc::now();
        if start > now || end > now {
            return Err(CarelogError::InvalidArgument(
                "search dates must not lie after the current date and time".to_string(),
            ));
        }
        if start > end {
            return Err(CarelogError::InvalidArgument(
                "range start must not lie after range end".to_string(),
            ));
        }

        self.store
            .page_observations_in_range(history_id, start, end, request)
            .await
    }
}
