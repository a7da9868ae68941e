//! Persistence store traits
//!
//! One trait per aggregate, mirroring the capability set the core
//! consumes: keyed CRUD, field-existence and field-equality predicates,
//! and ordered pagination. The services never see a concrete backend;
//! they hold an `Arc<dyn RecordStore>`.
//!
//! Contract notes shared by all implementations:
//! - `save_*` is insert-or-replace by id.
//! - `delete_*` removes the row if present and is a no-op otherwise;
//!   existence checking is the relationship manager's job, so callers get
//!   typed `NotFound` causes instead of backend-specific errors.
//! - Reads are side-effect free. Each call is atomic with respect to
//!   other calls on the same store.
//! - Observation listings and pages are ordered by `taken_at` ascending
//!   (ties broken by id); patient listings and pages are ordered by last
//!   name, first name, then id. A fixed total order is what makes
//!   consecutive pages disjoint and contiguous.

use crate::domain::{
    ClinicalHistory, HistoryId, NursingObservation, ObservationId, Page, PageRequest, Patient,
    PatientId, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store operations over patient records
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Fetches a patient by id
    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>>;

    /// Inserts or replaces a patient and returns the stored record
    async fn save_patient(&self, patient: Patient) -> Result<Patient>;

    /// Removes a patient row if present
    async fn delete_patient(&self, id: PatientId) -> Result<()>;

    /// True if any stored patient carries the given identification number
    async fn exists_by_id_number(&self, id_number: &str) -> Result<bool>;

    /// All patients, ordered
    async fn list_patients(&self) -> Result<Vec<Patient>>;

    /// One page of the ordered patient listing
    async fn page_patients(&self, request: &PageRequest) -> Result<Page<Patient>>;

    /// One page of patients whose first name, last name or assigned
    /// service contains `keyword` (case-insensitive substring, OR-combined)
    async fn search_patients(&self, keyword: &str, request: &PageRequest)
        -> Result<Page<Patient>>;
}

/// Store operations over clinical histories
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Fetches a history by id
    async fn get_history(&self, id: HistoryId) -> Result<Option<ClinicalHistory>>;

    /// Fetches the history owned by the given patient, if one exists
    async fn find_history_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<ClinicalHistory>>;

    /// Inserts or replaces a history and returns the stored record
    async fn save_history(&self, history: ClinicalHistory) -> Result<ClinicalHistory>;

    /// Removes a history row if present
    async fn delete_history(&self, id: HistoryId) -> Result<()>;
}

/// Store operations over nursing observations
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Fetches an observation by id
    async fn get_observation(&self, id: ObservationId) -> Result<Option<NursingObservation>>;

    /// Inserts or replaces an observation and returns the stored record
    async fn save_observation(&self, observation: NursingObservation)
        -> Result<NursingObservation>;

    /// Removes an observation row if present
    async fn delete_observation(&self, id: ObservationId) -> Result<()>;

    /// All observations bound to the given history, ordered by timestamp
    async fn list_observations_by_history(
        &self,
        history_id: HistoryId,
    ) -> Result<Vec<NursingObservation>>;

    /// Removes every observation bound to the given history, returning the
    /// number of rows removed
    async fn delete_observations_by_history(&self, history_id: HistoryId) -> Result<u64>;

    /// One page of the history's observations, ordered by timestamp
    async fn page_observations_by_history(
        &self,
        history_id: HistoryId,
        request: &PageRequest,
    ) -> Result<Page<NursingObservation>>;

    /// One page of the history's observations with
    /// `start <= taken_at <= end`, ordered by timestamp
    async fn page_observations_in_range(
        &self,
        history_id: HistoryId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        request: &PageRequest,
    ) -> Result<Page<NursingObservation>>;
}

/// Union of the three aggregate stores
///
/// Implemented automatically for any type implementing all three; the
/// services depend on this single trait object.
pub trait RecordStore: PatientStore + HistoryStore + ObservationStore {}

impl<T: PatientStore + HistoryStore + ObservationStore> RecordStore for T {}
