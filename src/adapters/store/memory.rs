//! In-memory record store
//!
//! The reference implementation of the store traits: three keyed maps
//! behind one `RwLock`. Holding all tables under a single lock makes every
//! store call atomic with respect to every other, which is the same
//! isolation the core expects from a transactional backend. Used by the
//! test suite and by embedders that don't need durability.

use crate::adapters::store::traits::{HistoryStore, ObservationStore, PatientStore};
use crate::domain::{
    ClinicalHistory, HistoryId, NursingObservation, ObservationId, Page, PageRequest, Patient,
    PatientId, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    patients: HashMap<PatientId, Patient>,
    histories: HashMap<HistoryId, ClinicalHistory>,
    observations: HashMap<ObservationId, NursingObservation>,
}

/// In-memory implementation of the record store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

/// Patients in listing order: last name, first name, id as tie-breaker
fn sort_patients(patients: &mut [Patient]) {
    patients.sort_by(|a, b| {
        a.person
            .last_name
            .cmp(&b.person.last_name)
            .then_with(|| a.person.first_name.cmp(&b.person.first_name))
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}

/// Observations in timeline order: timestamp, id as tie-breaker
fn sort_observations(observations: &mut [NursingObservation]) {
    observations.sort_by(|a, b| {
        a.taken_at
            .cmp(&b.taken_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}

fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let content: Vec<T> = items
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.size() as usize)
        .collect();
    Page::new(content, total, request)
}

fn matches_keyword(patient: &Patient, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    patient.person.first_name.to_lowercase().contains(&keyword)
        || patient.person.last_name.to_lowercase().contains(&keyword)
        || patient.service.to_lowercase().contains(&keyword)
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        Ok(self.tables.read().await.patients.get(&id).cloned())
    }

    async fn save_patient(&self, patient: Patient) -> Result<Patient> {
        self.tables
            .write()
            .await
            .patients
            .insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn delete_patient(&self, id: PatientId) -> Result<()> {
        self.tables.write().await.patients.remove(&id);
        Ok(())
    }

    async fn exists_by_id_number(&self, id_number: &str) -> Result<bool> {
        Ok(self
            .tables
            .read()
            .await
            .patients
            .values()
            .any(|p| p.person.id_number == id_number))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        let mut patients: Vec<Patient> =
            self.tables.read().await.patients.values().cloned().collect();
        sort_patients(&mut patients);
        Ok(patients)
    }

    async fn page_patients(&self, request: &PageRequest) -> Result<Page<Patient>> {
        Ok(paginate(self.list_patients().await?, request))
    }

    async fn search_patients(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> Result<Page<Patient>> {
        let mut matched: Vec<Patient> = self
            .tables
            .read()
            .await
            .patients
            .values()
            .filter(|p| matches_keyword(p, keyword))
            .cloned()
            .collect();
        sort_patients(&mut matched);
        Ok(paginate(matched, request))
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn get_history(&self, id: HistoryId) -> Result<Option<ClinicalHistory>> {
        Ok(self.tables.read().await.histories.get(&id).cloned())
    }

    async fn find_history_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<ClinicalHistory>> {
        Ok(self
            .tables
            .read()
            .await
            .histories
            .values()
            .find(|h| h.patient_id == patient_id)
            .cloned())
    }

    async fn save_history(&self, history: ClinicalHistory) -> Result<ClinicalHistory> {
        self.tables
            .write()
            .await
            .histories
            .insert(history.id, history.clone());
        Ok(history)
    }

    async fn delete_history(&self, id: HistoryId) -> Result<()> {
        self.tables.write().await.histories.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ObservationStore for MemoryStore {
    async fn get_observation(&self, id: ObservationId) -> Result<Option<NursingObservation>> {
        Ok(self.tables.read().await.observations.get(&id).cloned())
    }

    async fn save_observation(
        &self,
        observation: NursingObservation,
    ) -> Result<NursingObservation> {
        self.tables
            .write()
            .await
            .observations
            .insert(observation.id, observation.clone());
        Ok(observation)
    }

    async fn delete_observation(&self, id: ObservationId) -> Result<()> {
        self.tables.write().await.observations.remove(&id);
        Ok(())
    }

    async fn list_observations_by_history(
        &self,
        history_id: HistoryId,
    ) -> Result<Vec<NursingObservation>> {
        let mut observations: Vec<NursingObservation> = self
            .tables
            .read()
            .await
            .observations
            .values()
            .filter(|o| o.history_id == history_id)
            .cloned()
            .collect();
        sort_observations(&mut observations);
        Ok(observations)
    }

    async fn delete_observations_by_history(&self, history_id: HistoryId) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.observations.len();
        tables.observations.retain(|_, o| o.history_id != history_id);
        Ok((before - tables.observations.len()) as u64)
    }

    async fn page_observations_by_history(
        &self,
        history_id: HistoryId,
        request: &PageRequest,
    ) -> Result<Page<NursingObservation>> {
        Ok(paginate(
            self.list_observations_by_history(history_id).await?,
            request,
        ))
    }

    async fn page_observations_in_range(
        &self,
        history_id: HistoryId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        request: &PageRequest,
    ) -> Result<Page<NursingObservation>> {
        let in_range: Vec<NursingObservation> = self
            .list_observations_by_history(history_id)
            .await?
            .into_iter()
            .filter(|o| o.taken_at >= start && o.taken_at <= end)
            .collect();
        Ok(paginate(in_range, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonInfo;
    use chrono::NaiveDate;

    fn patient(first: &str, last: &str, id_number: &str, service: &str) -> Patient {
        Patient::builder()
            .person(
                PersonInfo::new(
                    first,
                    last,
                    id_number,
                    "555-0000",
                    NaiveDate::from_ymd_opt(1975, 1, 1).unwrap(),
                )
                .unwrap(),
            )
            .admission_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .room(100)
            .bed(1)
            .service(service)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_get_patient() {
        let store = MemoryStore::new();
        let saved = store
            .save_patient(patient("Ana", "Suárez", "30111222", "Cardiología"))
            .await
            .unwrap();

        let fetched = store.get_patient(saved.id).await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_exists_by_id_number() {
        let store = MemoryStore::new();
        store
            .save_patient(patient("Ana", "Suárez", "30111222", "Cardiología"))
            .await
            .unwrap();

        assert!(store.exists_by_id_number("30111222").await.unwrap());
        assert!(!store.exists_by_id_number("99999999").await.unwrap());
    }

    #[tokio::test]
    async fn test_listing_order_is_by_name() {
        let store = MemoryStore::new();
        store
            .save_patient(patient("Zoe", "Molina", "1", "Clínica Médica"))
            .await
            .unwrap();
        store
            .save_patient(patient("Ana", "Acosta", "2", "Clínica Médica"))
            .await
            .unwrap();
        store
            .save_patient(patient("Ana", "Molina", "3", "Clínica Médica"))
            .await
            .unwrap();

        let names: Vec<String> = store
            .list_patients()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.person.full_name())
            .collect();
        assert_eq!(names, ["Acosta, Ana", "Molina, Ana", "Molina, Zoe"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_or_combined() {
        let store = MemoryStore::new();
        store
            .save_patient(patient("Ana", "Suárez", "1", "Cardiología"))
            .await
            .unwrap();
        store
            .save_patient(patient("Bruno", "Cardozo", "2", "Traumatología"))
            .await
            .unwrap();
        store
            .save_patient(patient("Carla", "Núñez", "3", "Clínica Médica"))
            .await
            .unwrap();

        let page = store
            .search_patients("CARD", &PageRequest::default())
            .await
            .unwrap();
        // Matches the Cardiología service and the Cardozo last name
        assert_eq!(page.total_elements, 2);
    }

    #[tokio::test]
    async fn test_delete_observations_by_history_counts() {
        let store = MemoryStore::new();
        let history_id = HistoryId::new();
        for hour in 8..11 {
            store
                .save_observation(
                    NursingObservation::builder()
                        .history_id(history_id)
                        .taken_at(
                            NaiveDate::from_ymd_opt(2024, 1, 1)
                                .unwrap()
                                .and_hms_opt(hour, 0, 0)
                                .unwrap()
                                .and_utc(),
                        )
                        .build()
                        .unwrap(),
                )
                .await
                .unwrap();
        }

        assert_eq!(
            store
                .delete_observations_by_history(history_id)
                .await
                .unwrap(),
            3
        );
        assert!(store
            .list_observations_by_history(history_id)
            .await
            .unwrap()
            .is_empty());
    }
}
