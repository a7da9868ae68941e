//! Integration tests for the query engine: time-range review, keyword
//! search, pagination stability, and the observation listing policy.

use carelog::adapters::store::{MemoryStore, RecordStore};
use carelog::core::{QueryEngine, RelationshipManager};
use carelog::domain::{
    CarelogError, ClinicalHistory, HistoryId, NursingObservation, PageRequest, Patient,
    PatientId, PersonInfo,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Arc;

fn new_store() -> Arc<dyn RecordStore> {
    Arc::new(MemoryStore::new())
}

fn ts(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
}

fn patient(first: &str, last: &str, id_number: &str, service: &str) -> Patient {
    Patient::builder()
        .person(
            PersonInfo::new(
                first,
                last,
                id_number,
                "555-0101",
                NaiveDate::from_ymd_opt(1965, 11, 2).unwrap(),
            )
            .unwrap(),
        )
        .admission_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
        .room(101)
        .bed(1)
        .service(service)
        .build()
        .unwrap()
}

fn observation(history_id: HistoryId, taken_at: DateTime<Utc>) -> NursingObservation {
    NursingObservation::builder()
        .history_id(history_id)
        .temperature(36.5)
        .blood_pressure("110/70")
        .heart_rate("68")
        .respiratory_rate("14")
        .taken_at(taken_at)
        .build()
        .unwrap()
}

/// Admits a patient with a history and returns (patient id, history id)
async fn admitted_with_history(
    manager: &RelationshipManager,
    id_number: &str,
) -> (PatientId, HistoryId) {
    let patient = manager
        .admit_patient(patient("Ana", "Suárez", id_number, "Cardiología"))
        .await
        .unwrap();
    let history = manager
        .create_history(
            ClinicalHistory::builder()
                .patient_id(patient.id)
                .sex("F")
                .build()
                .unwrap(),
            patient.id,
        )
        .await
        .unwrap();
    (patient.id, history.id)
}

#[tokio::test]
async fn range_query_returns_only_observations_inside_the_window() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    let (_, history_id) = admitted_with_history(&manager, "12345678").await;

    // Scenario B: O1 on Jan 1st, O2 on Jan 2nd
    let o1 = manager
        .create_observation(observation(history_id, ts(2024, 1, 1, 8, 0)), history_id)
        .await
        .unwrap();
    manager
        .create_observation(observation(history_id, ts(2024, 1, 2, 8, 0)), history_id)
        .await
        .unwrap();

    let page = queries
        .page_observations_in_range(
            history_id,
            ts(2024, 1, 1, 0, 0),
            ts(2024, 1, 1, 23, 59),
            &PageRequest::new(0, 10).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].id, o1.id);
}

#[tokio::test]
async fn range_bounds_are_inclusive() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    let (_, history_id) = admitted_with_history(&manager, "12345678").await;
    let taken_at = ts(2024, 1, 1, 8, 0);
    manager
        .create_observation(observation(history_id, taken_at), history_id)
        .await
        .unwrap();

    // A window collapsed onto the exact timestamp still matches
    let page = queries
        .page_observations_in_range(history_id, taken_at, taken_at, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
}

#[tokio::test]
async fn range_query_rejects_future_bounds() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    let (_, history_id) = admitted_with_history(&manager, "12345678").await;

    let future = Utc::now() + Duration::minutes(1);

    let err = queries
        .page_observations_in_range(history_id, ts(2024, 1, 1, 0, 0), future, &PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CarelogError::InvalidArgument(_)));

    let err = queries
        .page_observations_in_range(history_id, future, future, &PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CarelogError::InvalidArgument(_)));
}

#[tokio::test]
async fn range_query_rejects_inverted_ranges() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    let (_, history_id) = admitted_with_history(&manager, "12345678").await;

    let err = queries
        .page_observations_in_range(
            history_id,
            ts(2024, 1, 2, 0, 0),
            ts(2024, 1, 1, 0, 0),
            &PageRequest::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CarelogError::InvalidArgument(_)));
}

#[tokio::test]
async fn observation_pages_are_ordered_disjoint_and_contiguous() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    let (patient_id, history_id) = admitted_with_history(&manager, "12345678").await;

    // Inserted out of order on purpose
    for day in [3u32, 1, 5, 2, 4] {
        manager
            .create_observation(observation(history_id, ts(2024, 1, day, 8, 0)), history_id)
            .await
            .unwrap();
    }

    let req = PageRequest::new(0, 2).unwrap();
    let first = queries.page_observations(history_id, &req).await.unwrap();
    assert_eq!(first.total_elements, 5);
    assert_eq!(first.total_pages, 3);
    assert!(first.has_next());

    let second = queries
        .page_observations(history_id, &PageRequest::new(1, 2).unwrap())
        .await
        .unwrap();
    let third = queries
        .page_observations(history_id, &PageRequest::new(2, 2).unwrap())
        .await
        .unwrap();
    assert_eq!(third.content.len(), 1);
    assert!(!third.has_next());

    // The in-order union of consecutive pages is the full ascending listing
    let paged: Vec<_> = first
        .content
        .into_iter()
        .chain(second.content)
        .chain(third.content)
        .collect();
    let all = queries.list_observations(patient_id).await.unwrap();
    assert_eq!(paged, all);

    let days: Vec<u32> = all
        .iter()
        .map(|o| chrono::Datelike::day(&o.taken_at.date_naive()))
        .collect();
    assert_eq!(days, [1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn page_past_the_end_is_empty_not_an_error() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    let (_, history_id) = admitted_with_history(&manager, "12345678").await;

    let page = queries
        .page_observations(history_id, &PageRequest::new(7, 10).unwrap())
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_elements, 0);
}

#[tokio::test]
async fn listing_observations_of_an_empty_history_is_a_valid_empty_result() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    let (patient_id, _) = admitted_with_history(&manager, "12345678").await;

    let observations = queries.list_observations(patient_id).await.unwrap();
    assert!(observations.is_empty());
}

#[tokio::test]
async fn listing_observations_requires_patient_and_history() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    // Unknown patient
    let err = queries.list_observations(PatientId::new()).await.unwrap_err();
    assert!(matches!(err, CarelogError::NotFound(_)));

    // Known patient without a history
    let admitted = manager
        .admit_patient(patient("Bruno", "Cardozo", "23456789", "Traumatología"))
        .await
        .unwrap();
    let err = queries.list_observations(admitted.id).await.unwrap_err();
    assert!(matches!(err, CarelogError::NotFound(_)));
}

#[tokio::test]
async fn keyword_search_matches_the_service_field() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    // Scenario D: neither name contains the keyword, the service does
    manager
        .admit_patient(patient("Marta", "Ibáñez", "30111222", "Cardiología"))
        .await
        .unwrap();
    manager
        .admit_patient(patient("Bruno", "Paz", "30111223", "Traumatología"))
        .await
        .unwrap();

    let page = queries
        .search_patients("cardio", &PageRequest::new(0, 10).unwrap())
        .await
        .unwrap();

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].person.id_number, "30111222");
}

#[tokio::test]
async fn keyword_search_covers_both_name_fields() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    manager
        .admit_patient(patient("Rosario", "Núñez", "1", "Clínica Médica"))
        .await
        .unwrap();
    manager
        .admit_patient(patient("Pedro", "Rosales", "2", "Clínica Médica"))
        .await
        .unwrap();
    manager
        .admit_patient(patient("Bruno", "Paz", "3", "Clínica Médica"))
        .await
        .unwrap();

    let page = queries
        .search_patients("ros", &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_elements, 2);

    let none = queries
        .search_patients("oncolog", &PageRequest::default())
        .await
        .unwrap();
    assert!(none.is_empty());
    assert_eq!(none.total_pages, 0);
}

#[tokio::test]
async fn patient_pages_follow_the_listing_order() {
    let store = new_store();
    let manager = RelationshipManager::new(store.clone());
    let queries = QueryEngine::new(store);

    for (i, last) in ["Zárate", "Acosta", "Molina"].into_iter().enumerate() {
        manager
            .admit_patient(patient("Juan", last, &format!("{i}0000000"), "Clínica Médica"))
            .await
            .unwrap();
    }

    let page = queries
        .page_patients(&PageRequest::new(0, 2).unwrap())
        .await
        .unwrap();
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);

    let last_names: Vec<&str> = page
        .content
        .iter()
        .map(|p| p.person.last_name.as_str())
        .collect();
    assert_eq!(last_names, ["Acosta", "Molina"]);

    let rest = queries
        .page_patients(&PageRequest::new(1, 2).unwrap())
        .await
        .unwrap();
    assert_eq!(rest.content[0].person.last_name, "Zárate");
}

#[tokio::test]
async fn find_history_returns_none_without_error() {
    let queries = QueryEngine::new(new_store());
    assert!(queries.find_history(HistoryId::new()).await.unwrap().is_none());
}
