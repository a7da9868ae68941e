//! Row-to-entity mapping for the PostgreSQL store

use crate::domain::{
    CarelogError, ClinicalHistory, HistoryId, NursingObservation, ObservationId, Patient,
    PatientId, PersonInfo, Result,
};
use tokio_postgres::Row;
use uuid::Uuid;

fn column<'a, T: tokio_postgres::types::FromSql<'a>>(row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| CarelogError::Storage(format!("Failed to read column '{name}': {e}")))
}

pub fn patient_from_row(row: &Row) -> Result<Patient> {
    let id: Uuid = column(row, "id")?;

    Ok(Patient {
        id: PatientId::from_uuid(id),
        person: PersonInfo {
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            id_number: column(row, "id_number")?,
            phone_number: column(row, "phone_number")?,
            date_of_birth: column(row, "date_of_birth")?,
            email: column(row, "email")?,
            address: column(row, "address")?,
        },
        admission_date: column(row, "admission_date")?,
        room: column(row, "room")?,
        bed: column(row, "bed")?,
        service: column(row, "service")?,
        discharge_date: column(row, "discharge_date")?,
    })
}

pub fn history_from_row(row: &Row) -> Result<ClinicalHistory> {
    let id: Uuid = column(row, "id")?;
    let patient_id: Uuid = column(row, "patient_id")?;

    Ok(ClinicalHistory {
        id: HistoryId::from_uuid(id),
        patient_id: PatientId::from_uuid(patient_id),
        sex: column(row, "sex")?,
        height: column(row, "height")?,
        weight: column(row, "weight")?,
        blood_type: column(row, "blood_type")?,
        notes: column(row, "notes")?,
    })
}

pub fn observation_from_row(row: &Row) -> Result<NursingObservation> {
    let id: Uuid = column(row, "id")?;
    let history_id: Uuid = column(row, "history_id")?;

    Ok(NursingObservation {
        id: ObservationId::from_uuid(id),
        history_id: HistoryId::from_uuid(history_id),
        temperature: column(row, "temperature")?,
        blood_pressure: column(row, "blood_pressure")?,
        heart_rate: column(row, "heart_rate")?,
        respiratory_rate: column(row, "respiratory_rate")?,
        notes: column(row, "notes")?,
        taken_at: column(row, "taken_at")?,
    })
}
