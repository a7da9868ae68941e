//! PostgreSQL implementation of the record store traits

use crate::adapters::postgresql::client::PostgresClient;
use crate::adapters::postgresql::models::{
    history_from_row, observation_from_row, patient_from_row,
};
use crate::adapters::store::traits::{HistoryStore, ObservationStore, PatientStore};
use crate::domain::{
    CarelogError, ClinicalHistory, HistoryId, NursingObservation, ObservationId, Page,
    PageRequest, Patient, PatientId, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// PostgreSQL-backed record store
///
/// Wraps a [`PostgresClient`] and maps the store contract onto SQL. The
/// schema's `ON DELETE CASCADE` declarations back up the orchestrated
/// cascade in the relationship manager.
pub struct PostgresStore {
    client: Arc<PostgresClient>,
}

const PATIENT_COLUMNS: &str = "id, first_name, last_name, id_number, phone_number, \
     date_of_birth, email, address, admission_date, room, bed, service, discharge_date";

const OBSERVATION_COLUMNS: &str = "id, history_id, temperature, blood_pressure, heart_rate, \
     respiratory_rate, notes, taken_at";

impl PostgresStore {
    /// Create a store around an existing client
    pub fn new(client: PostgresClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgresClient> {
        &self.client
    }

    async fn count(
        &self,
        query: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<u64> {
        let row = self.client.query_one(query, params).await?;
        let total: i64 = row
            .try_get(0)
            .map_err(|e| CarelogError::Storage(format!("Count failed: {e}")))?;
        Ok(total as u64)
    }
}

#[async_trait]
impl PatientStore for PostgresStore {
    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1");
        let rows = self.client.query(&query, &[id.as_uuid()]).await?;
        rows.first().map(patient_from_row).transpose()
    }

    async fn save_patient(&self, patient: Patient) -> Result<Patient> {
        let statement = "\
            INSERT INTO patients (id, first_name, last_name, id_number, phone_number, \
                date_of_birth, email, address, admission_date, room, bed, service, discharge_date) \
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
            ON CONFLICT (id) DO UPDATE SET \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                id_number = EXCLUDED.id_number, \
                phone_number = EXCLUDED.phone_number, \
                date_of_birth = EXCLUDED.date_of_birth, \
                email = EXCLUDED.email, \
                address = EXCLUDED.address, \
                admission_date = EXCLUDED.admission_date, \
                room = EXCLUDED.room, \
                bed = EXCLUDED.bed, \
                service = EXCLUDED.service, \
                discharge_date = EXCLUDED.discharge_date";

        self.client
            .execute(
                statement,
                &[
                    patient.id.as_uuid(),
                    &patient.person.first_name,
                    &patient.person.last_name,
                    &patient.person.id_number,
                    &patient.person.phone_number,
                    &patient.person.date_of_birth,
                    &patient.person.email,
                    &patient.person.address,
                    &patient.admission_date,
                    &patient.room,
                    &patient.bed,
                    &patient.service,
                    &patient.discharge_date,
                ],
            )
            .await?;

        Ok(patient)
    }

    async fn delete_patient(&self, id: PatientId) -> Result<()> {
        self.client
            .execute("DELETE FROM patients WHERE id = $1", &[id.as_uuid()])
            .await?;
        Ok(())
    }

    async fn exists_by_id_number(&self, id_number: &str) -> Result<bool> {
        let row = self
            .client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM patients WHERE id_number = $1)",
                &[&id_number],
            )
            .await?;
        row.try_get(0)
            .map_err(|e| CarelogError::Storage(format!("Exists check failed: {e}")))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        let query = format!(
            "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY last_name, first_name, id"
        );
        let rows = self.client.query(&query, &[]).await?;
        rows.iter().map(patient_from_row).collect()
    }

    async fn page_patients(&self, request: &PageRequest) -> Result<Page<Patient>> {
        let total = self.count("SELECT COUNT(*) FROM patients", &[]).await?;

        let query = format!(
            "SELECT {PATIENT_COLUMNS} FROM patients \
             ORDER BY last_name, first_name, id LIMIT $1 OFFSET $2"
        );
        let rows = self
            .client
            .query(
                &query,
                &[&i64::from(request.size()), &(request.offset() as i64)],
            )
            .await?;

        let content = rows.iter().map(patient_from_row).collect::<Result<_>>()?;
        Ok(Page::new(content, total, request))
    }

    async fn search_patients(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> Result<Page<Patient>> {
        let pattern = format!("%{keyword}%");

        let total = self
            .count(
                "SELECT COUNT(*) FROM patients \
                 WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR service ILIKE $1",
                &[&pattern],
            )
            .await?;

        let query = format!(
            "SELECT {PATIENT_COLUMNS} FROM patients \
             WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR service ILIKE $1 \
             ORDER BY last_name, first_name, id LIMIT $2 OFFSET $3"
        );
        let rows = self
            .client
            .query(
                &query,
                &[
                    &pattern,
                    &i64::from(request.size()),
                    &(request.offset() as i64),
                ],
            )
            .await?;

        let content = rows.iter().map(patient_from_row).collect::<Result<_>>()?;
        Ok(Page::new(content, total, request))
    }
}

#[async_trait]
impl HistoryStore for PostgresStore {
    async fn get_history(&self, id: HistoryId) -> Result<Option<ClinicalHistory>> {
        let rows = self
            .client
            .query(
                "SELECT id, patient_id, sex, height, weight, blood_type, notes \
                 FROM clinical_histories WHERE id = $1",
                &[id.as_uuid()],
            )
            .await?;
        rows.first().map(history_from_row).transpose()
    }

    async fn find_history_by_patient(
        &self,
        patient_id: PatientId,
    ) -> Result<Option<ClinicalHistory>> {
        let rows = self
            .client
            .query(
                "SELECT id, patient_id, sex, height, weight, blood_type, notes \
                 FROM clinical_histories WHERE patient_id = $1",
                &[patient_id.as_uuid()],
            )
            .await?;
        rows.first().map(history_from_row).transpose()
    }

    async fn save_history(&self, history: ClinicalHistory) -> Result<ClinicalHistory> {
        let statement = "\
            INSERT INTO clinical_histories (id, patient_id, sex, height, weight, blood_type, notes) \
            VALUES ($1, $2, $3, $4, $5, $6, $7) \
            ON CONFLICT (id) DO UPDATE SET \
                patient_id = EXCLUDED.patient_id, \
                sex = EXCLUDED.sex, \
                height = EXCLUDED.height, \
                weight = EXCLUDED.weight, \
                blood_type = EXCLUDED.blood_type, \
                notes = EXCLUDED.notes";

        self.client
            .execute(
                statement,
                &[
                    history.id.as_uuid(),
                    history.patient_id.as_uuid(),
                    &history.sex,
                    &history.height,
                    &history.weight,
                    &history.blood_type,
                    &history.notes,
                ],
            )
            .await?;

        Ok(history)
    }

    async fn delete_history(&self, id: HistoryId) -> Result<()> {
        self.client
            .execute(
                "DELETE FROM clinical_histories WHERE id = $1",
                &[id.as_uuid()],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ObservationStore for PostgresStore {
    async fn get_observation(&self, id: ObservationId) -> Result<Option<NursingObservation>> {
        let query = format!("SELECT {OBSERVATION_COLUMNS} FROM nursing_observations WHERE id = $1");
        let rows = self.client.query(&query, &[id.as_uuid()]).await?;
        rows.first().map(observation_from_row).transpose()
    }

    async fn save_observation(
        &self,
        observation: NursingObservation,
    ) -> Result<NursingObservation> {
        let statement = "\
            INSERT INTO nursing_observations (id, history_id, temperature, blood_pressure, \
                heart_rate, respiratory_rate, notes, taken_at) \
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
            ON CONFLICT (id) DO UPDATE SET \
                history_id = EXCLUDED.history_id, \
                temperature = EXCLUDED.temperature, \
                blood_pressure = EXCLUDED.blood_pressure, \
                heart_rate = EXCLUDED.heart_rate, \
                respiratory_rate = EXCLUDED.respiratory_rate, \
                notes = EXCLUDED.notes, \
                taken_at = EXCLUDED.taken_at";

        self.client
            .execute(
                statement,
                &[
                    observation.id.as_uuid(),
                    observation.history_id.as_uuid(),
                    &observation.temperature,
                    &observation.blood_pressure,
                    &observation.heart_rate,
                    &observation.respiratory_rate,
                    &observation.notes,
                    &observation.taken_at,
                ],
            )
            .await?;

        Ok(observation)
    }

    async fn delete_observation(&self, id: ObservationId) -> Result<()> {
        self.client
            .execute(
                "DELETE FROM nursing_observations WHERE id = $1",
                &[id.as_uuid()],
            )
            .await?;
        Ok(())
    }

    async fn list_observations_by_history(
        &self,
        history_id: HistoryId,
    ) -> Result<Vec<NursingObservation>> {
        let query = format!(
            "SELECT {OBSERVATION_COLUMNS} FROM nursing_observations \
             WHERE history_id = $1 ORDER BY taken_at, id"
        );
        let rows = self.client.query(&query, &[history_id.as_uuid()]).await?;
        rows.iter().map(observation_from_row).collect()
    }

    async fn delete_observations_by_history(&self, history_id: HistoryId) -> Result<u64> {
        self.client
            .execute(
                "DELETE FROM nursing_observations WHERE history_id = $1",
                &[history_id.as_uuid()],
            )
            .await
    }

    async fn page_observations_by_history(
        &self,
        history_id: HistoryId,
        request: &PageRequest,
    ) -> Result<Page<NursingObservation>> {
        let total = self
            .count(
                "SELECT COUNT(*) FROM nursing_observations WHERE history_id = $1",
                &[history_id.as_uuid()],
            )
            .await?;

        let query = format!(
            "SELECT {OBSERVATION_COLUMNS} FROM nursing_observations \
             WHERE history_id = $1 ORDER BY taken_at, id LIMIT $2 OFFSET $3"
        );
        let rows = self
            .client
            .query(
                &query,
                &[
                    history_id.as_uuid(),
                    &i64::from(request.size()),
                    &(request.offset() as i64),
                ],
            )
            .await?;

        let content = rows
            .iter()
            .map(observation_from_row)
            .collect::<Result<_>>()?;
        Ok(Page::new(content, total, request))
    }

    async fn page_observations_in_range(
        &self,
        history_id: HistoryId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        request: &PageRequest,
    ) -> Result<Page<NursingObservation>> {
        let total = self
            .count(
                "SELECT COUNT(*) FROM nursing_observations \
                 WHERE history_id = $1 AND taken_at BETWEEN $2 AND $3",
                &[history_id.as_uuid(), &start, &end],
            )
            .await?;

        let query = format!(
            "SELECT {OBSERVATION_COLUMNS} FROM nursing_observations \
             WHERE history_id = $1 AND taken_at BETWEEN $2 AND $3 \
             ORDER BY taken_at, id LIMIT $4 OFFSET $5"
        );
        let rows = self
            .client
            .query(
                &query,
                &[
                    history_id.as_uuid(),
                    &start,
                    &end,
                    &i64::from(request.size()),
                    &(request.offset() as i64),
                ],
            )
            .await?;

        let content = rows
            .iter()
            .map(observation_from_row)
            .collect::<Result<_>>()?;
        Ok(Page::new(content, total, request))
    }
}
