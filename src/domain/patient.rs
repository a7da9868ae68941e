//! Patient domain model
//!
//! The patient is the root of the record hierarchy. Its clinical history,
//! when one exists, references the patient by id; the patient record itself
//! carries no child pointer, so parent-to-child navigation is always a
//! store query and serialization never cycles.

use super::ids::PatientId;
use super::person::PersonInfo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A hospitalized patient
///
/// # Examples
///
/// ```
/// use carelog::domain::{Patient, PersonInfo};
/// use chrono::NaiveDate;
///
/// let person = PersonInfo::new(
///     "Ana", "Suárez", "30111222", "555-0101",
///     NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
/// ).unwrap();
///
/// let patient = Patient::builder()
///     .person(person)
///     .admission_date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap())
///     .room(210)
///     .bed(2)
///     .service("Cardiología")
///     .build()
///     .unwrap();
/// assert!(patient.discharge_date.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Storage identifier
    pub id: PatientId,

    /// Identity and contact details
    pub person: PersonInfo,

    /// Date the patient was admitted to the hospital
    pub admission_date: NaiveDate,

    /// Assigned room number
    pub room: i32,

    /// Assigned bed number within the room
    pub bed: i32,

    /// Hospital service the patient is assigned to
    pub service: String,

    /// Date of medical discharge, once discharged
    pub discharge_date: Option<NaiveDate>,
}

impl Patient {
    /// Creates a new builder for constructing a `Patient`
    pub fn builder() -> PatientBuilder {
        PatientBuilder::default()
    }
}

/// Builder for [`Patient`]
#[derive(Debug, Default)]
pub struct PatientBuilder {
    id: Option<PatientId>,
    person: Option<PersonInfo>,
    admission_date: Option<NaiveDate>,
    room: Option<i32>,
    bed: Option<i32>,
    service: Option<String>,
    discharge_date: Option<NaiveDate>,
}

impl PatientBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit identifier; a random one is generated otherwise
    pub fn id(mut self, id: PatientId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the personal identity data
    pub fn person(mut self, person: PersonInfo) -> Self {
        self.person = Some(person);
        self
    }

    /// Sets the admission date
    pub fn admission_date(mut self, date: NaiveDate) -> Self {
        self.admission_date = Some(date);
        self
    }

    /// Sets the assigned room
    pub fn room(mut self, room: i32) -> Self {
        self.room = Some(room);
        self
    }

    /// Sets the assigned bed
    pub fn bed(mut self, bed: i32) -> Self {
        self.bed = Some(bed);
        self
    }

    /// Sets the assigned hospital service
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Sets the discharge date
    pub fn discharge_date(mut self, date: NaiveDate) -> Self {
        self.discharge_date = Some(date);
        self
    }

    /// Builds the `Patient`
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or the service name
    /// is blank.
    pub fn build(self) -> Result<Patient, String> {
        let service = self.service.ok_or("service is required")?;
        if service.trim().is_empty() {
            return Err("service cannot be blank".to_string());
        }

        Ok(Patient {
            id: self.id.unwrap_or_default(),
            person: self.person.ok_or("person is required")?,
            admission_date: self.admission_date.ok_or("admission_date is required")?,
            room: self.room.ok_or("room is required")?,
            bed: self.bed.ok_or("bed is required")?,
            service,
            discharge_date: self.discharge_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> PersonInfo {
        PersonInfo::new(
            "Ana",
            "Suárez",
            "30111222",
            "555-0101",
            NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_builder_full() {
        let patient = Patient::builder()
            .person(person())
            .admission_date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap())
            .room(210)
            .bed(2)
            .service("Cardiología")
            .build()
            .unwrap();

        assert_eq!(patient.service, "Cardiología");
        assert_eq!(patient.person.id_number, "30111222");
    }

    #[test]
    fn test_builder_missing_field() {
        let result = Patient::builder().person(person()).build();
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn test_builder_blank_service() {
        let result = Patient::builder()
            .person(person())
            .admission_date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap())
            .room(210)
            .bed(2)
            .service("  ")
            .build();
        assert!(result.unwrap_err().contains("blank"));
    }

    #[test]
    fn test_serde_round_trip() {
        let patient = Patient::builder()
            .person(person())
            .admission_date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap())
            .room(1)
            .bed(1)
            .service("Clínica Médica")
            .build()
            .unwrap();

        let json = serde_json::to_string(&patient).unwrap();
        let back: Patient = serde_json::from_str(&json).unwrap();
        assert_eq!(patient, back);
    }
}
