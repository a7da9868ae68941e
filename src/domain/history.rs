//! Clinical history domain model

use super::ids::{HistoryId, PatientId};
use serde::{Deserialize, Serialize};

/// The single medical-biometric record owned by a patient
///
/// A patient owns at most one clinical history; the creation-time check
/// lives in the relationship manager, not here. The history references its
/// owner by id only — observations belonging to it are found by query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalHistory {
    /// Storage identifier
    pub id: HistoryId,

    /// Owning patient
    pub patient_id: PatientId,

    /// Registered sex
    pub sex: Option<String>,

    /// Height in meters
    pub height: Option<f64>,

    /// Weight in kilograms
    pub weight: Option<f64>,

    /// Blood type (e.g. "0+", "AB-")
    pub blood_type: Option<String>,

    /// Free-text medical notes
    pub notes: Option<String>,
}

impl ClinicalHistory {
    /// Creates a new builder for constructing a `ClinicalHistory`
    pub fn builder() -> ClinicalHistoryBuilder {
        ClinicalHistoryBuilder::default()
    }
}

/// Builder for [`ClinicalHistory`]
#[derive(Debug, Default)]
pub struct ClinicalHistoryBuilder {
    id: Option<HistoryId>,
    patient_id: Option<PatientId>,
    sex: Option<String>,
    height: Option<f64>,
    weight: Option<f64>,
    blood_type: Option<String>,
    notes: Option<String>,
}

impl ClinicalHistoryBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit identifier; a random one is generated otherwise
    pub fn id(mut self, id: HistoryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the owning patient
    pub fn patient_id(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    /// Sets the registered sex
    pub fn sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    /// Sets the height in meters
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the weight in kilograms
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the blood type
    pub fn blood_type(mut self, blood_type: impl Into<String>) -> Self {
        self.blood_type = Some(blood_type.into());
        self
    }

    /// Sets free-text medical notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds the `ClinicalHistory`
    ///
    /// # Errors
    ///
    /// Returns an error if the owning patient id is missing.
    pub fn build(self) -> Result<ClinicalHistory, String> {
        Ok(ClinicalHistory {
            id: self.id.unwrap_or_default(),
            patient_id: self.patient_id.ok_or("patient_id is required")?,
            sex: self.sex,
            height: self.height,
            weight: self.weight,
            blood_type: self.blood_type,
            notes: self.notes,
        })
    }
}
