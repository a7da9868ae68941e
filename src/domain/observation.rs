//! Nursing observation domain model

use super::ids::{HistoryId, ObservationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped vital-sign snapshot taken during a nursing round
///
/// Owned exclusively by one clinical history. The `taken_at` timestamp is
/// the ordering and range-filtering key for all observation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NursingObservation {
    /// Storage identifier
    pub id: ObservationId,

    /// Owning clinical history
    pub history_id: HistoryId,

    /// Body temperature in degrees Celsius
    pub temperature: Option<f64>,

    /// Blood pressure reading (e.g. "120/80")
    pub blood_pressure: Option<String>,

    /// Heart rate in beats per minute
    pub heart_rate: Option<String>,

    /// Respiratory rate in breaths per minute
    pub respiratory_rate: Option<String>,

    /// Free-text notes taken during the round
    pub notes: Option<String>,

    /// When the observation was taken
    pub taken_at: DateTime<Utc>,
}

impl NursingObservation {
    /// Creates a new builder for constructing a `NursingObservation`
    pub fn builder() -> NursingObservationBuilder {
        NursingObservationBuilder::default()
    }
}

/// Builder for [`NursingObservation`]
#[derive(Debug, Default)]
pub struct NursingObservationBuilder {
    id: Option<ObservationId>,
    history_id: Option<HistoryId>,
    temperature: Option<f64>,
    blood_pressure: Option<String>,
    heart_rate: Option<String>,
    respiratory_rate: Option<String>,
    notes: Option<String>,
    taken_at: Option<DateTime<Utc>>,
}

impl NursingObservationBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit identifier; a random one is generated otherwise
    pub fn id(mut self, id: ObservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the owning clinical history
    pub fn history_id(mut self, history_id: HistoryId) -> Self {
        self.history_id = Some(history_id);
        self
    }

    /// Sets the body temperature in degrees Celsius
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the blood pressure reading
    pub fn blood_pressure(mut self, blood_pressure: impl Into<String>) -> Self {
        self.blood_pressure = Some(blood_pressure.into());
        self
    }

    /// Sets the heart rate
    pub fn heart_rate(mut self, heart_rate: impl Into<String>) -> Self {
        self.heart_rate = Some(heart_rate.into());
        self
    }

    /// Sets the respiratory rate
    pub fn respiratory_rate(mut self, respiratory_rate: impl Into<String>) -> Self {
        self.respiratory_rate = Some(respiratory_rate.into());
        self
    }

    /// Sets free-text notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the timestamp the observation was taken at
    pub fn taken_at(mut self, taken_at: DateTime<Utc>) -> Self {
        self.taken_at = Some(taken_at);
        self
    }

    /// Builds the `NursingObservation`
    ///
    /// # Errors
    ///
    /// Returns an error if the owning history id or timestamp is missing.
    pub fn build(self) -> Result<NursingObservation, String> {
        Ok(NursingObservation {
            id: self.id.unwrap_or_default(),
            history_id: self.history_id.ok_or("history_id is required")?,
            temperature: self.temperature,
            blood_pressure: self.blood_pressure,
            heart_rate: self.heart_rate,
            respiratory_rate: self.respiratory_rate,
            notes: self.notes,
            taken_at: self.taken_at.ok_or("taken_at is required")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let history_id = HistoryId::new();
        let obs = NursingObservation::builder()
            .history_id(history_id)
            .temperature(36.8)
            .blood_pressure("120/80")
            .heart_rate("72")
            .respiratory_rate("16")
            .taken_at(Utc::now())
            .build()
            .unwrap();

        assert_eq!(obs.history_id, history_id);
        assert_eq!(obs.temperature, Some(36.8));
    }

    #[test]
    fn test_builder_requires_timestamp() {
        let result = NursingObservation::builder()
            .history_id(HistoryId::new())
            .build();
        assert!(result.unwrap_err().contains("taken_at"));
    }

    #[test]
    fn test_builder_requires_history() {
        let result = NursingObservation::builder().taken_at(Utc::now()).build();
        assert!(result.unwrap_err().contains("history_id"));
    }
}
