//! Personal identity data shared by people-shaped records
//!
//! `PersonInfo` is a plain value embedded by composition into the entities
//! that describe a person. There is no polymorphic dispatch over "person
//! kinds" anywhere in the crate, so a base-type hierarchy would buy
//! nothing; embedding keeps each entity a self-contained record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity and contact details of a person
///
/// The `id_number` is the external identification number (e.g. a national
/// document number). It is the field the admission uniqueness invariant is
/// checked against; it is not the storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonInfo {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// External identification number, unique across all patients
    pub id_number: String,

    /// Contact phone number
    pub phone_number: String,

    /// Date of birth
    pub date_of_birth: NaiveDate,

    /// Contact e-mail, if known
    pub email: Option<String>,

    /// Street address, if known
    pub address: Option<String>,
}

impl PersonInfo {
    /// Creates a new `PersonInfo` with the mandatory fields
    ///
    /// # Errors
    ///
    /// Returns an error if any of the name or identification fields is
    /// blank.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        id_number: impl Into<String>,
        phone_number: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Result<Self, String> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let id_number = id_number.into();
        let phone_number = phone_number.into();

        if first_name.trim().is_empty() {
            return Err("first name cannot be blank".to_string());
        }
        if last_name.trim().is_empty() {
            return Err("last name cannot be blank".to_string());
        }
        if id_number.trim().is_empty() {
            return Err("identification number cannot be blank".to_string());
        }

        Ok(Self {
            first_name,
            last_name,
            id_number,
            phone_number,
            date_of_birth,
            email: None,
            address: None,
        })
    }

    /// Sets the contact e-mail
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the street address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Full display name, last name first
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1980, 5, 17).unwrap()
    }

    #[test]
    fn test_person_creation() {
        let person = PersonInfo::new("Ana", "Suárez", "30111222", "555-0101", dob())
            .unwrap()
            .with_email("ana@example.com");

        assert_eq!(person.full_name(), "Suárez, Ana");
        assert_eq!(person.email.as_deref(), Some("ana@example.com"));
        assert!(person.address.is_none());
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(PersonInfo::new("", "Suárez", "30111222", "555-0101", dob()).is_err());
        assert!(PersonInfo::new("Ana", "   ", "30111222", "555-0101", dob()).is_err());
        assert!(PersonInfo::new("Ana", "Suárez", "", "555-0101", dob()).is_err());
    }
}
