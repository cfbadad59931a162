use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Storage model for a blood pressure pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BloodPressure {
    /// Systolic blood pressure (the higher number)
    pub high: i32,

    /// Diastolic blood pressure (the lower number)
    pub low: i32,
}

/// Storage model for a patient's baseline vitals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthInfo {
    /// Normal body temperature, kept as an exact decimal string on disk
    pub normal_temperature: Decimal,

    /// Normal blood pressure
    pub blood_pressure: BloodPressure,
}

/// Storage model for a patient record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientInfo {
    /// Unique identifier for the patient
    pub id: String,

    /// Given name
    pub name: String,

    /// Family name
    pub surname: String,

    /// Date of birth
    pub birthday: NaiveDate,

    /// Baseline vitals
    pub health_info: HealthInfo,
}

/// Input data for registering a new patient. The repository assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPatient {
    /// Given name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    /// Family name
    #[validate(length(min = 1, max = 100, message = "Surname must be between 1 and 100 characters"))]
    pub surname: String,

    /// Date of birth
    pub birthday: NaiveDate,

    /// Baseline vitals
    pub health_info: HealthInfo,
}

impl NewPatient {
    /// Attach an identifier, producing the stored record
    pub fn into_patient(self, id: String) -> PatientInfo {
        PatientInfo {
            id,
            name: self.name,
            surname: self.surname,
            birthday: self.birthday,
            health_info: self.health_info,
        }
    }
}
