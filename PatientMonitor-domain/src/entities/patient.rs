use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model for a blood pressure measurement or baseline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BloodPressure {
    /// Systolic blood pressure (the higher number)
    pub high: i32,

    /// Diastolic blood pressure (the lower number)
    pub low: i32,
}

impl BloodPressure {
    pub fn new(high: i32, low: i32) -> Self {
        Self { high, low }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.high, self.low)
    }
}

/// A patient's normal vitals, used as the reference for new readings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthInfo {
    pub normal_temperature: Decimal,
    pub blood_pressure: BloodPressure,
}

impl HealthInfo {
    pub fn new(normal_temperature: Decimal, blood_pressure: BloodPressure) -> Self {
        Self {
            normal_temperature,
            blood_pressure,
        }
    }
}

/// Domain model for a patient record
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

impl PatientInfo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        birthday: NaiveDate,
        health_info: HealthInfo,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            birthday,
            health_info,
        }
    }
}
