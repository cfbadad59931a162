// Storage models
pub mod patient;

pub use patient::{BloodPressure, HealthInfo, NewPatient, PatientInfo};
