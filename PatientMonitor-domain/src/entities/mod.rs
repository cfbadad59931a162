// Domain entities and value objects
pub mod conversions;
pub mod patient;

// Re-export common types for easier imports
pub use patient::{BloodPressure, HealthInfo, PatientInfo};
