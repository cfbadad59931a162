// Testing utilities and doubles for the domain layer
// Available in unit tests and when the "mock" feature is enabled

use std::sync::Mutex;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::services::alert::{AlertError, SendAlertService};
use patient_monitor_data::models::patient::{BloodPressure, HealthInfo, PatientInfo};

// Re-export useful test mocks from the data layer
pub use patient_monitor_data::repository::tests::MockPatientInfoRepository;

/// Alert service that keeps every message it is asked to send
#[derive(Debug, Default)]
pub struct RecordingAlertService {
    messages: Mutex<Vec<String>>,
    should_fail: bool,
}

impl RecordingAlertService {
    /// Create a recorder that accepts every message
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder whose sends always fail
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Messages sent so far, in order
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl SendAlertService for RecordingAlertService {
    fn send(&self, message: &str) -> Result<(), AlertError> {
        if self.should_fail {
            return Err(AlertError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "mock is configured to fail sending",
            )));
        }

        self.messages
            .lock()
            .map_err(|e| AlertError::Lock(e.to_string()))?
            .push(message.to_string());
        Ok(())
    }
}

/// Ivan Petrov, born 1980-11-26, normal temperature 36.65 and blood pressure 120/80
pub fn sample_patient(id: &str) -> PatientInfo {
    PatientInfo {
        id: id.to_string(),
        name: "Ivan".to_string(),
        surname: "Petrov".to_string(),
        birthday: NaiveDate::from_ymd_opt(1980, 11, 26).unwrap_or_default(),
        health_info: HealthInfo {
            normal_temperature: Decimal::new(3665, 2),
            blood_pressure: BloodPressure { high: 120, low: 80 },
        },
    }
}
