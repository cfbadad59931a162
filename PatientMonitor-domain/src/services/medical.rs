use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::entities::conversions;
use crate::entities::patient::{BloodPressure, PatientInfo};
use crate::services::alert::{AlertError, SendAlertService};
use crate::services::rules::{blood_pressure_deviates, temperature_deviates};
use patient_monitor_data::repository::{PatientInfoRepositoryTrait, RepositoryError};

/// Medical service errors
#[derive(Debug, Error)]
pub enum MedicalServiceError {
    /// No patient is stored under the requested id
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// The alert could not be delivered
    #[error("Alert error: {0}")]
    AlertError(#[from] AlertError),
}

/// Build the warning sent for a patient whose reading is out of range
pub fn alert_message(patient_id: &str) -> String {
    format!("Warning, patient with id: {}, need help", patient_id)
}

/// Trait for evaluating fresh readings against a patient's baseline
pub trait MedicalServiceTrait {
    /// Alert if either side of the reading drifts more than 30 from the baseline
    fn check_blood_pressure(
        &self,
        patient_id: &str,
        blood_pressure: BloodPressure,
    ) -> Result<(), MedicalServiceError>;

    /// Alert if the reading drifts more than 1.5 degrees from the baseline
    fn check_temperature(
        &self,
        patient_id: &str,
        temperature: Decimal,
    ) -> Result<(), MedicalServiceError>;
}

/// Evaluates readings with an injected patient repository and alert sender.
///
/// Each check does one repository lookup and sends at most one alert.
pub struct MedicalService<R, A> {
    repository: R,
    alert_service: A,
}

impl<R: PatientInfoRepositoryTrait, A: SendAlertService> MedicalService<R, A> {
    /// Create a new medical service
    pub fn new(repository: R, alert_service: A) -> Self {
        Self {
            repository,
            alert_service,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn alert_service(&self) -> &A {
        &self.alert_service
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (R, A) {
        (self.repository, self.alert_service)
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> MedicalServiceError {
        match err {
            RepositoryError::NotFound(id) => MedicalServiceError::PatientNotFound(id),
            _ => MedicalServiceError::RepositoryError(err.to_string()),
        }
    }

    fn patient_info(&self, patient_id: &str) -> Result<PatientInfo, MedicalServiceError> {
        debug!("Looking up patient: {}", patient_id);

        let data_patient = self
            .repository
            .get_by_id(patient_id)
            .map_err(|e| {
                error!("Failed to look up patient {}: {}", patient_id, e);
                self.map_repo_error(e)
            })?
            .ok_or_else(|| MedicalServiceError::PatientNotFound(patient_id.to_string()))?;

        Ok(conversions::convert_to_domain_patient(data_patient))
    }

    fn raise_alert(&self, patient_id: &str) -> Result<(), MedicalServiceError> {
        self.alert_service
            .send(&alert_message(patient_id))
            .map_err(|e| {
                error!("Failed to send alert for patient {}: {}", patient_id, e);
                MedicalServiceError::from(e)
            })
    }
}

impl<R: PatientInfoRepositoryTrait, A: SendAlertService> MedicalServiceTrait for MedicalService<R, A> {
    fn check_blood_pressure(
        &self,
        patient_id: &str,
        blood_pressure: BloodPressure,
    ) -> Result<(), MedicalServiceError> {
        let patient = self.patient_info(patient_id)?;
        let baseline = &patient.health_info.blood_pressure;

        if blood_pressure_deviates(baseline, &blood_pressure) {
            warn!(
                "Blood pressure {} for patient {} is out of range (normal {})",
                blood_pressure, patient_id, baseline
            );
            return self.raise_alert(patient_id);
        }

        debug!("Blood pressure {} for patient {} is normal", blood_pressure, patient_id);
        Ok(())
    }

    fn check_temperature(
        &self,
        patient_id: &str,
        temperature: Decimal,
    ) -> Result<(), MedicalServiceError> {
        let patient = self.patient_info(patient_id)?;
        let baseline = patient.health_info.normal_temperature;

        if temperature_deviates(baseline, temperature) {
            warn!(
                "Temperature {} for patient {} is out of range (normal {})",
                temperature, patient_id, baseline
            );
            return self.raise_alert(patient_id);
        }

        debug!("Temperature {} for patient {} is normal", temperature, patient_id);
        Ok(())
    }
}
