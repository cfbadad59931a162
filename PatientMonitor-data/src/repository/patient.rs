use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use crate::models::patient::{NewPatient, PatientInfo};

/// Repository trait for patient records
pub trait PatientInfoRepositoryTrait: Send + Sync {
    /// Get a patient by id. `Ok(None)` when no such patient exists.
    fn get_by_id(&self, id: &str) -> Result<Option<PatientInfo>, RepositoryError>;

    /// Register a new patient and return the generated id
    fn add(&self, patient: NewPatient) -> Result<String, RepositoryError>;

    /// Replace an existing patient record
    fn update(&self, patient: PatientInfo) -> Result<PatientInfo, RepositoryError>;

    /// Remove a patient record and return it
    fn remove(&self, id: &str) -> Result<PatientInfo, RepositoryError>;
}

/// Validate a registration request and give it a fresh id
pub(crate) fn register(patient: NewPatient) -> Result<PatientInfo, RepositoryError> {
    patient.validate()?;
    Ok(patient.into_patient(Uuid::new_v4().to_string()))
}

/// Repository for patient records held in process memory
#[derive(Debug, Clone, Default)]
pub struct PatientInfoRepository {
    storage: InMemoryStorage,
}

impl PatientInfoRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with existing records
    pub fn with_patients(patients: Vec<PatientInfo>) -> Self {
        Self {
            storage: InMemoryStorage::with_patients(patients),
        }
    }
}

impl PatientInfoRepositoryTrait for PatientInfoRepository {
    fn get_by_id(&self, id: &str) -> Result<Option<PatientInfo>, RepositoryError> {
        debug!("Getting patient by ID from memory: {}", id);
        self.storage.get(id)
    }

    fn add(&self, patient: NewPatient) -> Result<String, RepositoryError> {
        let patient = register(patient)?;
        let id = patient.id.clone();
        debug!("Storing patient in memory: {}", id);
        self.storage.insert(patient)?;
        Ok(id)
    }

    fn update(&self, patient: PatientInfo) -> Result<PatientInfo, RepositoryError> {
        debug!("Updating patient in memory: {}", patient.id);
        self.storage.replace(patient)
    }

    fn remove(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        debug!("Removing patient from memory: {}", id);
        self.storage.remove(id)
    }
}

/// Mock patient repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Mock implementation of PatientInfoRepositoryTrait with a fixed set of patients
    #[derive(Debug, Default)]
    pub struct MockPatientInfoRepository {
        patients: HashMap<String, PatientInfo>,
        lookups: AtomicUsize,
        fail_lookups: bool,
    }

    impl MockPatientInfoRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository with predefined patients
        pub fn with_patients(patients: Vec<PatientInfo>) -> Self {
            Self {
                patients: patients
                    .into_iter()
                    .map(|patient| (patient.id.clone(), patient))
                    .collect(),
                ..Self::default()
            }
        }

        /// Configure the mock so every lookup returns a lock error
        pub fn with_lookup_failure(mut self) -> Self {
            self.fail_lookups = true;
            self
        }

        /// Number of `get_by_id` calls made so far
        pub fn lookup_count(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    impl PatientInfoRepositoryTrait for MockPatientInfoRepository {
        fn get_by_id(&self, id: &str) -> Result<Option<PatientInfo>, RepositoryError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail_lookups {
                return Err(RepositoryError::Lock(
                    "mock is configured to fail lookups".to_string(),
                ));
            }
            Ok(self.patients.get(id).cloned())
        }

        fn add(&self, patient: NewPatient) -> Result<String, RepositoryError> {
            Ok(register(patient)?.id)
        }

        fn update(&self, patient: PatientInfo) -> Result<PatientInfo, RepositoryError> {
            if self.patients.contains_key(&patient.id) {
                Ok(patient)
            } else {
                Err(RepositoryError::NotFound(patient.id))
            }
        }

        fn remove(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
            self.patients
                .get(id)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
        }
    }

    #[cfg(test)]
    mod repository_tests {
        use chrono::NaiveDate;
        use rust_decimal::Decimal;

        use super::*;
        use crate::models::patient::{BloodPressure, HealthInfo};

        fn new_patient() -> NewPatient {
            NewPatient {
                name: "Ivan".to_string(),
                surname: "Petrov".to_string(),
                birthday: NaiveDate::from_ymd_opt(1980, 11, 26).unwrap(),
                health_info: HealthInfo {
                    normal_temperature: Decimal::new(3665, 2),
                    blood_pressure: BloodPressure { high: 120, low: 80 },
                },
            }
        }

        #[test]
        fn test_add_assigns_id_and_get_by_id_finds_it() {
            let repository = PatientInfoRepository::new();
            let id = repository.add(new_patient()).unwrap();

            assert!(Uuid::parse_str(&id).is_ok());
            let stored = repository.get_by_id(&id).unwrap().unwrap();
            assert_eq!(stored.id, id);
            assert_eq!(stored.name, "Ivan");
        }

        #[test]
        fn test_add_rejects_invalid_patient() {
            let repository = PatientInfoRepository::new();
            let invalid = NewPatient {
                surname: String::new(),
                ..new_patient()
            };

            let result = repository.add(invalid);
            assert!(matches!(result, Err(RepositoryError::Validation(msg)) if msg.contains("surname")));
        }

        #[test]
        fn test_get_by_id_unknown_is_none() {
            let repository = PatientInfoRepository::new();
            assert!(repository.get_by_id("missing").unwrap().is_none());
        }

        #[test]
        fn test_update_and_remove() {
            let repository = PatientInfoRepository::new();
            let id = repository.add(new_patient()).unwrap();

            let mut patient = repository.get_by_id(&id).unwrap().unwrap();
            patient.health_info.blood_pressure = BloodPressure { high: 130, low: 85 };
            repository.update(patient.clone()).unwrap();
            assert_eq!(repository.get_by_id(&id).unwrap().unwrap(), patient);

            let removed = repository.remove(&id).unwrap();
            assert_eq!(removed.id, id);
            assert!(repository.get_by_id(&id).unwrap().is_none());
            assert!(matches!(repository.remove(&id), Err(RepositoryError::NotFound(_))));
        }

        #[test]
        fn test_update_unknown_patient_is_not_found() {
            let repository = PatientInfoRepository::new();
            let ghost = new_patient().into_patient("ghost".to_string());
            assert!(matches!(repository.update(ghost), Err(RepositoryError::NotFound(id)) if id == "ghost"));
        }

        #[test]
        fn test_mock_counts_lookups() {
            let patient = new_patient().into_patient("123".to_string());
            let mock = MockPatientInfoRepository::with_patients(vec![patient]);

            assert!(mock.get_by_id("123").unwrap().is_some());
            assert!(mock.get_by_id("456").unwrap().is_none());
            assert_eq!(mock.lookup_count(), 2);
        }
    }
}
