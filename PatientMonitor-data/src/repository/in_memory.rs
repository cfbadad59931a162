use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::warn;

use super::errors::RepositoryError;
use crate::models::patient::PatientInfo;

/// In-memory storage for patient records, keyed by patient id
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    patients: Arc<Mutex<HashMap<String, PatientInfo>>>,
}

impl InMemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-filled with the given records.
    /// A repeated id keeps the last record.
    pub fn with_patients(patients: Vec<PatientInfo>) -> Self {
        let mut map = HashMap::with_capacity(patients.len());
        for patient in patients {
            if map.contains_key(&patient.id) {
                warn!("Duplicate patient id {}, keeping the last record", patient.id);
            }
            map.insert(patient.id.clone(), patient);
        }

        Self {
            patients: Arc::new(Mutex::new(map)),
        }
    }

    /// Store a record, overwriting any record with the same id
    pub fn insert(&self, patient: PatientInfo) -> Result<(), RepositoryError> {
        let mut store = self.patients.lock()?;
        store.insert(patient.id.clone(), patient);
        Ok(())
    }

    /// Get a record by id
    pub fn get(&self, id: &str) -> Result<Option<PatientInfo>, RepositoryError> {
        let store = self.patients.lock()?;
        Ok(store.get(id).cloned())
    }

    /// Replace an existing record
    pub fn replace(&self, patient: PatientInfo) -> Result<PatientInfo, RepositoryError> {
        let mut store = self.patients.lock()?;
        match store.get_mut(&patient.id) {
            Some(existing) => {
                *existing = patient.clone();
                Ok(patient)
            }
            None => Err(RepositoryError::NotFound(patient.id)),
        }
    }

    /// Remove a record and hand it back
    pub fn remove(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        let mut store = self.patients.lock()?;
        store
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    /// All records ordered by id
    pub fn snapshot(&self) -> Result<Vec<PatientInfo>, RepositoryError> {
        let store = self.patients.lock()?;
        let mut patients: Vec<PatientInfo> = store.values().cloned().collect();
        patients.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(patients)
    }
}
