use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::patient::{register, PatientInfoRepositoryTrait};
use crate::models::patient::{NewPatient, PatientInfo};

/// Patient repository persisted as a JSON array in a single file.
///
/// The whole file is read on open and rewritten after each mutation. A
/// mutation reaches memory only once the new file is in place.
#[derive(Debug, Clone)]
pub struct PatientInfoFileRepository {
    path: PathBuf,
    storage: InMemoryStorage,
    // Serialises snapshot-write-apply so concurrent mutations cannot interleave
    write_lock: Arc<Mutex<()>>,
}

impl PatientInfoFileRepository {
    /// Open the repository at `path`. A missing file is treated as empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();

        let patients: Vec<PatientInfo> = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Vec::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No patient file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(RepositoryError::Io(e)),
        };

        let duplicate = {
            let mut seen = HashSet::new();
            patients
                .iter()
                .find(|p| !seen.insert(p.id.as_str()))
                .map(|p| p.id.clone())
        };
        if let Some(id) = duplicate {
            error!("Duplicate patient id {} in {}", id, path.display());
            return Err(RepositoryError::Validation(format!(
                "duplicate patient id {} in {}",
                id,
                path.display()
            )));
        }

        debug!("Loaded {} patients from {}", patients.len(), path.display());

        Ok(Self {
            path,
            storage: InMemoryStorage::with_patients(patients),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file with `patients` through a temp file in the same directory
    fn write_file(&self, patients: &[PatientInfo]) -> Result<(), RepositoryError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut file, patients)?;
        file.flush()?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| RepositoryError::Io(e.error))?;

        debug!("Wrote {} patients to {}", patients.len(), self.path.display());
        Ok(())
    }
}

impl PatientInfoRepositoryTrait for PatientInfoFileRepository {
    fn get_by_id(&self, id: &str) -> Result<Option<PatientInfo>, RepositoryError> {
        debug!("Getting patient by ID from file repository: {}", id);
        self.storage.get(id)
    }

    fn add(&self, patient: NewPatient) -> Result<String, RepositoryError> {
        let patient = register(patient)?;
        let _guard = self.write_lock.lock()?;

        let mut patients = self.storage.snapshot()?;
        patients.push(patient.clone());
        self.write_file(&patients)?;

        let id = patient.id.clone();
        self.storage.insert(patient)?;
        Ok(id)
    }

    fn update(&self, patient: PatientInfo) -> Result<PatientInfo, RepositoryError> {
        let _guard = self.write_lock.lock()?;

        let mut patients = self.storage.snapshot()?;
        let slot = patients
            .iter_mut()
            .find(|p| p.id == patient.id)
            .ok_or_else(|| RepositoryError::NotFound(patient.id.clone()))?;
        *slot = patient.clone();
        self.write_file(&patients)?;

        self.storage.replace(patient)
    }

    fn remove(&self, id: &str) -> Result<PatientInfo, RepositoryError> {
        let _guard = self.write_lock.lock()?;

        let mut patients = self.storage.snapshot()?;
        let position = patients
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        patients.remove(position);
        self.write_file(&patients)?;

        self.storage.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    use super::*;
    use crate::models::patient::{BloodPressure, HealthInfo};

    fn new_patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.to_string(),
            surname: "Petrov".to_string(),
            birthday: NaiveDate::from_ymd_opt(1980, 11, 26).unwrap(),
            health_info: HealthInfo {
                normal_temperature: Decimal::new(3665, 2),
                blood_pressure: BloodPressure { high: 120, low: 80 },
            },
        }
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let repository = PatientInfoFileRepository::open(dir.path().join("patients.json")).unwrap();
        assert!(repository.get_by_id("anything").unwrap().is_none());
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("patients.json");

        let id = {
            let repository = PatientInfoFileRepository::open(&path).unwrap();
            repository.add(new_patient("Ivan")).unwrap()
        };

        let reopened = PatientInfoFileRepository::open(&path).unwrap();
        let patient = reopened.get_by_id(&id).unwrap().unwrap();
        assert_eq!(patient.name, "Ivan");
        assert_eq!(patient.health_info.normal_temperature, Decimal::new(3665, 2));
    }

    #[test]
    fn test_remove_is_persisted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patients.json");

        let repository = PatientInfoFileRepository::open(&path).unwrap();
        let keep = repository.add(new_patient("Ivan")).unwrap();
        let gone = repository.add(new_patient("Semen")).unwrap();
        repository.remove(&gone).unwrap();

        let reopened = PatientInfoFileRepository::open(&path).unwrap();
        assert!(reopened.get_by_id(&keep).unwrap().is_some());
        assert!(reopened.get_by_id(&gone).unwrap().is_none());
    }

    /// Make the parent directory of `path` unusable by swapping it for a plain file
    fn break_parent_dir(path: &Path) {
        let parent = path.parent().unwrap();
        fs::remove_dir_all(parent).unwrap();
        fs::write(parent, "not a directory").unwrap();
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ward").join("patients.json");

        let repository = PatientInfoFileRepository::open(&path).unwrap();
        let id = repository.add(new_patient("Ivan")).unwrap();
        let original = repository.get_by_id(&id).unwrap().unwrap();

        break_parent_dir(&path);

        assert!(matches!(repository.remove(&id), Err(RepositoryError::Io(_))));
        assert_eq!(repository.get_by_id(&id).unwrap(), Some(original.clone()));

        let mut changed = original.clone();
        changed.name = "Semen".to_string();
        assert!(matches!(repository.update(changed), Err(RepositoryError::Io(_))));
        assert_eq!(repository.get_by_id(&id).unwrap(), Some(original));

        let before = repository.storage.snapshot().unwrap().len();
        assert!(repository.add(new_patient("Petr")).is_err());
        assert_eq!(repository.storage.snapshot().unwrap().len(), before);
    }

    #[test]
    fn test_rewrite_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patients.json");

        let repository = PatientInfoFileRepository::open(&path).unwrap();
        let id = repository.add(new_patient("Ivan")).unwrap();
        repository.remove(&id).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[test]
    fn test_open_rejects_duplicate_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patients.json");
        let patient = new_patient("Ivan").into_patient("123".to_string());
        fs::write(&path, serde_json::to_string(&vec![patient.clone(), patient]).unwrap()).unwrap();

        let result = PatientInfoFileRepository::open(&path);
        assert!(matches!(result, Err(RepositoryError::Validation(msg)) if msg.contains("123")));
    }

    #[test]
    fn test_open_malformed_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patients.json");
        fs::write(&path, "{ not json").unwrap();

        let result = PatientInfoFileRepository::open(&path);
        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }
}
