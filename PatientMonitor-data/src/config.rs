//! Storage configuration read from the environment

use std::env;
use std::path::PathBuf;

use tracing::info;

/// Environment variable naming the patient file
pub const PATIENT_DATA_PATH_VAR: &str = "PATIENT_DATA_PATH";

/// Default location of the patient file
pub const DEFAULT_PATIENT_DATA_PATH: &str = "data/patients.json";

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Path to the JSON patient file
    pub patient_data_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            patient_data_path: PathBuf::from(DEFAULT_PATIENT_DATA_PATH),
        }
    }
}

impl StorageConfig {
    /// Create a new storage configuration from environment variables
    pub fn from_env() -> Self {
        let config = Self::from_lookup(|key| env::var(key).ok());
        info!("Using patient file at: {}", config.patient_data_path.display());
        config
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(PATIENT_DATA_PATH_VAR) {
            Some(path) if !path.trim().is_empty() => Self {
                patient_data_path: PathBuf::from(path),
            },
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = StorageConfig::from_lookup(|_| None);
        assert_eq!(config, StorageConfig::default());
        assert_eq!(config.patient_data_path, PathBuf::from("data/patients.json"));
    }

    #[test]
    fn test_reads_path_variable() {
        let config = StorageConfig::from_lookup(|key| {
            (key == PATIENT_DATA_PATH_VAR).then(|| "/tmp/ward.json".to_string())
        });
        assert_eq!(config.patient_data_path, PathBuf::from("/tmp/ward.json"));
    }

    #[test]
    fn test_blank_path_falls_back_to_default() {
        let config = StorageConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, StorageConfig::default());
    }
}
