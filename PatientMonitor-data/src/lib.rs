// PatientMonitor Data
// This crate handles patient storage and repository access

// Storage configuration
pub mod config;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
