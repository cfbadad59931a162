pub mod alert;
pub mod medical;
pub mod rules;

// Domain services
// This module contains the evaluation logic and its collaborator contracts.

// Re-export service traits and implementations
pub use alert::{AlertError, ConsoleAlertService, SendAlertService};
pub use medical::{alert_message, MedicalService, MedicalServiceError, MedicalServiceTrait};
