// PatientMonitor Domain
// This crate contains the vital-sign evaluation logic

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Testing utilities - available in unit tests and with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
