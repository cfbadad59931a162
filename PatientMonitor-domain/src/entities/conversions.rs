//! Conversion functions between domain entities and data models.
//! Named convert_to_[target_layer]_[model_name].

use patient_monitor_data::models::patient as data;

use crate::entities::patient::{BloodPressure, HealthInfo, PatientInfo};

fn convert_to_domain_blood_pressure(data_pressure: data::BloodPressure) -> BloodPressure {
    BloodPressure {
        high: data_pressure.high,
        low: data_pressure.low,
    }
}

fn convert_to_data_blood_pressure(pressure: &BloodPressure) -> data::BloodPressure {
    data::BloodPressure {
        high: pressure.high,
        low: pressure.low,
    }
}

/// Convert from data model to domain entity for health info
pub fn convert_to_domain_health_info(data_info: data::HealthInfo) -> HealthInfo {
    HealthInfo {
        normal_temperature: data_info.normal_temperature,
        blood_pressure: convert_to_domain_blood_pressure(data_info.blood_pressure),
    }
}

/// Convert from domain entity to data model for health info
pub fn convert_to_data_health_info(info: &HealthInfo) -> data::HealthInfo {
    data::HealthInfo {
        normal_temperature: info.normal_temperature,
        blood_pressure: convert_to_data_blood_pressure(&info.blood_pressure),
    }
}

/// Convert from data model to domain entity for a patient record
pub fn convert_to_domain_patient(data_patient: data::PatientInfo) -> PatientInfo {
    PatientInfo {
        id: data_patient.id,
        name: data_patient.name,
        surname: data_patient.surname,
        birthday: data_patient.birthday,
        health_info: convert_to_domain_health_info(data_patient.health_info),
    }
}
