//! Command-line front end for the patient monitor
//!
//! Parses one command from the process arguments and runs it against a
//! patient repository and an alert service.

use std::io::Write;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use patient_monitor_data::models::patient::NewPatient;
use patient_monitor_data::repository::PatientInfoRepositoryTrait;
use patient_monitor_domain::entities::conversions::convert_to_data_health_info;
use patient_monitor_domain::entities::{BloodPressure, HealthInfo};
use patient_monitor_domain::services::{MedicalService, MedicalServiceTrait, SendAlertService};

pub const USAGE: &str = "\
Usage:
  patient-monitor temperature <patient-id> <temperature>
  patient-monitor pressure <patient-id> <high> <low>
  patient-monitor register <name> <surname> <birthday YYYY-MM-DD> <temperature> <high> <low>";

/// A single monitor invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Evaluate a temperature reading
    Temperature { patient_id: String, temperature: Decimal },
    /// Evaluate a blood pressure reading
    Pressure { patient_id: String, blood_pressure: BloodPressure },
    /// Store a new patient with the given baseline
    Register {
        name: String,
        surname: String,
        birthday: NaiveDate,
        health_info: HealthInfo,
    },
}

fn parse_value<T>(raw: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("invalid {}: {}", what, raw))
}

impl Command {
    /// Parse the arguments that follow the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        match args.as_slice() {
            ["temperature", id, temperature] => Ok(Command::Temperature {
                patient_id: id.to_string(),
                temperature: parse_value(temperature, "temperature")?,
            }),
            ["pressure", id, high, low] => Ok(Command::Pressure {
                patient_id: id.to_string(),
                blood_pressure: BloodPressure::new(
                    parse_value(high, "high pressure")?,
                    parse_value(low, "low pressure")?,
                ),
            }),
            ["register", name, surname, birthday, temperature, high, low] => Ok(Command::Register {
                name: name.to_string(),
                surname: surname.to_string(),
                birthday: NaiveDate::parse_from_str(birthday, "%Y-%m-%d")
                    .with_context(|| format!("invalid birthday: {}", birthday))?,
                health_info: HealthInfo::new(
                    parse_value(temperature, "temperature")?,
                    BloodPressure::new(
                        parse_value(high, "high pressure")?,
                        parse_value(low, "low pressure")?,
                    ),
                ),
            }),
            [] => bail!("missing command\n{}", USAGE),
            [other, ..] => Err(anyhow!("unrecognised arguments for '{}'\n{}", other, USAGE)),
        }
    }
}

/// Run a command. Alerts go to `alert_service`, other output goes to `out`.
pub fn execute<R, A, W>(command: Command, repository: R, alert_service: A, out: &mut W) -> Result<()>
where
    R: PatientInfoRepositoryTrait,
    A: SendAlertService,
    W: Write,
{
    match command {
        Command::Temperature { patient_id, temperature } => {
            let service = MedicalService::new(repository, alert_service);
            service
                .check_temperature(&patient_id, temperature)
                .with_context(|| format!("temperature check failed for patient {}", patient_id))?;
        }
        Command::Pressure { patient_id, blood_pressure } => {
            let service = MedicalService::new(repository, alert_service);
            service
                .check_blood_pressure(&patient_id, blood_pressure)
                .with_context(|| format!("blood pressure check failed for patient {}", patient_id))?;
        }
        Command::Register { name, surname, birthday, health_info } => {
            let id = repository
                .add(NewPatient {
                    name,
                    surname,
                    birthday,
                    health_info: convert_to_data_health_info(&health_info),
                })
                .context("failed to register patient")?;
            info!("Registered patient {}", id);
            writeln!(out, "{}", id)?;
        }
    }

    Ok(())
}
