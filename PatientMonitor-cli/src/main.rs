use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use patient_monitor_cli::{execute, Command};
use patient_monitor_data::config::StorageConfig;
use patient_monitor_data::repository::PatientInfoFileRepository;
use patient_monitor_domain::services::ConsoleAlertService;

/// The main entry point for the patient monitor
///
/// Loads `.env`, sets up tracing on stderr, opens the patient file and runs
/// the command given on the command line.
fn main() -> ExitCode {
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(env_filter)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = StorageConfig::from_env();
    let repository = PatientInfoFileRepository::open(&config.patient_data_path)
        .with_context(|| format!("failed to open {}", config.patient_data_path.display()))?;
    info!("Patient repository ready at {}", repository.path().display());

    let stdout = io::stdout();
    execute(command, repository, ConsoleAlertService::new(), &mut stdout.lock())
}
