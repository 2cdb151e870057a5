use std::{io, result::Result as StdResult};

use exptrack_config::ConfigError;
use exptrack_core::CoreError;
use exptrack_domain::DateWindowError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Unified error type for the ledger, settings and export layers.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = StdResult<T, TrackerError>;

impl From<DateWindowError> for TrackerError {
    fn from(err: DateWindowError) -> Self {
        TrackerError::Core(CoreError::from(err))
    }
}

/// User-facing shell error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Tracker(TrackerError::Io(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Tracker(TrackerError::Core(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Tracker(TrackerError::Config(err))
    }
}
