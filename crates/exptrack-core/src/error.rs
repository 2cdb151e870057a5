use exptrack_domain::DateWindowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidSelection(String),
    #[error("Invalid date range: {0}")]
    InvalidWindow(#[from] DateWindowError),
}

pub type CoreResult<T> = Result<T, CoreError>;
