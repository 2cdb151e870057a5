use std::{
    env,
    path::{Path, PathBuf},
};

use exptrack_config::DEFAULT_SETTINGS_FILE;
use exptrack_storage_sqlite::DEFAULT_DB_FILE;

/// Overrides the data directory; defaults to the current working directory.
pub const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";

/// Resolves where the ledger, settings and exports live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// `EXPENSE_TRACKER_HOME` when set and non-empty, otherwise the working directory.
    pub fn from_env() -> Self {
        match env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            Some(custom) => Self::new(custom),
            None => Self::new(env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn database_path(&self) -> PathBuf {
        self.base.join(DEFAULT_DB_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.base.join(DEFAULT_SETTINGS_FILE)
    }

    /// Exports land next to the ledger.
    pub fn export_dir(&self) -> PathBuf {
        self.base.clone()
    }
}
