use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;

use crate::{
    core::{ExpenseManager, PathResolver},
    errors::CliError,
};

use super::{commands, registry::CommandRegistry, system_clock::SystemClock};

/// Set to any value to read commands from stdin without line editing.
pub const SCRIPT_ENV: &str = "EXPENSE_TRACKER_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: ExpenseManager,
    pub export_dir: PathBuf,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Opens the ledger and settings in the resolved data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let paths = PathResolver::from_env();
        tracing::info!(dir = %paths.base_dir().display(), "using data directory");
        let manager = ExpenseManager::open(&paths, Box::new(SystemClock))?;
        Ok(Self::with_manager(mode, manager, paths.export_dir()))
    }

    pub fn with_manager(mode: CliMode, manager: ExpenseManager, export_dir: PathBuf) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            manager,
            export_dir,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        "expenses> ".to_string()
    }
}
