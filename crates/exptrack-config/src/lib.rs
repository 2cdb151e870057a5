//! exptrack-config
//!
//! Persistence of the budget and category settings document.

pub mod error;
pub mod manager;

pub use error::ConfigError;
pub use exptrack_domain::Settings;
pub use manager::{SettingsManager, DEFAULT_SETTINGS_FILE};
