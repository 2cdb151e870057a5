use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{ConfigError, Settings};

/// File name used when settings live in a data directory.
pub const DEFAULT_SETTINGS_FILE: &str = "expense_settings.json";
const TMP_SUFFIX: &str = "tmp";

/// Reads and writes the [`Settings`] document at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    pub fn new(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    /// Loads the document, writing the default one first when the file is absent.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.settings_path.exists() {
            let settings = Settings::default();
            self.save(&settings)?;
            tracing::info!(path = %self.settings_path.display(), "created default settings");
            return Ok(settings);
        }
        let data = fs::read_to_string(&self.settings_path)?;
        let settings: Settings =
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?;
        tracing::info!(
            path = %self.settings_path.display(),
            categories = settings.categories.len(),
            budgets = settings.budgets.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.settings_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.settings_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.settings_path)?;
        tracing::debug!(path = %self.settings_path.display(), "saved settings");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
