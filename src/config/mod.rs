//! Process-wide settings and their persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::BudgetError;
use crate::utils::{app_data_dir, ensure_dir, settings_file_in};

/// Defaults used to seed any newly created month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub default_salary: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_salary: 1300.0,
        }
    }
}

/// Loads and saves [`Settings`] as a JSON file in the app data directory.
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new() -> Result<Self, BudgetError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, BudgetError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, BudgetError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: settings_file_in(&base),
        })
    }

    /// Missing file means first use; defaults apply.
    pub fn load(&self) -> Result<Settings, BudgetError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), BudgetError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_defaults_when_file_is_missing() {
        let temp = TempDir::new().unwrap();
        let manager = SettingsManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let settings = manager.load().unwrap();
        assert_eq!(settings.default_salary, 1300.0);
    }

    #[test]
    fn save_and_reload_round_trips() {
        let temp = TempDir::new().unwrap();
        let manager = SettingsManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let settings = Settings {
            default_salary: 2100.0,
        };
        manager.save(&settings).unwrap();
        assert_eq!(manager.load().unwrap(), settings);
    }
}
