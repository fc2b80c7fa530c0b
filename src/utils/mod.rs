use std::path::{Path, PathBuf};
use std::sync::Once;
use std::{env, fs};

use crate::core::errors::BudgetError;

const DEFAULT_DIR_NAME: &str = ".tracky";
const MONTHS_DIR: &str = "months";
const SETTINGS_FILE: &str = "settings.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("tracky_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.tracky`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("TRACKY_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding one JSON file per month key.
pub fn months_dir_in(base: &Path) -> PathBuf {
    base.join(MONTHS_DIR)
}

/// Path to the process-wide settings file.
pub fn settings_file_in(base: &Path) -> PathBuf {
    base.join(SETTINGS_FILE)
}

pub fn ensure_dir(path: &Path) -> Result<(), BudgetError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
