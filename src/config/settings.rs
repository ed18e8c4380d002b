//! User settings for the barbershop ledger
//!
//! Manages shop preferences: display name, currency symbol, dashboard window
//! and the collaborators the record store is shared with.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Persisted shop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Shop name shown in report headers
    #[serde(default = "default_shop_name")]
    pub shop_name: String,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Length of the owner dashboard's rolling window, in days
    #[serde(default = "default_window_days")]
    pub dashboard_window_days: u32,

    /// E-mail addresses the record store should be shared with
    #[serde(default)]
    pub share_with: Vec<String>,

    /// Number of rows shown by the raw data browsers
    #[serde(default = "default_recent_rows")]
    pub recent_rows: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_shop_name() -> String {
    "Dom Barber Shop".to_string()
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_window_days() -> u32 {
    30
}

fn default_recent_rows() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            shop_name: default_shop_name(),
            currency_symbol: default_currency(),
            dashboard_window_days: default_window_days(),
            share_with: Vec::new(),
            recent_rows: default_recent_rows(),
        }
    }
}

impl Settings {
    /// Collaborator e-mails with surrounding whitespace removed and blanks dropped
    pub fn collaborators(&self) -> Vec<String> {
        self.share_with
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
