// File: src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::ListStorage;
use crate::store::InsertPosition;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use strum::EnumIter;

fn default_true() -> bool {
    true
}

/// Persisted as `"dark"` / `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum AppTheme {
    #[default]
    Dark,
    Light,
}

impl AppTheme {
    pub fn toggled(self) -> Self {
        match self {
            AppTheme::Dark => AppTheme::Light,
            AppTheme::Light => AppTheme::Dark,
        }
    }
}

impl fmt::Display for AppTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppTheme::Dark => write!(f, "dark"),
            AppTheme::Light => write!(f, "light"),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub theme: AppTheme,
    /// Which end of the list new tasks land on.
    #[serde(default)]
    pub insert: InsertPosition,
    #[serde(default = "default_true")]
    pub strikethrough_completed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: AppTheme::default(),
            insert: InsertPosition::default(),
            // Match the serde defaults
            strikethrough_completed: true,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers can fall back to
        // defaults without swallowing real errors.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Whether an error from `load` means the file simply does not
    /// exist (fresh start) rather than a syntax or permission problem.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }
        false
    }

    /// Save configuration using an explicit context. Written on every
    /// theme toggle, so the same locked atomic write as task storage.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        ListStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            ListStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_theme_round_trip_uses_lowercase_strings() {
        let ctx = TestContext::new();
        let cfg = Config {
            theme: AppTheme::Light,
            ..Default::default()
        };
        cfg.save(&ctx).unwrap();

        let raw = fs::read_to_string(ctx.get_config_file_path().unwrap()).unwrap();
        assert!(raw.contains("theme = \"light\""));

        let loaded = Config::load(&ctx).unwrap();
        assert_eq!(loaded.theme, AppTheme::Light);
    }

    #[test]
    fn test_missing_config_is_detectable() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_toggled_is_involution() {
        assert_eq!(AppTheme::Dark.toggled(), AppTheme::Light);
        assert_eq!(AppTheme::Dark.toggled().toggled(), AppTheme::Dark);
    }
}
