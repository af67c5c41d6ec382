//! # Settings Module
//!
//! ## Purpose
//! Persistent configuration of the mass balance check: which atom grammar the
//! tokenizer uses, the epsilon and threshold of the scorer, and logging options.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "atom_grammar": "periodic",
//!   "epsilon": 1e-9,
//!   "error_threshold": 0.001,
//!   "log_level": "info",
//!   "log_file": null
//! }
//! ```
//! Missing fields take their default values; a missing file means all defaults.
//!
//! ## Usage Pattern
//! ```rust,no_run
//! use AcidWatch::settings::Settings;
//! use AcidWatch::MassBalance::formula_tokenizer::AtomGrammar;
//!
//! let mut settings = Settings::with_config_file("acidwatch_config.json").unwrap();
//! settings.set_atom_grammar(AtomGrammar::Freeform).unwrap();
//! let scorer = settings.scorer();
//! ```

use crate::MassBalance::balance_scorer::{EPSILON, ERROR_THRESHOLD, MassBalanceScorer};
use crate::MassBalance::formula_tokenizer::AtomGrammar;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "acidwatch_config.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file format: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Serializable configuration stored in acidwatch_config.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub atom_grammar: AtomGrammar,
    pub epsilon: f64,
    pub error_threshold: f64,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            atom_grammar: AtomGrammar::Periodic,
            epsilon: EPSILON,
            error_threshold: ERROR_THRESHOLD,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl BalanceConfig {
    /// Checks every field, the first invalid one is reported.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_positive("epsilon", self.epsilon)?;
        check_positive("error_threshold", self.error_threshold)?;
        parse_level(&self.log_level)?;
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidValue {
            name,
            value: value.to_string(),
        })
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, SettingsError> {
    level.parse().map_err(|_| SettingsError::InvalidValue {
        name: "log_level",
        value: level.to_string(),
    })
}

/// Configuration together with the file it is persisted in.
/// Every setter validates the new value and saves the file.
#[derive(Debug, Clone)]
pub struct Settings {
    config: BalanceConfig,
    config_file: PathBuf,
}

impl Settings {
    /// Loads acidwatch_config.json from the current directory. An unreadable or
    /// invalid file is reported and replaced by the defaults.
    pub fn new() -> Self {
        match Self::with_config_file(DEFAULT_CONFIG_FILE) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{}, using default settings", e);
                Self {
                    config: BalanceConfig::default(),
                    config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
                }
            }
        }
    }

    pub fn with_config_file(config_file: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let config_file = config_file.as_ref().to_path_buf();
        let config = Self::load_config(&config_file)?;
        Ok(Self {
            config,
            config_file,
        })
    }

    fn load_config(config_file: &Path) -> Result<BalanceConfig, SettingsError> {
        if !config_file.exists() {
            return Ok(BalanceConfig::default());
        }
        let content = fs::read_to_string(config_file)?;
        let config: BalanceConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("settings loaded from {}", config_file.display());
        Ok(config)
    }

    pub fn save_config(&self) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Applies `update` to a copy of the config and keeps it only if it validates and saves.
    fn update(&mut self, update: impl FnOnce(&mut BalanceConfig)) -> Result<(), SettingsError> {
        let previous = self.config.clone();
        update(&mut self.config);
        if let Err(e) = self.config.validate().and_then(|_| self.save_config()) {
            self.config = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn set_atom_grammar(&mut self, atom_grammar: AtomGrammar) -> Result<(), SettingsError> {
        self.update(|config| config.atom_grammar = atom_grammar)
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<(), SettingsError> {
        self.update(|config| config.epsilon = epsilon)
    }

    pub fn set_error_threshold(&mut self, error_threshold: f64) -> Result<(), SettingsError> {
        self.update(|config| config.error_threshold = error_threshold)
    }

    pub fn set_log_level(&mut self, log_level: &str) -> Result<(), SettingsError> {
        self.update(|config| config.log_level = log_level.trim().to_lowercase())
    }

    pub fn set_log_file(&mut self, log_file: Option<String>) -> Result<(), SettingsError> {
        self.update(|config| config.log_file = log_file)
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.update(|config| *config = BalanceConfig::default())
    }

    pub fn level_filter(&self) -> LevelFilter {
        // the level is validated on load and on every update
        parse_level(&self.config.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Scorer configured from these settings.
    pub fn scorer(&self) -> MassBalanceScorer {
        MassBalanceScorer::new(
            self.config.atom_grammar,
            self.config.epsilon,
            self.config.error_threshold,
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::with_config_file(dir.path().join("absent.json")).unwrap();
        assert_eq!(settings.config(), &BalanceConfig::default());
        assert_eq!(settings.scorer(), MassBalanceScorer::default());
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_setters_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut settings = Settings::with_config_file(&path).unwrap();
        settings.set_atom_grammar(AtomGrammar::Freeform).unwrap();
        settings.set_epsilon(1e-36).unwrap();
        settings.set_log_level("DEBUG").unwrap();

        let reloaded = Settings::with_config_file(&path).unwrap();
        assert_eq!(reloaded.config().atom_grammar, AtomGrammar::Freeform);
        assert_eq!(reloaded.config().epsilon, 1e-36);
        assert_eq!(reloaded.level_filter(), LevelFilter::Debug);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"freeform\""));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut settings = Settings::with_config_file(&path).unwrap();
        assert!(matches!(
            settings.set_error_threshold(0.0),
            Err(SettingsError::InvalidValue { name: "error_threshold", .. })
        ));
        assert!(settings.set_epsilon(f64::NAN).is_err());
        assert!(settings.set_log_level("loud").is_err());
        assert_eq!(settings.config(), &BalanceConfig::default());
        // nothing was written
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_file_and_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"error_threshold": 0.01}"#).unwrap();
        let mut settings = Settings::with_config_file(&path).unwrap();
        assert_eq!(settings.config().error_threshold, 0.01);
        assert_eq!(settings.config().epsilon, EPSILON);

        settings.reset_to_defaults().unwrap();
        let reloaded = Settings::with_config_file(&path).unwrap();
        assert_eq!(reloaded.config(), &BalanceConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"atom_grammar": "runes"}"#).unwrap();
        assert!(matches!(
            Settings::with_config_file(&path),
            Err(SettingsError::Json(_))
        ));
        fs::write(&path, r#"{"epsilon": -1.0}"#).unwrap();
        assert!(matches!(
            Settings::with_config_file(&path),
            Err(SettingsError::InvalidValue { name: "epsilon", .. })
        ));
    }
}
