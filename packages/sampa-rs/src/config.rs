//! Filter run configuration
//!
//! Loaded from JSON; missing fields fall back to defaults. Lookup order for
//! [`FilterConfig::load`]: explicit path, `$SAMPA_CONFIG`, then
//! `<config_dir>/sampa/bc3.json` when it exists.

use crate::error::Result;
use crate::types::FilterParameters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "SAMPA_CONFIG";

const CONFIG_DIR_NAME: &str = "sampa";
const CONFIG_FILE_NAME: &str = "bc3.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_slope_down")]
    pub slope_down: f64,

    #[serde(default = "default_slope_up")]
    pub slope_up: f64,

    #[serde(default = "default_round")]
    pub round: f64,

    /// Samples evaluated per window (default: whole window)
    #[serde(default)]
    pub npoints: Option<usize>,

    /// Apply baseline correction and return corrected samples
    #[serde(default)]
    pub condition: bool,

    /// Zero-suppression threshold applied after conditioning
    #[serde(default)]
    pub zero_suppression: Option<f64>,
}

fn default_slope_down() -> f64 {
    FilterParameters::default().slope_down
}
fn default_slope_up() -> f64 {
    FilterParameters::default().slope_up
}
fn default_round() -> f64 {
    FilterParameters::default().round
}

impl Default for FilterConfig {
    fn default() -> Self {
        let params = FilterParameters::default();
        Self {
            slope_down: params.slope_down,
            slope_up: params.slope_up,
            round: params.round,
            npoints: None,
            condition: false,
            zero_suppression: None,
        }
    }
}

impl FilterConfig {
    /// Validated filter parameters
    pub fn parameters(&self) -> Result<FilterParameters> {
        FilterParameters::new(self.slope_down, self.slope_up, self.round)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.parameters()?;
        log::debug!("Loaded filter config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Resolve and load a config file, or fall back to defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_json_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_json_file(PathBuf::from(path));
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_json_file(path),
            _ => Ok(Self::default()),
        }
    }
}

/// `<config_dir>/sampa/bc3.json`, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
