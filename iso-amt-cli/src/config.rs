//! Optional TOML configuration for the command-line front end.
//!
//! Layering, lowest to highest precedence: built-in form defaults, this file,
//! command-line flags.
//!
//! ```toml
//! [defaults]
//! tax_year = "2025"
//! filing_status = "MFJ"
//!
//! [logging]
//! level = "debug"
//! file = "iso-amt.log"
//! ```

use std::path::{Path, PathBuf};

use iso_amt_core::{CalculationRequest, FilingStatus, TaxYear};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid default: {0}")]
    InvalidDefault(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

/// Selections used when the command line leaves them out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub tax_year: Option<String>,
    pub filing_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Log records are appended here in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(year) = &self.defaults.tax_year {
            year.parse::<TaxYear>()
                .map_err(|e| ConfigError::InvalidDefault(e.to_string()))?;
        }
        if let Some(status) = &self.defaults.filing_status {
            status
                .parse::<FilingStatus>()
                .map_err(|e| ConfigError::InvalidDefault(e.to_string()))?;
        }
        Ok(())
    }

    /// The calculator form defaults with this file's selections applied.
    pub fn request_defaults(&self) -> CalculationRequest {
        let base = CalculationRequest::default();
        CalculationRequest {
            tax_year: self.defaults.tax_year.clone().unwrap_or(base.tax_year),
            filing_status: self
                .defaults
                .filing_status
                .clone()
                .unwrap_or(base.filing_status),
            ..base
        }
    }
}
