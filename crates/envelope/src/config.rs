use crate::status;
use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

/// Environment variable naming a JSON file with factory defaults.
pub const CONFIG_ENV_VAR: &str = "RESULT_ENVELOPE_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    ConfigFileNotFound { path: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("JSON parsing failed: {message}")]
    JsonParsingFailed { message: String },

    #[error("Environment variable {name} is not valid unicode")]
    InvalidEnvVar { name: String },
}

/// Default codes and diagnostics policy applied by an
/// [`EnvelopeFactory`](crate::EnvelopeFactory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EnvelopeConfig {
    pub success_code: i32,
    pub error_code: i32,
    pub validation_code: i32,
    pub capture_stack_trace: bool,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            success_code: status::OK,
            error_code: status::INTERNAL_SERVER_ERROR,
            validation_code: status::BAD_REQUEST,
            capture_stack_trace: true,
        }
    }
}

impl EnvelopeConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::JsonParsingFailed {
            message: e.to_string(),
        })
    }

    #[instrument]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigFileNotFound {
                path: path.display().to_string(),
            });
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;

        let config = Self::from_json_str(&raw)?;
        debug!(?config, "Loaded envelope config");
        Ok(config)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or returns the defaults
    /// when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load(Path::new(&path)),
            Err(VarError::NotPresent) => {
                debug!("{} not set, using default envelope config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
            Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvVar {
                name: CONFIG_ENV_VAR.to_string(),
            }),
        }
    }

    pub fn with_success_code(mut self, code: impl status::IntoStatusCode) -> Self {
        self.success_code = code.into_status_code();
        self
    }

    pub fn with_error_code(mut self, code: impl status::IntoStatusCode) -> Self {
        self.error_code = code.into_status_code();
        self
    }

    pub fn with_validation_code(mut self, code: impl status::IntoStatusCode) -> Self {
        self.validation_code = code.into_status_code();
        self
    }

    pub fn with_stack_traces(mut self, capture: bool) -> Self {
        self.capture_stack_trace = capture;
        self
    }
}
