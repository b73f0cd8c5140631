//! Runtime configuration loaded from the process environment.

use std::env;
use std::path::PathBuf;

pub const MODEL_DIR_ENV: &str = "TITANIC_MODEL_DIR";
pub const DATA_PATH_ENV: &str = "TITANIC_DATA_PATH";
pub const LOG_ENV: &str = "TITANIC_LOG";
pub const LOG_FORMAT_ENV: &str = "TITANIC_LOG_FORMAT";

/// Output shape of log lines.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Snapshot of configuration values consumed by the core.
#[derive(Clone, Debug)]
pub struct AppCfg {
    /// Directory holding the model, scaler and feature-order artifacts.
    pub model_dir: PathBuf,
    /// Labelled CSV consumed by the offline trainer.
    pub data_path: PathBuf,
    /// `EnvFilter` directive, e.g. `info` or `titanic_predictor=debug`.
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("./ml_model"),
            data_path: PathBuf::from("./ml_model/train.csv"),
            log_filter: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            model_dir: lookup(MODEL_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            data_path: lookup(DATA_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            log_filter: lookup(LOG_ENV).unwrap_or(defaults.log_filter),
            log_format: lookup(LOG_FORMAT_ENV)
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or(defaults.log_format),
        }
    }
}
