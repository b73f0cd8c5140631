//! Error handling primitives shared across the core.
//!
//! Request-path failures collapse into two kinds, [`SurvivalError::ModelUnavailable`]
//! and [`SurvivalError::PredictionFailed`]. The remaining variants only occur
//! while training or configuring the offline pipeline.

use std::path::PathBuf;

/// Stable error codes that cross the FFI boundary.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// Model, scaler or feature-order artifact could not be loaded.
    ModelUnavailable = 1,
    /// Building, scaling or scoring a specific input failed.
    PredictionFailed = 2,
    /// Input failed validation.
    InvalidInput = 3,
    /// Training dataset could not be read or was unusable.
    Dataset = 4,
    /// Fitting the scaler or classifier failed.
    Training = 5,
    /// Filesystem failure outside of artifact loading.
    Io = 6,
    /// Catch-all for bugs and configuration problems.
    Internal = 7,
}

/// Canonical error type for the core.
#[derive(Debug, thiserror::Error)]
pub enum SurvivalError {
    /// Artifacts are missing or corrupt; terminal for the current request.
    #[error("model unavailable: {reason}")]
    ModelUnavailable { reason: String },
    /// A single input could not be turned into a prediction.
    #[error("prediction failed: {message}")]
    PredictionFailed { message: String },
    /// Input rejected before it reached the pipeline.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("dataset {path}: {reason}")]
    Dataset { path: PathBuf, reason: String },
    #[error("training failed: {0}")]
    Training(String),
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type SurvivalResult<T> = Result<T, SurvivalError>;

impl SurvivalError {
    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            reason: reason.into(),
        }
    }

    pub fn prediction_failed(message: impl Into<String>) -> Self {
        Self::PredictionFailed {
            message: message.into(),
        }
    }

    pub fn dataset(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Dataset {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Machine parsable code for the variant.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ModelUnavailable { .. } => ErrorCode::ModelUnavailable,
            Self::PredictionFailed { .. } => ErrorCode::PredictionFailed,
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::Dataset { .. } => ErrorCode::Dataset,
            Self::Training(_) => ErrorCode::Training,
            Self::Io { .. } => ErrorCode::Io,
            Self::Config(_) => ErrorCode::Internal,
        }
    }

    /// Text shown to the end user next to the re-rendered form.
    pub fn user_message(&self) -> String {
        match self {
            Self::ModelUnavailable { .. } => "Model unavailable".to_string(),
            Self::PredictionFailed { message } => format!("Prediction error: {message}"),
            Self::InvalidInput(_) => "Please correct the errors".to_string(),
            other => other.to_string(),
        }
    }
}
