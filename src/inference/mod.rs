//! Inference domain: the request-time prediction pipeline.
//!
//! Artifacts are immutable once loaded, so a [`Predictor`] can be shared
//! across threads without locking.

pub mod domain;
pub mod service;

pub use domain::{
    DisplayLabels, Example, PredictionResult, Predictor, ReloadingPredictor, SurvivalEngine,
};
pub use service::{predict, predict_with, run_example};
