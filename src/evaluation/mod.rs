//! Evaluation: holdout metrics and historical survival statistics.

pub mod domain;
pub mod service;

pub use domain::{ClassMetrics, ConfusionMatrix, EvalReport, GroupRate, SurvivalStats};
