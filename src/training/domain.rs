//! Domain types for model training and the frozen artifacts it produces.

use serde::{Deserialize, Serialize};

use crate::common::error::{SurvivalError, SurvivalResult};
use crate::features::{StandardScaler, FEATURE_COUNT, FEATURE_NAMES};

/// Hyper-parameters of one training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Seed for the train/holdout permutation.
    pub seed: u64,
    /// Share of rows held out for evaluation.
    pub test_fraction: f64,
    pub max_iter: usize,
    /// Stop once every gradient component is below this.
    pub tol: f64,
    /// Inverse L2 regularisation strength.
    pub c: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
            max_iter: 1000,
            tol: 1e-4,
            c: 1.0,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> SurvivalResult<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(SurvivalError::Config(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.max_iter == 0 {
            return Err(SurvivalError::Config("max_iter must be positive".into()));
        }
        if !(self.tol > 0.0) || !(self.c > 0.0) {
            return Err(SurvivalError::Config(format!(
                "tol and c must be positive, got tol={} c={}",
                self.tol, self.c
            )));
        }
        Ok(())
    }
}

/// Output of a single scoring call: hard label and `[P(0), P(1)]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Score {
    pub label: u8,
    pub proba: [f64; 2],
}

/// Frozen binary logistic-regression parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub bias: f64,
    /// Solver iterations used during fitting; informational.
    #[serde(default)]
    pub n_iter: usize,
}

impl LogisticModel {
    /// Raw margin `w·x + b`.
    pub fn decision(&self, scaled: &[f64]) -> SurvivalResult<f64> {
        if scaled.len() != self.weights.len() {
            return Err(SurvivalError::prediction_failed(format!(
                "model expects {} features, input has {}",
                self.weights.len(),
                scaled.len()
            )));
        }
        let z = self
            .weights
            .iter()
            .zip(scaled)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        if !z.is_finite() {
            return Err(SurvivalError::prediction_failed("model score is not finite"));
        }
        Ok(z)
    }

    /// Label and class probabilities computed from one margin.
    pub fn score(&self, scaled: &[f64]) -> SurvivalResult<Score> {
        let z = self.decision(scaled)?;
        let p1 = sigmoid(z);
        Ok(Score {
            label: u8::from(z > 0.0),
            proba: [1.0 - p1, p1],
        })
    }

    pub fn predict(&self, scaled: &[f64]) -> SurvivalResult<u8> {
        self.score(scaled).map(|s| s.label)
    }

    pub fn predict_proba(&self, scaled: &[f64]) -> SurvivalResult<[f64; 2]> {
        self.score(scaled).map(|s| s.proba)
    }
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Column ordering record written next to the model. Documentation only;
/// inference reads it but does not re-check it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureOrder {
    pub features: Vec<String>,
    pub feature_order: Vec<String>,
    #[serde(default)]
    pub trained_at_ms: u64,
    #[serde(default)]
    pub dataset_fingerprint: String,
    #[serde(default)]
    pub train_rows: usize,
    #[serde(default)]
    pub test_rows: usize,
    #[serde(default)]
    pub holdout_accuracy: f64,
}

impl Default for FeatureOrder {
    fn default() -> Self {
        let names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        Self {
            features: names.clone(),
            feature_order: names,
            trained_at_ms: 0,
            dataset_fingerprint: String::new(),
            train_rows: 0,
            test_rows: 0,
            holdout_accuracy: 0.0,
        }
    }
}

/// The three frozen artifacts consumed at inference time.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifacts {
    pub model: LogisticModel,
    pub scaler: StandardScaler,
    pub feature_order: FeatureOrder,
}

/// Repository contract for the artifact triple.
pub trait ArtifactRepo {
    fn save(&self, artifacts: &Artifacts) -> SurvivalResult<()>;
    /// Any read or decode failure surfaces as `ModelUnavailable`.
    fn load(&self) -> SurvivalResult<Artifacts>;
}

/// Anything that can fit a classifier on a scaled design matrix.
pub trait Trainer {
    fn fit(&self, x: &[[f64; FEATURE_COUNT]], y: &[u8]) -> SurvivalResult<LogisticModel>;
}
