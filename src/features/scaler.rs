//! Per-feature standardisation learned on the training partition.

use serde::{Deserialize, Serialize};

use crate::common::error::{SurvivalError, SurvivalResult};

use super::domain::{FeatureVector, FEATURE_COUNT};

/// Frozen `(mean, std)` pairs, one per column, in fitting order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    /// Population standard deviation; constant columns store 1.0.
    pub scale: Vec<f64>,
}

/// Feature vector after standardisation. Same order as the input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaledFeatures(pub [f64; FEATURE_COUNT]);

impl StandardScaler {
    /// Fit column statistics over `rows`.
    pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> SurvivalResult<Self> {
        if rows.is_empty() {
            return Err(SurvivalError::Training(
                "cannot fit scaler on an empty partition".into(),
            ));
        }
        let n = rows.len() as f64;
        let mut mean = vec![0.0; FEATURE_COUNT];
        for row in rows {
            for (acc, value) in mean.iter_mut().zip(row) {
                *acc += value;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut scale = vec![0.0; FEATURE_COUNT];
        for row in rows {
            for ((acc, value), m) in scale.iter_mut().zip(row).zip(&mean) {
                *acc += (value - m).powi(2);
            }
        }
        for s in scale.iter_mut() {
            let std = (*s / n).sqrt();
            *s = if std > f64::EPSILON { std } else { 1.0 };
        }

        if mean.iter().chain(&scale).any(|v| !v.is_finite()) {
            return Err(SurvivalError::Training(
                "scaler statistics are not finite".into(),
            ));
        }
        Ok(Self { mean, scale })
    }

    /// `scaled[i] = (feature[i] - mean[i]) / scale[i]`.
    pub fn transform(&self, features: &FeatureVector) -> SurvivalResult<ScaledFeatures> {
        self.transform_row(&features.0).map(ScaledFeatures)
    }

    pub fn transform_row(&self, row: &[f64; FEATURE_COUNT]) -> SurvivalResult<[f64; FEATURE_COUNT]> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(SurvivalError::prediction_failed(format!(
                "scaler expects {} features, input has {FEATURE_COUNT}",
                self.mean.len().max(self.scale.len())
            )));
        }
        let mut out = [0.0; FEATURE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = (row[i] - self.mean[i]) / self.scale[i];
        }
        Ok(out)
    }

    pub fn transform_rows(
        &self,
        rows: &[[f64; FEATURE_COUNT]],
    ) -> SurvivalResult<Vec<[f64; FEATURE_COUNT]>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
