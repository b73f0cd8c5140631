//! Turns labelled passenger rows into the numeric design matrix.
//!
//! Missing ages are filled with the median of the whole loaded file, before
//! any split. The holdout therefore leaks into the imputed value; kept as is so
//! retrained artifacts stay comparable with earlier ones.

use crate::common::error::{SurvivalError, SurvivalResult};
use crate::features::FeatureVector;

use super::domain::{Dataset, EncodedDataset};

/// Median of `values`; `None` when empty. NaNs must be filtered by the caller.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

/// Median over all present, finite ages.
pub fn age_median(dataset: &Dataset) -> SurvivalResult<f64> {
    let ages: Vec<f64> = dataset
        .records
        .iter()
        .filter_map(|r| r.age)
        .filter(|a| a.is_finite())
        .collect();
    median(&ages).ok_or_else(|| SurvivalError::dataset(&dataset.source, "no usable Age values"))
}

/// Impute, encode and collect labels.
pub fn encode(dataset: &Dataset) -> SurvivalResult<EncodedDataset> {
    let imputed_age = age_median(dataset)?;
    let mut features = Vec::with_capacity(dataset.len());
    let mut labels = Vec::with_capacity(dataset.len());
    let mut imputed_rows = 0;

    for (idx, record) in dataset.records.iter().enumerate() {
        if record.survived > 1 {
            return Err(SurvivalError::dataset(
                &dataset.source,
                format!("record {idx}: Survived must be 0 or 1, got {}", record.survived),
            ));
        }
        let age = match record.age {
            Some(age) if age.is_finite() => age,
            _ => {
                imputed_rows += 1;
                imputed_age
            }
        };
        let embarked = record.embarked.as_deref().unwrap_or_default();
        let vector = FeatureVector::from_values(record.pclass, &record.sex, age, embarked);
        features.push(vector.0);
        labels.push(record.survived);
    }

    tracing::debug!(imputed_age, imputed_rows, "encoded dataset");
    Ok(EncodedDataset {
        features,
        labels,
        imputed_age,
        imputed_rows,
    })
}
