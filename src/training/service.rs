//! Offline training pipeline: encode, split, scale, fit, evaluate, persist.
//!
//! Holdout accuracy is advisory. A weak model is still written out; the
//! operator reads the report and decides.

use crate::common::error::SurvivalResult;
use crate::common::time;
use crate::data::{service as data_service, DataRepo, Dataset};
use crate::evaluation::{service as eval_service, EvalReport};
use crate::features::{StandardScaler, FEATURE_NAMES};

use super::domain::{ArtifactRepo, Artifacts, FeatureOrder, TrainConfig, Trainer};
use super::logistic::LogisticTrainer;
use super::split::{take, train_test_split};

/// Outcome of a training run.
#[derive(Clone, Debug)]
pub struct TrainReport {
    pub artifacts: Artifacts,
    pub evaluation: EvalReport,
    pub imputed_age: f64,
    pub imputed_rows: usize,
}

/// Fit scaler and classifier on `dataset` without touching the filesystem.
pub fn train(dataset: &Dataset, cfg: &TrainConfig) -> SurvivalResult<TrainReport> {
    cfg.validate()?;
    let span = tracing::info_span!("train", rows = dataset.len(), seed = cfg.seed);
    let _guard = span.enter();

    let encoded = data_service::encode(dataset)?;
    let split = train_test_split(encoded.features.len(), cfg.test_fraction, cfg.seed)?;
    let x_train = take(&encoded.features, &split.train);
    let y_train = take(&encoded.labels, &split.train);
    let x_test = take(&encoded.features, &split.test);
    let y_test = take(&encoded.labels, &split.test);

    let scaler = StandardScaler::fit(&x_train)?;
    let x_train_scaled = scaler.transform_rows(&x_train)?;
    let x_test_scaled = scaler.transform_rows(&x_test)?;

    let model = LogisticTrainer::from_config(cfg).fit(&x_train_scaled, &y_train)?;
    let evaluation = eval_service::evaluate(&model, &x_test_scaled, &y_test)?;

    let names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
    let feature_order = FeatureOrder {
        features: names.clone(),
        feature_order: names,
        trained_at_ms: u64::try_from(time::now_ms()).unwrap_or(u64::MAX),
        dataset_fingerprint: dataset.fingerprint.clone(),
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        holdout_accuracy: evaluation.accuracy,
    };

    tracing::info!(
        train_rows = split.train.len(),
        test_rows = split.test.len(),
        imputed_age = encoded.imputed_age,
        accuracy = evaluation.accuracy,
        "training finished"
    );

    Ok(TrainReport {
        artifacts: Artifacts {
            model,
            scaler,
            feature_order,
        },
        evaluation,
        imputed_age: encoded.imputed_age,
        imputed_rows: encoded.imputed_rows,
    })
}

/// Load the dataset from `data`, train, and write the artifacts to `out`.
pub fn train_and_save(
    data: &dyn DataRepo,
    out: &dyn ArtifactRepo,
    cfg: &TrainConfig,
) -> SurvivalResult<TrainReport> {
    let dataset = data.load()?;
    let report = train(&dataset, cfg)?;
    out.save(&report.artifacts)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::SurvivalError;
    use crate::data::PassengerRecord;
    use std::path::PathBuf;

    fn dataset(n: usize) -> Dataset {
        let records = (0..n)
            .map(|i| {
                let female = i % 2 == 0;
                let pclass = (i % 3) as i64 + 1;
                PassengerRecord {
                    survived: u8::from(female || pclass == 1),
                    pclass,
                    sex: if female { "female" } else { "male" }.to_string(),
                    age: if i % 7 == 0 { None } else { Some(10.0 + (i % 50) as f64) },
                    embarked: Some(["C", "Q", "S"][i % 3].to_string()),
                }
            })
            .collect();
        Dataset {
            source: PathBuf::from("mem.csv"),
            fingerprint: "feedfacecafebeef".into(),
            records,
        }
    }

    #[test]
    fn training_is_reproducible_for_a_seed() {
        let ds = dataset(120);
        let a = train(&ds, &TrainConfig::default()).unwrap();
        let b = train(&ds, &TrainConfig::default()).unwrap();
        assert_eq!(a.artifacts.model, b.artifacts.model);
        assert_eq!(a.artifacts.scaler, b.artifacts.scaler);
    }

    #[test]
    fn metadata_records_split_sizes_and_order() {
        let report = train(&dataset(120), &TrainConfig::default()).unwrap();
        let meta = &report.artifacts.feature_order;
        assert_eq!(meta.test_rows, 24);
        assert_eq!(meta.train_rows, 96);
        assert_eq!(meta.feature_order, FEATURE_NAMES);
        assert_eq!(meta.dataset_fingerprint, "feedfacecafebeef");
        assert_eq!(report.imputed_rows, 18);
    }

    #[test]
    fn learns_the_rule_behind_the_labels() {
        let report = train(&dataset(300), &TrainConfig::default()).unwrap();
        assert!(report.evaluation.accuracy > 0.8, "{}", report.evaluation.accuracy);
        // Sex is encoded male = 1, so its weight must pull toward death.
        let w = &report.artifacts.model.weights;
        assert!(w[1] < 0.0, "{w:?}");
    }

    #[test]
    fn invalid_config_is_rejected_before_fitting() {
        let cfg = TrainConfig {
            max_iter: 0,
            ..TrainConfig::default()
        };
        assert!(matches!(
            train(&dataset(50), &cfg),
            Err(SurvivalError::Config(_))
        ));
    }
}
