//! The inference pipeline: encode, scale, score, format.

use crate::common::error::{SurvivalError, SurvivalResult};
use crate::features::{FeatureVector, PassengerInput};
use crate::form::choices;
use crate::training::{ArtifactRepo, Artifacts, Score};

use super::domain::{
    DisplayLabels, Example, PredictionResult, Predictor, ReloadingPredictor, SurvivalEngine,
};

/// Percentage with two decimals.
pub fn to_percent(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

/// Resolve display labels, echoing unknown codes as-is.
pub fn display_labels(input: &PassengerInput) -> DisplayLabels {
    DisplayLabels {
        pclass: choices::pclass_label(&input.pclass)
            .map(str::to_string)
            .unwrap_or_else(|| input.pclass.clone()),
        sex: choices::sex_label(&input.sex)
            .map(str::to_string)
            .unwrap_or_else(|| input.sex.clone()),
        embarked: choices::embarked_label(&input.embarked)
            .map(str::to_string)
            .unwrap_or_else(|| input.embarked.clone()),
    }
}

fn format_result(input: &PassengerInput, score: Score) -> PredictionResult {
    PredictionResult {
        survived: score.label == 1,
        survival_probability: to_percent(score.proba[1]),
        death_probability: to_percent(score.proba[0]),
        age: input.age.trim().to_string(),
        labels: display_labels(input),
        is_example: false,
    }
}

/// Run the pipeline against already-loaded artifacts.
///
/// Class and age are parsed here; sex and port are matched against their
/// codes without validation, so an unknown port encodes as three zeros.
pub fn predict_with(artifacts: &Artifacts, input: &PassengerInput) -> SurvivalResult<PredictionResult> {
    let features = FeatureVector::encode(input)?;
    let scaled = artifacts.scaler.transform(&features)?;
    let score = artifacts.model.score(&scaled.0)?;
    tracing::debug!(features = ?features.0, scaled = ?scaled.0, p_survive = score.proba[1], "scored");
    Ok(format_result(input, score))
}

/// Load the artifacts through `repo`, then predict. Load failures are
/// `ModelUnavailable`; everything after that is `PredictionFailed`.
pub fn predict(repo: &dyn ArtifactRepo, input: &PassengerInput) -> SurvivalResult<PredictionResult> {
    let artifacts = repo.load().inspect_err(|err| {
        tracing::warn!(error = %err, "artifacts unavailable");
    })?;
    predict_with(&artifacts, input)
}

/// Run a canned preset through `engine`.
pub fn run_example(engine: &dyn SurvivalEngine, example: Example) -> SurvivalResult<PredictionResult> {
    let mut result = engine.infer(&example.input())?;
    result.is_example = true;
    tracing::info!(example = example.slug(), survived = result.survived, "example scored");
    Ok(result)
}

fn ensure_prediction_error(err: SurvivalError) -> SurvivalError {
    match err {
        SurvivalError::ModelUnavailable { .. } | SurvivalError::PredictionFailed { .. } => err,
        other => SurvivalError::prediction_failed(other.to_string()),
    }
}

impl SurvivalEngine for Predictor {
    fn infer(&self, input: &PassengerInput) -> SurvivalResult<PredictionResult> {
        predict_with(self.artifacts(), input).map_err(ensure_prediction_error)
    }
}

impl<R: ArtifactRepo> SurvivalEngine for ReloadingPredictor<R> {
    fn infer(&self, input: &PassengerInput) -> SurvivalResult<PredictionResult> {
        predict(self.repo(), input).map_err(ensure_prediction_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_round_to_two_decimals() {
        assert_eq!(to_percent(0.123456), 12.35);
        assert_eq!(to_percent(0.876544), 87.65);
        assert_eq!(to_percent(1.0), 100.0);
        assert_eq!(to_percent(0.0), 0.0);
    }

    #[test]
    fn labels_follow_the_choice_tables() {
        let labels = display_labels(&PassengerInput::new("3", "male", "35", "S"));
        assert_eq!(labels.pclass, "Third Class");
        assert_eq!(labels.sex, "Male");
        assert_eq!(labels.embarked, "Southampton");

        let labels = display_labels(&PassengerInput::new("3", "male", "35", "X"));
        assert_eq!(labels.embarked, "X");
    }

    #[test]
    fn result_label_comes_from_the_score() {
        let input = PassengerInput::new("1", "female", "28", "C");
        let result = format_result(
            &input,
            Score {
                label: 1,
                proba: [0.1, 0.9],
            },
        );
        assert!(result.survived);
        assert_eq!(result.survival_probability, 90.0);
        assert_eq!(result.death_probability, 10.0);
        assert_eq!(result.age, "28");
        assert!(!result.is_example);
    }

    #[test]
    fn label_near_even_odds_follows_the_model_not_the_rounding() {
        let input = PassengerInput::new("2", "male", "30", "S");
        let result = format_result(
            &input,
            Score {
                label: 1,
                proba: [0.49997, 0.50003],
            },
        );
        assert!(result.survived);
        assert_eq!(result.survival_probability, 50.0);
        assert_eq!(result.death_probability, 50.0);
    }

    struct MemRepo(Artifacts);

    impl ArtifactRepo for MemRepo {
        fn save(&self, _artifacts: &Artifacts) -> SurvivalResult<()> {
            Ok(())
        }

        fn load(&self) -> SurvivalResult<Artifacts> {
            Ok(self.0.clone())
        }
    }

    fn flat_artifacts(bias: f64) -> Artifacts {
        use crate::features::StandardScaler;
        use crate::training::{FeatureOrder, LogisticModel};
        Artifacts {
            model: LogisticModel {
                weights: vec![0.0; 6],
                bias,
                n_iter: 0,
            },
            scaler: StandardScaler {
                mean: vec![0.0; 6],
                scale: vec![1.0; 6],
            },
            feature_order: FeatureOrder::default(),
        }
    }

    #[test]
    fn reloading_engine_scores_through_its_repo() {
        let engine = ReloadingPredictor::new(MemRepo(flat_artifacts(2.0)));
        assert_eq!(engine.repo().0.model.bias, 2.0);
        let result = engine.infer(&Example::DoesNotSurvive.input()).unwrap();
        assert!(result.survived);
        assert_eq!(result.survival_probability, 88.08);
    }
}
