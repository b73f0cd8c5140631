//! Filesystem repository for the model, scaler and feature-order artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::config::AppCfg;
use crate::common::error::{SurvivalError, SurvivalResult};

use super::domain::{ArtifactRepo, Artifacts};

pub const MODEL_FILE: &str = "logistic_regression_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURE_ORDER_FILE: &str = "feature_order.json";

/// Artifacts stored as pretty JSON files under one directory.
#[derive(Clone, Debug)]
pub struct FsArtifactRepo {
    root: PathBuf,
}

impl FsArtifactRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_cfg(cfg: &AppCfg) -> Self {
        Self::new(&cfg.model_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn model_path(&self) -> PathBuf {
        self.root.join(MODEL_FILE)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.root.join(SCALER_FILE)
    }

    pub fn feature_order_path(&self) -> PathBuf {
        self.root.join(FEATURE_ORDER_FILE)
    }

    /// Sibling path an artifact is written to before being renamed into place.
    pub fn staged_path(path: &Path) -> PathBuf {
        path.with_extension("json.staged")
    }

    fn stage_json<T: Serialize>(path: &Path, value: &T) -> SurvivalResult<PathBuf> {
        let body = serde_json::to_vec_pretty(value)
            .map_err(|err| SurvivalError::Training(format!("serialise {}: {err}", path.display())))?;
        let staged = Self::staged_path(path);
        fs::write(&staged, body).map_err(|err| SurvivalError::io(&staged, err))?;
        Ok(staged)
    }

    fn stage_all(
        &self,
        artifacts: &Artifacts,
        staged: &mut Vec<(PathBuf, PathBuf)>,
    ) -> SurvivalResult<()> {
        let model = self.model_path();
        staged.push((Self::stage_json(&model, &artifacts.model)?, model));
        let scaler = self.scaler_path();
        staged.push((Self::stage_json(&scaler, &artifacts.scaler)?, scaler));
        let order = self.feature_order_path();
        staged.push((Self::stage_json(&order, &artifacts.feature_order)?, order));
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> SurvivalResult<T> {
        let body = fs::read(path).map_err(|err| {
            SurvivalError::model_unavailable(format!("{}: {err}", path.display()))
        })?;
        serde_json::from_slice(&body).map_err(|err| {
            SurvivalError::model_unavailable(format!("{}: {err}", path.display()))
        })
    }
}

impl ArtifactRepo for FsArtifactRepo {
    fn save(&self, artifacts: &Artifacts) -> SurvivalResult<()> {
        fs::create_dir_all(&self.root).map_err(|err| SurvivalError::io(&self.root, err))?;

        // Nothing is replaced until all three files are staged.
        let mut staged = Vec::with_capacity(3);
        if let Err(err) = self.stage_all(artifacts, &mut staged) {
            for (tmp, _) in &staged {
                let _ = fs::remove_file(tmp);
            }
            tracing::warn!(
                dir = %self.root.display(),
                error = %err,
                "artifact staging failed, previous artifacts kept"
            );
            return Err(err);
        }
        for (tmp, path) in &staged {
            fs::rename(tmp, path).map_err(|err| SurvivalError::io(path, err))?;
        }
        tracing::info!(dir = %self.root.display(), "artifacts written");
        Ok(())
    }

    fn load(&self) -> SurvivalResult<Artifacts> {
        let artifacts = Artifacts {
            model: Self::read_json(&self.model_path())?,
            scaler: Self::read_json(&self.scaler_path())?,
            feature_order: Self::read_json(&self.feature_order_path())?,
        };
        tracing::debug!(dir = %self.root.display(), "artifacts loaded");
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::StandardScaler;
    use crate::training::domain::{FeatureOrder, LogisticModel};

    fn artifacts() -> Artifacts {
        Artifacts {
            model: LogisticModel {
                weights: vec![-0.9, -1.25, -0.5, 0.1, 0.0, -0.1],
                bias: -0.6,
                n_iter: 6,
            },
            scaler: StandardScaler {
                mean: vec![2.3, 0.65, 29.4, 0.19, 0.09, 0.72],
                scale: vec![0.84, 0.48, 13.0, 0.39, 0.28, 0.45],
            },
            feature_order: FeatureOrder::default(),
        }
    }

    #[test]
    fn saved_artifacts_load_back_equal() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsArtifactRepo::new(dir.path().join("nested"));
        repo.save(&artifacts()).unwrap();
        assert!(repo.feature_order_path().exists());
        assert_eq!(repo.load().unwrap(), artifacts());
    }

    #[test]
    fn failed_save_keeps_previous_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsArtifactRepo::new(dir.path());
        repo.save(&artifacts()).unwrap();

        let mut retrained = artifacts();
        retrained.model.bias = 3.0;
        retrained.scaler.mean[2] = 40.0;
        fs::create_dir(FsArtifactRepo::staged_path(&repo.scaler_path())).unwrap();

        let err = repo.save(&retrained).unwrap_err();
        assert!(matches!(err, SurvivalError::Io { .. }), "{err:?}");
        assert_eq!(repo.load().unwrap(), artifacts());
        assert!(!FsArtifactRepo::staged_path(&repo.model_path()).exists());
    }

    #[test]
    fn save_replaces_all_three_and_leaves_no_staging() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsArtifactRepo::new(dir.path());
        repo.save(&artifacts()).unwrap();

        let mut retrained = artifacts();
        retrained.model.bias = 3.0;
        retrained.feature_order.train_rows = 712;
        repo.save(&retrained).unwrap();
        assert_eq!(repo.load().unwrap(), retrained);
        for path in [repo.model_path(), repo.scaler_path(), repo.feature_order_path()] {
            assert!(!FsArtifactRepo::staged_path(&path).exists());
        }
    }

    #[test]
    fn missing_scaler_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsArtifactRepo::new(dir.path());
        repo.save(&artifacts()).unwrap();
        fs::remove_file(repo.scaler_path()).unwrap();
        assert!(matches!(
            repo.load(),
            Err(SurvivalError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn corrupt_model_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsArtifactRepo::new(dir.path());
        repo.save(&artifacts()).unwrap();
        fs::write(repo.model_path(), b"\x80\x04pickle").unwrap();
        let err = repo.load().unwrap_err();
        assert!(matches!(err, SurvivalError::ModelUnavailable { .. }));
        assert!(err.to_string().contains(MODEL_FILE));
    }
}
