#![allow(dead_code)]

use std::fs;

use tempfile::TempDir;
use titanic_predictor::features::StandardScaler;
use titanic_predictor::training::{
    ArtifactRepo, Artifacts, FeatureOrder, FsArtifactRepo, LogisticModel,
};

/// Hand-set model with plausible coefficients: first class, women, children
/// and Cherbourg boarders fare better.
pub fn fixture_artifacts() -> Artifacts {
    Artifacts {
        model: LogisticModel {
            weights: vec![-0.9, -1.25, -0.5, 0.1, 0.0, -0.1],
            bias: -0.6,
            n_iter: 7,
        },
        scaler: StandardScaler {
            mean: vec![2.3, 0.65, 29.4, 0.19, 0.09, 0.72],
            scale: vec![0.84, 0.48, 13.0, 0.39, 0.28, 0.45],
        },
        feature_order: FeatureOrder::default(),
    }
}

/// Fixture artifacts written to a fresh directory.
pub fn model_dir() -> (TempDir, FsArtifactRepo) {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsArtifactRepo::new(dir.path());
    repo.save(&fixture_artifacts()).unwrap();
    (dir, repo)
}

/// Overwrite one artifact file with garbage.
pub fn corrupt(path: &std::path::Path) {
    fs::write(path, b"\x80\x04not json").unwrap();
}
