//! Training domain: classifier fitting, seeded splitting and artifact persistence.

pub mod domain;
pub mod logistic;
pub mod repo_fs;
pub mod service;
pub mod split;

pub use domain::{
    ArtifactRepo, Artifacts, FeatureOrder, LogisticModel, Score, TrainConfig, Trainer,
};
pub use logistic::LogisticTrainer;
pub use repo_fs::FsArtifactRepo;
pub use service::TrainReport;
