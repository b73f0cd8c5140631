//! Domain definitions for survival predictions and the engines that produce them.

use serde::Serialize;

use crate::common::error::SurvivalResult;
use crate::features::PassengerInput;
use crate::training::{ArtifactRepo, Artifacts};

/// Human-readable echo of the submitted choices. Unknown codes echo verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayLabels {
    pub pclass: String,
    pub sex: String,
    pub embarked: String,
}

/// Formatted outcome of one inference call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Model label (`margin > 0`). Within 0.005 points of even odds the
    /// rounded percentage can read `50.0` while this is `true`.
    pub survived: bool,
    /// Percentage in `[0, 100]`, two decimals.
    pub survival_probability: f64,
    /// Percentage in `[0, 100]`, two decimals.
    pub death_probability: f64,
    pub age: String,
    pub labels: DisplayLabels,
    /// Set when produced from a canned preset rather than user input.
    pub is_example: bool,
}

/// Canned demo scenarios.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Example {
    /// First-class woman, 28, boarded at Cherbourg.
    Survives,
    /// Third-class man, 35, boarded at Southampton.
    DoesNotSurvive,
}

impl Example {
    pub const ALL: [Example; 2] = [Self::Survives, Self::DoesNotSurvive];

    pub fn input(&self) -> PassengerInput {
        match self {
            Example::Survives => PassengerInput::new("1", "female", "28", "C"),
            Example::DoesNotSurvive => PassengerInput::new("3", "male", "35", "S"),
        }
    }

    pub fn from_index(idx: u32) -> Option<Self> {
        match idx {
            0 => Some(Self::Survives),
            1 => Some(Self::DoesNotSurvive),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Example::Survives => "survives",
            Example::DoesNotSurvive => "does-not-survive",
        }
    }
}

/// Anything that turns a raw submission into a formatted prediction.
pub trait SurvivalEngine {
    fn infer(&self, input: &PassengerInput) -> SurvivalResult<PredictionResult>;
}

/// Engine over artifacts loaded once and shared read-only.
#[derive(Clone, Debug)]
pub struct Predictor {
    artifacts: Artifacts,
}

impl Predictor {
    pub fn new(artifacts: Artifacts) -> Self {
        Self { artifacts }
    }

    /// Load through `repo` once; later calls never touch the filesystem.
    pub fn load(repo: &dyn ArtifactRepo) -> SurvivalResult<Self> {
        repo.load().map(Self::new)
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }
}

/// Engine that re-reads the artifacts on every call, so a retrained model
/// is picked up without a restart.
#[derive(Clone, Debug)]
pub struct ReloadingPredictor<R> {
    repo: R,
}

impl<R: ArtifactRepo> ReloadingPredictor<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }
}
