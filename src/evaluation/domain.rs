//! Holdout metrics and dataset-level survival statistics.

use serde::Serialize;

/// Binary confusion matrix indexed `[truth][prediction]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    /// Count label pairs. Labels other than 0/1 are ignored.
    pub fn from_predictions(predicted: &[u8], truth: &[u8]) -> Self {
        let mut counts = [[0; 2]; 2];
        for (&p, &t) in predicted.iter().zip(truth) {
            if p <= 1 && t <= 1 {
                counts[t as usize][p as usize] += 1;
            }
        }
        Self { counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Share of correct predictions; 0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.counts[0][0] + self.counts[1][1]) as f64 / total as f64
    }

    /// Rows whose true label is `class`.
    pub fn support(&self, class: usize) -> usize {
        self.counts[class].iter().sum()
    }

    /// Rows predicted as `class`.
    pub fn predicted(&self, class: usize) -> usize {
        self.counts[0][class] + self.counts[1][class]
    }
}

/// Precision, recall and F1 for one class.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Everything printed after a training run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvalReport {
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    /// Index 0 = did not survive, 1 = survived.
    pub classes: [ClassMetrics; 2],
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

/// Survival rate within one group of passengers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupRate {
    pub group: String,
    pub passengers: usize,
    pub survivors: usize,
}

impl GroupRate {
    pub fn rate(&self) -> f64 {
        if self.passengers == 0 {
            0.0
        } else {
            self.survivors as f64 / self.passengers as f64
        }
    }
}

/// Historical survival rates of a labelled dataset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurvivalStats {
    pub overall: GroupRate,
    pub by_sex: Vec<GroupRate>,
    pub by_class: Vec<GroupRate>,
}
