//! Metric computation for the holdout partition and dataset summaries.

use std::fmt::Write as _;

use crate::common::error::SurvivalResult;
use crate::data::{Dataset, PassengerRecord};
use crate::features::{PassengerClass, Sex, FEATURE_COUNT};
use crate::form::choices;
use crate::training::LogisticModel;

use super::domain::{ClassMetrics, ConfusionMatrix, EvalReport, GroupRate, SurvivalStats};

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn weighted_mean(classes: &[ClassMetrics; 2], pick: impl Fn(&ClassMetrics) -> f64) -> f64 {
    let total: usize = classes.iter().map(|m| m.support).sum();
    if total == 0 {
        return 0.0;
    }
    classes
        .iter()
        .map(|m| pick(m) * m.support as f64)
        .sum::<f64>()
        / total as f64
}

/// Per-class metrics and averages. Undefined ratios count as 0.
pub fn report_from_confusion(confusion: ConfusionMatrix) -> EvalReport {
    let mut classes = [ClassMetrics::default(); 2];
    for (class, metrics) in classes.iter_mut().enumerate() {
        let hits = confusion.counts[class][class];
        let precision = ratio(hits, confusion.predicted(class));
        let recall = ratio(hits, confusion.support(class));
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        *metrics = ClassMetrics {
            precision,
            recall,
            f1,
            support: confusion.support(class),
        };
    }

    let total = confusion.total();
    let macro_avg = ClassMetrics {
        precision: (classes[0].precision + classes[1].precision) / 2.0,
        recall: (classes[0].recall + classes[1].recall) / 2.0,
        f1: (classes[0].f1 + classes[1].f1) / 2.0,
        support: total,
    };
    let weighted_avg = ClassMetrics {
        precision: weighted_mean(&classes, |m| m.precision),
        recall: weighted_mean(&classes, |m| m.recall),
        f1: weighted_mean(&classes, |m| m.f1),
        support: total,
    };

    EvalReport {
        confusion,
        accuracy: confusion.accuracy(),
        classes,
        macro_avg,
        weighted_avg,
    }
}

/// Score every scaled row and compare against `labels`.
pub fn evaluate(
    model: &LogisticModel,
    scaled: &[[f64; FEATURE_COUNT]],
    labels: &[u8],
) -> SurvivalResult<EvalReport> {
    let predicted = scaled
        .iter()
        .map(|row| model.predict(row))
        .collect::<SurvivalResult<Vec<_>>>()?;
    let report = report_from_confusion(ConfusionMatrix::from_predictions(&predicted, labels));
    tracing::info!(
        accuracy = report.accuracy,
        rows = labels.len(),
        "holdout evaluation"
    );
    Ok(report)
}

/// Plain-text table in the familiar precision/recall/f1/support layout.
pub fn classification_report(report: &EvalReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>12} {:>9} {:>9} {:>9} {:>9}\n",
        "", "precision", "recall", "f1-score", "support"
    );
    for (class, m) in report.classes.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            class, m.precision, m.recall, m.f1, m.support
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>12} {:>9} {:>9} {:>9.2} {:>9}",
        "accuracy",
        "",
        "",
        report.accuracy,
        report.confusion.total()
    );
    for (name, m) in [
        ("macro avg", &report.macro_avg),
        ("weighted avg", &report.weighted_avg),
    ] {
        let _ = writeln!(
            out,
            "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
            name, m.precision, m.recall, m.f1, m.support
        );
    }
    out
}

fn group_rate<'a>(group: &str, rows: impl Iterator<Item = &'a PassengerRecord>) -> GroupRate {
    let (passengers, survivors) = rows.fold((0, 0), |(n, s), r| {
        (n + 1, s + usize::from(r.survived == 1))
    });
    GroupRate {
        group: group.to_string(),
        passengers,
        survivors,
    }
}

/// Survival rates overall, by sex and by ticket class.
pub fn survival_stats(dataset: &Dataset) -> SurvivalStats {
    let records = &dataset.records;
    let overall = group_rate("all", records.iter());
    let by_sex = Sex::ALL
        .iter()
        .map(|sex| {
            group_rate(
                choices::sex_label(sex.code()).unwrap_or(sex.code()),
                records.iter().filter(|r| r.sex == sex.code()),
            )
        })
        .collect();
    let by_class = PassengerClass::ALL
        .iter()
        .map(|class| {
            group_rate(
                choices::pclass_label(class.code()).unwrap_or(class.code()),
                records
                    .iter()
                    .filter(|r| r.pclass == i64::from(class.ordinal())),
            )
        })
        .collect();
    SurvivalStats {
        overall,
        by_sex,
        by_class,
    }
}
