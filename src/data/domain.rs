//! Core dataset definitions and contracts.

use std::path::PathBuf;

use serde::Deserialize;

use crate::common::error::SurvivalResult;
use crate::features::FEATURE_COUNT;

/// One labelled row of the historical passenger list.
///
/// Only the columns the model consumes are kept; everything else in the
/// file (names, tickets, fares) is skipped during deserialisation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PassengerRecord {
    #[serde(rename = "Survived")]
    pub survived: u8,
    #[serde(rename = "Pclass")]
    pub pclass: i64,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Age")]
    pub age: Option<f64>,
    #[serde(rename = "Embarked")]
    pub embarked: Option<String>,
}

/// Loaded dataset plus provenance.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub source: PathBuf,
    /// Hex fingerprint of the raw file bytes.
    pub fingerprint: String,
    pub records: Vec<PassengerRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Numeric design matrix ready for splitting and scaling.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedDataset {
    pub features: Vec<[f64; FEATURE_COUNT]>,
    pub labels: Vec<u8>,
    /// Value substituted for missing ages.
    pub imputed_age: f64,
    pub imputed_rows: usize,
}

/// Repository contract for labelled datasets.
pub trait DataRepo {
    fn load(&self) -> SurvivalResult<Dataset>;
}
