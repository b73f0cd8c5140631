//! Passenger attributes and their positional numeric encoding.
//!
//! The frozen scaler and model were fitted on unlabelled columns in the order
//! of [`FEATURE_NAMES`]; [`FeatureVector`] must reproduce that order exactly.

use serde::{Deserialize, Serialize};

use crate::common::error::{SurvivalError, SurvivalResult};

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 6;

/// Column names in fitting order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Pclass",
    "Sex",
    "Age",
    "Embarked_C",
    "Embarked_Q",
    "Embarked_S",
];

/// Ticket class.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    pub const ALL: [PassengerClass; 3] = [Self::First, Self::Second, Self::Third];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::First),
            "2" => Some(Self::Second),
            "3" => Some(Self::Third),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::First => "1",
            Self::Second => "2",
            Self::Third => "3",
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Self::Male, Self::Female];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Port of embarkation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Port {
    Cherbourg,
    Queenstown,
    Southampton,
}

impl Port {
    pub const ALL: [Port; 3] = [Self::Cherbourg, Self::Queenstown, Self::Southampton];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Self::Cherbourg),
            "Q" => Some(Self::Queenstown),
            "S" => Some(Self::Southampton),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Cherbourg => "C",
            Self::Queenstown => "Q",
            Self::Southampton => "S",
        }
    }
}

/// Four fields exactly as submitted by the form or a preset.
///
/// Membership and range checks belong to the form layer; the pipeline
/// encodes whatever it is given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassengerInput {
    pub pclass: String,
    pub sex: String,
    pub age: String,
    pub embarked: String,
}

impl PassengerInput {
    pub fn new(
        pclass: impl Into<String>,
        sex: impl Into<String>,
        age: impl Into<String>,
        embarked: impl Into<String>,
    ) -> Self {
        Self {
            pclass: pclass.into(),
            sex: sex.into(),
            age: age.into(),
            embarked: embarked.into(),
        }
    }

    /// Input built from already-typed values.
    pub fn from_parts(pclass: PassengerClass, sex: Sex, age: f64, embarked: Port) -> Self {
        Self::new(pclass.code(), sex.code(), age.to_string(), embarked.code())
    }
}

/// Unlabelled positional model input.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Encode already-parsed values. `sex` and `embarked` are raw codes:
    /// anything but `"male"` encodes as 0, and an unknown port leaves all
    /// three indicators at 0.
    pub fn from_values(pclass: i64, sex: &str, age: f64, embarked: &str) -> Self {
        let flag = |hit: bool| if hit { 1.0 } else { 0.0 };
        Self([
            pclass as f64,
            flag(sex == Sex::Male.code()),
            age,
            flag(embarked == Port::Cherbourg.code()),
            flag(embarked == Port::Queenstown.code()),
            flag(embarked == Port::Southampton.code()),
        ])
    }

    /// Parse and encode a raw submission.
    pub fn encode(input: &PassengerInput) -> SurvivalResult<Self> {
        let pclass: i64 = input.pclass.trim().parse().map_err(|err| {
            SurvivalError::prediction_failed(format!("class {:?}: {err}", input.pclass))
        })?;
        let age: f64 = input.age.trim().parse().map_err(|err| {
            SurvivalError::prediction_failed(format!("age {:?}: {err}", input.age))
        })?;
        Ok(Self::from_values(pclass, &input.sex, age, &input.embarked))
    }

    /// Indicators `[C, Q, S]`.
    pub fn embarked_indicators(&self) -> [f64; 3] {
        [self.0[3], self.0[4], self.0[5]]
    }
}
