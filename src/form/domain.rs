//! Validated form data and per-field errors.

use std::fmt;

use serde::Serialize;

use crate::common::error::SurvivalError;
use crate::features::{PassengerClass, PassengerInput, Port, Sex};
use crate::inference::PredictionResult;

/// Submission that passed membership and range checks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CleanedPassenger {
    pub pclass: PassengerClass,
    pub sex: Sex,
    pub age: f64,
    pub embarked: Port,
}

impl CleanedPassenger {
    /// Canonical raw input for the inference pipeline.
    pub fn to_input(&self) -> PassengerInput {
        PassengerInput::from_parts(self.pclass, self.sex, self.age, self.embarked)
    }
}

/// One rejected field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All rejected fields of a submission, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

/// What the hosting page should render after a submission.
#[derive(Debug)]
pub enum FormOutcome {
    /// Show the result page.
    Predicted(PredictionResult),
    /// Re-show the form with field errors.
    Invalid {
        input: PassengerInput,
        errors: FormErrors,
    },
    /// Re-show the form with an inline error; the rest of the site stays usable.
    Failed {
        input: PassengerInput,
        error: SurvivalError,
    },
}

impl FormOutcome {
    /// Banner text for the re-shown form, if any.
    pub fn banner(&self) -> Option<String> {
        match self {
            FormOutcome::Predicted(_) => None,
            FormOutcome::Invalid { .. } => Some("Please correct the errors".to_string()),
            FormOutcome::Failed { error, .. } => Some(error.user_message()),
        }
    }
}
