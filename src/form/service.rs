//! Validation of submitted passenger fields and the submit flow.

use crate::features::{PassengerClass, PassengerInput, Port, Sex};
use crate::inference::SurvivalEngine;

use super::choices::{AGE_MAX, AGE_MIN};
use super::domain::{CleanedPassenger, FormErrors, FormOutcome};

const REQUIRED: &str = "This field is required.";

fn choice_error(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

/// Check every field, collecting all errors rather than stopping at the first.
pub fn clean(input: &PassengerInput) -> Result<CleanedPassenger, FormErrors> {
    let mut errors = FormErrors::default();

    let pclass = match input.pclass.trim() {
        "" => {
            errors.push("pclass", REQUIRED);
            None
        }
        code => PassengerClass::from_code(code).or_else(|| {
            errors.push("pclass", choice_error(code));
            None
        }),
    };

    let sex = match input.sex.trim() {
        "" => {
            errors.push("sex", REQUIRED);
            None
        }
        code => Sex::from_code(code).or_else(|| {
            errors.push("sex", choice_error(code));
            None
        }),
    };

    let age = match input.age.trim() {
        "" => {
            errors.push("age", REQUIRED);
            None
        }
        raw => match raw.parse::<f64>() {
            Ok(age) if age.is_finite() && (AGE_MIN..=AGE_MAX).contains(&age) => Some(age),
            Ok(_) => {
                errors.push("age", "Age must be between 0 and 100 years.");
                None
            }
            Err(_) => {
                errors.push("age", "Enter a number.");
                None
            }
        },
    };

    let embarked = match input.embarked.trim() {
        "" => {
            errors.push("embarked", REQUIRED);
            None
        }
        code => Port::from_code(code).or_else(|| {
            errors.push("embarked", choice_error(code));
            None
        }),
    };

    match (pclass, sex, age, embarked) {
        (Some(pclass), Some(sex), Some(age), Some(embarked)) if errors.is_empty() => {
            Ok(CleanedPassenger {
                pclass,
                sex,
                age,
                embarked,
            })
        }
        _ => Err(errors),
    }
}

/// Validate, then predict. Every failure becomes an outcome; nothing panics
/// or escapes to the hosting framework.
pub fn submit(engine: &dyn SurvivalEngine, input: &PassengerInput) -> FormOutcome {
    let cleaned = match clean(input) {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            tracing::debug!(%errors, "form rejected");
            return FormOutcome::Invalid {
                input: input.clone(),
                errors,
            };
        }
    };

    match engine.infer(&cleaned.to_input()) {
        Ok(result) => FormOutcome::Predicted(result),
        Err(error) => {
            tracing::warn!(%error, code = error.code() as u32, "prediction request failed");
            FormOutcome::Failed {
                input: input.clone(),
                error,
            }
        }
    }
}
