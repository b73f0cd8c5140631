//! Form layer: choice tables, display labels and validation of submitted fields.

pub mod choices;
pub mod domain;
pub mod service;

pub use domain::{CleanedPassenger, FieldError, FormErrors, FormOutcome};
pub use service::{clean, submit};
