// lib.rs - passenger survival core
pub mod api;
pub mod cli;
pub mod common;
pub mod data;
pub mod evaluation;
pub mod features;
pub mod form;
pub mod inference;
pub mod training;

pub use common::{AppCfg, ErrorCode, SurvivalError, SurvivalResult};
pub use features::PassengerInput;
pub use inference::{Example, PredictionResult, Predictor, SurvivalEngine};
