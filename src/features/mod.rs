//! Feature domain: categorical attributes, raw input, positional encoding and scaling.

pub mod domain;
pub mod scaler;

pub use domain::{
    FeatureVector, PassengerClass, PassengerInput, Port, Sex, FEATURE_COUNT, FEATURE_NAMES,
};
pub use scaler::{ScaledFeatures, StandardScaler};
