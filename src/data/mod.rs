//! Data domain: loading, imputation and encoding of the labelled passenger list.

pub mod domain;
pub mod repo_fs;
pub mod service;

pub use domain::{DataRepo, Dataset, EncodedDataset, PassengerRecord};
pub use repo_fs::CsvDataRepo;
