//! Filesystem-backed CSV repository for the labelled passenger list.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::config::AppCfg;
use crate::common::error::{SurvivalError, SurvivalResult};
use crate::common::ids::Fingerprint;

use super::domain::{DataRepo, Dataset, PassengerRecord};

/// Reads a headered CSV file from disk.
pub struct CsvDataRepo {
    path: PathBuf,
}

impl CsvDataRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_cfg(cfg: &AppCfg) -> Self {
        Self::new(&cfg.data_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataRepo for CsvDataRepo {
    fn load(&self) -> SurvivalResult<Dataset> {
        let bytes = fs::read(&self.path).map_err(|err| SurvivalError::io(&self.path, err))?;
        let mut fingerprint = Fingerprint::new();
        fingerprint.update(&bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(bytes.as_slice());

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<PassengerRecord>().enumerate() {
            let record = row.map_err(|err| {
                // header is line 1
                SurvivalError::dataset(&self.path, format!("row {}: {err}", idx + 2))
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(SurvivalError::dataset(&self.path, "no data rows"));
        }

        tracing::info!(
            path = %self.path.display(),
            rows = records.len(),
            fingerprint = %fingerprint.finish_hex(),
            "dataset loaded"
        );

        Ok(Dataset {
            source: self.path.clone(),
            fingerprint: fingerprint.finish_hex(),
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_quoted_names_and_empty_fields() {
        let file = write_csv(
            "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n\
             1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S\n\
             6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q\n\
             62,1,1,\"Icard, Miss. Amelie\",female,38,0,0,113572,80,B28,\n",
        );
        let repo = CsvDataRepo::new(file.path());
        let dataset = repo.load().unwrap();
        assert_eq!(dataset.source, repo.path());
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records[0].age, Some(22.0));
        assert_eq!(dataset.records[1].age, None);
        assert_eq!(dataset.records[1].embarked.as_deref(), Some("Q"));
        assert_eq!(dataset.records[2].embarked, None);
        assert_eq!(dataset.records[2].survived, 1);
        assert_eq!(dataset.fingerprint.len(), 16);
    }

    #[test]
    fn malformed_row_reports_line() {
        let file = write_csv("Survived,Pclass,Sex,Age,Embarked\n1,1,female,29,C\nyes,1,male,40,S\n");
        let err = CsvDataRepo::new(file.path()).load().unwrap_err();
        match err {
            SurvivalError::Dataset { reason, .. } => assert!(reason.starts_with("row 3"), "{reason}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn header_only_file_is_rejected() {
        let file = write_csv("Survived,Pclass,Sex,Age,Embarked\n");
        assert!(matches!(
            CsvDataRepo::new(file.path()).load(),
            Err(SurvivalError::Dataset { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvDataRepo::new(dir.path().join("absent.csv"));
        assert!(matches!(repo.load(), Err(SurvivalError::Io { .. })));
    }
}
