//! Stats file loading.
//!
//! The input is a YAML file holding a sequence of stat records. It is read
//! fully into memory before any summarization happens.

use crate::models::StatRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors while reading or parsing the stats file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read stats file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid YAML or does not match the record shape.
    #[error("malformed stats file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load all stat records from a YAML file.
pub fn load_stats(path: &Path) -> Result<Vec<StatRecord>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<StatRecord> =
        serde_yaml::from_str(&content).map_err(|source| InputError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_fixture() {
        let records = load_stats(Path::new("fixtures/example_stats.yaml")).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].region, "rt");
        assert_eq!(records[0].calls.len(), 2);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_stats(Path::new("no/such/stats.yaml")).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
        assert!(err.to_string().contains("no/such/stats.yaml"));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- region: rt\n  qual: not-a-number\n  kmer: 21").unwrap();

        let err = load_stats(file.path()).unwrap_err();
        assert!(matches!(err, InputError::Parse { .. }));
        assert!(err.to_string().contains("malformed stats file"));
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[]").unwrap();

        let records = load_stats(file.path()).unwrap();
        assert!(records.is_empty());
    }
}
