//! Plain-text failure log.
//!
//! Writes the failed identifiers joined by commas, so the file can be fed
//! straight back in with `--input-file` to retry them.

use parcel_application::{FailureLogError, FailureLogPort};
use parcel_domain::ParcelId;
use std::path::{Path, PathBuf};

/// Failure log written to a fixed path, replacing any previous content
pub struct FileFailureLog {
    path: PathBuf,
}

impl FileFailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FailureLogPort for FileFailureLog {
    fn write(&self, ids: &[ParcelId]) -> Result<PathBuf, FailureLogError> {
        let content = ids
            .iter()
            .map(ParcelId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        std::fs::write(&self.path, content).map_err(|e| FailureLogError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_comma_joined_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileFailureLog::new(dir.path().join("failed_identifiers.txt"));
        let ids = vec![
            ParcelId::new("020301_1.0001.1/1").unwrap(),
            ParcelId::new("101511_1.0016.164/1").unwrap(),
        ];

        let path = log.write(&ids).unwrap();
        assert_eq!(path, log.path());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "020301_1.0001.1/1,101511_1.0016.164/1"
        );
        // Reads back as the same list
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(ParcelId::parse_list(&content), ids);
    }

    #[test]
    fn test_overwrites_previous_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.txt");
        std::fs::write(&path, "old,content,here").unwrap();

        FileFailureLog::new(&path)
            .write(&[ParcelId::new("020301_1.0001.2").unwrap()])
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "020301_1.0001.2");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileFailureLog::new(dir.path().join("nope").join("failed.txt"));
        let err = log
            .write(&[ParcelId::new("020301_1.0001.2").unwrap()])
            .unwrap_err();
        assert!(err.to_string().contains("failed.txt"));
    }
}
