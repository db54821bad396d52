//! Reading transcript files

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads ground-truth and transcription files
pub struct FileReader;

impl FileReader {
    /// Read a UTF-8 text file.
    ///
    /// A missing file is reported as [`CliError::FileNotFound`]; any other
    /// failure, including invalid UTF-8, carries the path as context.
    pub fn read_text(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.to_path_buf()).into());
        }
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Join a manifest path onto the base directory.
    ///
    /// Surrounding whitespace is trimmed and absolute paths are kept as-is.
    pub fn resolve(base: &Path, path: &str) -> PathBuf {
        base.join(path.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_multiline_transcript() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("page1.txt");
        fs::write(&page, "Den 14 April\nontvangen van").unwrap();

        assert_eq!(
            FileReader::read_text(&page).unwrap(),
            "Den 14 April\nontvangen van"
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = FileReader::read_text(Path::new("/nonexistent/page1.txt")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_keeps_path_context() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("latin1.txt");
        fs::write(&page, [0x48, 0x65, 0xff, 0x6c]).unwrap();

        let err = FileReader::read_text(&page).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file"));
        assert!(err.to_string().contains("latin1.txt"));
    }

    #[test]
    fn test_blank_transcription_is_allowed() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("blank.txt");
        fs::write(&page, "").unwrap();

        assert_eq!(FileReader::read_text(&page).unwrap(), "");
    }

    #[test]
    fn test_resolve() {
        let base = Path::new("fixtures");
        assert_eq!(
            FileReader::resolve(base, " gt/page1.txt "),
            PathBuf::from("fixtures/gt/page1.txt")
        );
        assert_eq!(
            FileReader::resolve(base, "/abs/page1.txt"),
            PathBuf::from("/abs/page1.txt")
        );
    }
}
