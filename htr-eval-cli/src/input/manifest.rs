//! Row manifests pairing ground-truth files with transcription files
//!
//! A manifest is either TOML:
//!
//! ```toml
//! [[rows]]
//! transcript = "gt/page1.txt"
//! transcription = "loghi/page1.txt"
//! ```
//!
//! or a two-column CSV with an optional `transcript,transcription` header:
//!
//! ```text
//! transcript,transcription
//! gt/page1.txt,loghi/page1.txt
//! ```

use super::file_reader::FileReader;
use super::glob_resolver::resolve_patterns;
use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One ground-truth/transcription pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    /// Path to the ground-truth transcript
    pub transcript: String,
    /// Path to the external model's transcription
    pub transcription: String,
}

impl ManifestRow {
    /// Both paths are present
    pub fn is_complete(&self) -> bool {
        !self.transcript.trim().is_empty() && !self.transcription.trim().is_empty()
    }
}

/// Ordered list of rows to evaluate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowManifest {
    #[serde(default)]
    pub rows: Vec<ManifestRow>,
}

impl RowManifest {
    /// Load a manifest file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.to_path_buf()).into());
        }
        let source = FileReader::read_text(path)?;
        let manifest: Self = toml::from_str(&source)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        if manifest.rows.is_empty() {
            return Err(CliError::EmptyManifest(path.to_path_buf()).into());
        }
        Ok(manifest)
    }

    /// Load a two-column CSV manifest.
    ///
    /// A first row whose first cell is `transcript` (any case) is a header and
    /// is skipped. Rows with fewer than two cells are kept so row indices stay
    /// stable; they are incomplete and get skipped at evaluation time.
    pub fn from_csv(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.to_path_buf()).into());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record.with_context(|| format!("Failed to read CSV: {}", path.display()))?);
        }
        if records.is_empty() {
            return Err(CliError::EmptyManifest(path.to_path_buf()).into());
        }

        let has_header = records[0]
            .get(0)
            .is_some_and(|cell| cell.trim().eq_ignore_ascii_case("transcript"));
        let rows = records
            .iter()
            .skip(usize::from(has_header))
            .map(|record| ManifestRow {
                transcript: record.get(0).unwrap_or_default().to_string(),
                transcription: record.get(1).unwrap_or_default().to_string(),
            })
            .collect();

        Ok(Self { rows })
    }

    /// Pair every ground-truth file matching `patterns` with the same-named
    /// file in `transcriptions`
    pub fn from_glob(patterns: &[String], transcriptions: &Path) -> Result<Self> {
        let rows = resolve_patterns(patterns)?
            .into_iter()
            .filter_map(|transcript| {
                let name = transcript.file_name()?;
                Some(ManifestRow {
                    transcription: transcriptions.join(name).display().to_string(),
                    transcript: transcript.display().to_string(),
                })
            })
            .collect();
        Ok(Self { rows })
    }

    /// Rows to process with their zero-based index.
    ///
    /// An empty selection means every row. Unknown indices are reported and
    /// dropped.
    pub fn select(&self, selection: &[usize]) -> Vec<(usize, &ManifestRow)> {
        if selection.is_empty() {
            return self.rows.iter().enumerate().collect();
        }

        for &index in selection.iter().filter(|&&i| i >= self.rows.len()) {
            log::warn!(
                "Row {index} requested but manifest has {} rows",
                self.rows.len()
            );
        }

        self.rows
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                let keep = selection.contains(index);
                if !keep {
                    log::debug!("Skipping row {}", index + 1);
                }
                keep
            })
            .collect()
    }

    /// Resolve both paths of a row against the base directory
    pub fn resolve(row: &ManifestRow, base: &Path) -> (PathBuf, PathBuf) {
        (
            FileReader::resolve(base, &row.transcript),
            FileReader::resolve(base, &row.transcription),
        )
    }
}
