//! Expanding ground-truth and report patterns into files

use crate::error::CliError;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Expand glob patterns such as `gt/*.txt` or `evals/*.yaml` into the files
/// they match.
///
/// Directories are ignored. The result is sorted and free of duplicates, so
/// overlapping patterns evaluate or summarise each file once. Matching
/// nothing at all is an error.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let matches =
            glob::glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;
        for entry in matches {
            let path = entry.with_context(|| format!("Unreadable match for {pattern}"))?;
            if path.is_file() {
                files.push(path);
            } else {
                log::debug!("Ignoring non-file match {}", path.display());
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching {}", patterns.join(", "));
    }

    files.sort_unstable();
    files.dedup();
    log::debug!("{} files matched", files.len());
    Ok(files)
}
