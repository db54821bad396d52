//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use htr_eval_core::{EvaluationConfig, ReportFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Evaluation settings
    #[serde(default)]
    pub evaluation: EvaluationSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&source)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Worker threads to use, resolving 0 to the number of CPUs
    pub fn worker_threads(&self) -> usize {
        match self.performance.worker_threads {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

/// Evaluation settings; unset values leave the base configuration alone
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct EvaluationSection {
    /// Ignore patterns for unreadable ground-truth text
    pub ignore_patterns: Option<Vec<String>>,

    /// Flatten texts to a single line before comparing
    pub single_line: Option<bool>,
}

impl EvaluationSection {
    /// Overlay the configured values onto `base`
    pub fn apply(&self, mut base: EvaluationConfig) -> EvaluationConfig {
        if let Some(patterns) = &self.ignore_patterns {
            base.ignore_patterns = patterns.clone();
        }
        if let Some(single_line) = self.single_line {
            base.single_line = single_line;
        }
        base
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON reports
    pub pretty_json: bool,

    /// Directory for reports without an explicit output path
    pub output_dir: PathBuf,

    /// Encoding of reports written to `output_dir` ("json" or "yaml")
    pub report_format: ReportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
            output_dir: PathBuf::from("evals"),
            report_format: ReportFormat::Json,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,

    /// Minimum number of rows before evaluating in parallel
    pub parallel_threshold_rows: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            parallel_threshold_rows: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.output.default_format, "text");
        assert!(config.output.pretty_json);
        assert_eq!(config.output.output_dir, PathBuf::from("evals"));
        assert_eq!(config.output.report_format, ReportFormat::Json);
        assert_eq!(config.performance.parallel_threshold_rows, 32);
        assert!(config.worker_threads() >= 1);
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[evaluation]
ignore_patterns = ["|", "[?]"]

[output]
report_format = "yaml"

[performance]
worker_threads = 3
"#
        )
        .unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.evaluation.ignore_patterns,
            Some(vec!["|".to_string(), "[?]".to_string()])
        );
        assert_eq!(config.evaluation.single_line, None);
        assert_eq!(config.worker_threads(), 3);
        assert_eq!(config.performance.parallel_threshold_rows, 32);
        assert_eq!(config.output.default_format, "text");
        assert_eq!(config.output.report_format, ReportFormat::Yaml);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[evaluation\nsingle_line = ").unwrap();

        let err = CliConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::from_file(Path::new("/nonexistent/htr.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_section_apply_keeps_unset_values() {
        let base = EvaluationConfig {
            ignore_patterns: vec!["|".to_string()],
            single_line: true,
        };
        let section = EvaluationSection {
            ignore_patterns: None,
            single_line: Some(false),
        };
        let applied = section.apply(base);
        assert_eq!(applied.ignore_patterns, vec!["|"]);
        assert!(!applied.single_line);
    }
}
