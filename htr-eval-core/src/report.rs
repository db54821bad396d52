//! Persisted evaluation reports
//!
//! A report stores the run configuration next to one result per evaluated
//! row. Metric fields are flattened into each result under the identifiers
//! used by downstream summary and export tooling.
//!
//! Reports are stored as JSON or YAML; the file extension decides which.

use crate::batch::BatchSummary;
use crate::config::EvaluationConfig;
use crate::error::{EvalError, Result};
use crate::metrics::AccuracyMetrics;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp layout used in report configs and default file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Provider name recorded for transcriptions produced outside this tool
pub const EXTERNAL_PROVIDER: &str = "external";

/// On-disk encoding of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
}

impl ReportFormat {
    /// `.yaml` and `.yml` files are YAML, everything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ReportFormat::Yaml
            }
            _ => ReportFormat::Json,
        }
    }

    /// File extension used for new reports
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Yaml => "yaml",
        }
    }
}

/// Configuration of the run that produced a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub provider: String,
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    /// Row manifest the run was driven from
    pub csv_path: String,
    /// Zero-based rows that were selected, empty for all
    pub rows: Vec<usize>,
    pub timestamp: String,
    pub ignore_patterns: Vec<String>,
    pub single_line: bool,
}

impl RunConfig {
    /// Evaluation settings recorded for this run
    pub fn evaluation(&self) -> EvaluationConfig {
        EvaluationConfig {
            ignore_patterns: self.ignore_patterns.clone(),
            single_line: self.single_line,
        }
    }

    /// Record the evaluation settings used for this run
    pub fn set_evaluation(&mut self, config: &EvaluationConfig) {
        self.ignore_patterns = config.ignore_patterns.clone();
        self.single_line = config.single_line;
    }
}

/// One evaluated row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
    pub identifier: String,
    #[serde(default)]
    pub image_path: String,
    pub transcript_path: String,
    #[serde(default)]
    pub public: bool,
    /// Transcription that was scored
    #[serde(default)]
    pub provider_response: String,
    #[serde(flatten)]
    pub metrics: AccuracyMetrics,
}

/// A stored batch of results with its configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub config: RunConfig,
    #[serde(default)]
    pub results: Vec<EvalResult>,
}

impl EvalReport {
    /// Read a report, decoding it according to its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match ReportFormat::from_path(path) {
            ReportFormat::Json => serde_json::from_str(&data).map_err(|source| EvalError::Json {
                path: path.to_path_buf(),
                source,
            }),
            ReportFormat::Yaml => serde_yaml::from_str(&data).map_err(|source| EvalError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write the report, creating parent directories as needed.
    ///
    /// `pretty` only affects JSON output.
    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        let io_error = |source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let encoded = match ReportFormat::from_path(path) {
            ReportFormat::Json => {
                let json = if pretty {
                    serde_json::to_string_pretty(self)
                } else {
                    serde_json::to_string(self)
                }
                .map_err(|source| EvalError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
                json + "\n"
            }
            ReportFormat::Yaml => serde_yaml::to_string(self).map_err(|source| EvalError::Yaml {
                path: path.to_path_buf(),
                source,
            })?,
        };

        fs::write(path, encoded).map_err(io_error)
    }

    /// Aggregate the stored metrics
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_metrics(self.results.iter().map(|r| &r.metrics))
    }
}

/// Default report location for a named run: `<dir>/<name>.<ext>`, with `:`
/// replaced so model tags make valid file names
pub fn report_path(dir: impl AsRef<Path>, name: &str, format: ReportFormat) -> PathBuf {
    dir.as_ref()
        .join(format!("{}.{}", name.replace(':', "_"), format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::evaluate_text;
    use tempfile::TempDir;

    fn sample_report() -> EvalReport {
        EvalReport {
            config: RunConfig {
                provider: EXTERNAL_PROVIDER.to_string(),
                model: "loghi".to_string(),
                csv_path: "rows.toml".to_string(),
                timestamp: "2026-10-17_09-30-00".to_string(),
                ignore_patterns: vec!["|".to_string()],
                ..Default::default()
            },
            results: vec![EvalResult {
                identifier: "page1.txt".to_string(),
                transcript_path: "gt/page1.txt".to_string(),
                provider_response: "a b d".to_string(),
                metrics: evaluate_text("a b c", "a b d", &[], false),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_metrics_are_flattened() {
        let json = serde_json::to_value(&sample_report()).unwrap();
        let result = &json["results"][0];
        assert_eq!(result["identifier"], "page1.txt");
        assert_eq!(result["correct_words"], 2);
        assert_eq!(result["substitutions"], 1);
        assert!(result.get("metrics").is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("loghi.json");
        let report = sample_report();

        report.save(&path, true).unwrap();
        let loaded = EvalReport::load(&path).unwrap();
        assert_eq!(loaded.config, report.config);
        assert_eq!(loaded.results.len(), 1);

        let (stored, original) = (&loaded.results[0], &report.results[0]);
        assert_eq!(stored.identifier, original.identifier);
        assert_eq!(stored.metrics.correct_words, original.metrics.correct_words);
        assert!((stored.metrics.word_accuracy - original.metrics.word_accuracy).abs() < 1e-12);
    }

    #[test]
    fn test_load_older_report_without_new_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old.json");
        fs::write(
            &path,
            r#"{
  "config": {"provider": "openai", "model": "gpt-4o", "timestamp": "2025-01-01_00-00-00"},
  "results": [{
    "identifier": "a.jpg",
    "transcript_path": "a.txt",
    "character_similarity": 0.5,
    "word_accuracy": 0.25
  }]
}"#,
        )
        .unwrap();

        let report = EvalReport::load(&path).unwrap();
        assert!(report.config.ignore_patterns.is_empty());
        assert!(!report.config.single_line);
        let metrics = &report.results[0].metrics;
        assert_eq!(metrics.character_similarity, 0.5);
        assert_eq!(metrics.character_accuracy, 0.0);
        assert_eq!(metrics.ignored_chars_count, 0);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            EvalReport::load(&path),
            Err(EvalError::Json { .. })
        ));
    }

    #[test]
    fn test_run_config_evaluation_round_trip() {
        let mut config = RunConfig::default();
        let evaluation = EvaluationConfig::builder()
            .ignore_pattern("[?]")
            .single_line(true)
            .build()
            .unwrap();
        config.set_evaluation(&evaluation);
        assert_eq!(config.evaluation(), evaluation);
    }

    #[test]
    fn test_report_path() {
        assert_eq!(
            report_path("evals", "llava:13b", ReportFormat::Json),
            PathBuf::from("evals/llava_13b.json")
        );
        assert_eq!(
            report_path("evals", "loghi", ReportFormat::Yaml),
            PathBuf::from("evals/loghi.yaml")
        );
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ReportFormat::from_path(Path::new("a.yaml")), ReportFormat::Yaml);
        assert_eq!(ReportFormat::from_path(Path::new("a.YML")), ReportFormat::Yaml);
        assert_eq!(ReportFormat::from_path(Path::new("a.json")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(Path::new("report")), ReportFormat::Json);
    }

    #[test]
    fn test_save_and_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("loghi.yaml");
        let report = sample_report();

        report.save(&path, true).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("correct_words: 2"));
        assert!(text.contains("provider: external"));
        assert!(!text.trim_start().starts_with('{'));

        let loaded = EvalReport::load(&path).unwrap();
        assert_eq!(loaded.config, report.config);
        assert_eq!(loaded.results[0].identifier, "page1.txt");
        assert_eq!(loaded.results[0].metrics.substitutions, 1);
    }

    #[test]
    fn test_load_yaml_written_elsewhere() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gpt-4o.yaml");
        fs::write(
            &path,
            r#"config:
  model: gpt-4o
  prompt: Transcribe this page
  temperature: 0.2
  csv_path: rows.csv
  timestamp: 2025-01-01_00-00-00
results:
  - identifier: a.jpg
    image_path: images/a.jpg
    transcript_path: gt/a.txt
    public: true
    provider_response: hello world
    character_similarity: 0.5
    word_similarity: 0.5
    word_accuracy: 0.5
    word_error_rate: 0.5
    total_words_original: 2
    total_words_transcribed: 2
    correct_words: 1
    substitutions: 1
    deletions: 0
    insertions: 0
"#,
        )
        .unwrap();

        let report = EvalReport::load(&path).unwrap();
        assert_eq!(report.config.model, "gpt-4o");
        assert_eq!(report.config.temperature, 0.2);
        assert!(report.results[0].public);
        assert_eq!(report.results[0].metrics.correct_words, 1);
        assert_eq!(report.results[0].metrics.ignored_chars_count, 0);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "results: [unclosed").unwrap();
        assert!(matches!(
            EvalReport::load(&path),
            Err(EvalError::Yaml { .. })
        ));
    }

    #[test]
    fn test_summary() {
        let summary = sample_report().summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.substitutions, 1);
    }
}
