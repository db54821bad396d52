//! Evaluation configuration

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every evaluation in a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Literal markers for unreadable ground-truth text, tried in order
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Flatten both texts to a single line before comparing
    #[serde(default)]
    pub single_line: bool,
}

impl EvaluationConfig {
    /// Create a builder
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reject empty ignore patterns
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.ignore_patterns.iter().position(|p| p.is_empty()) {
            return Err(EvalError::Config(format!(
                "ignore pattern at index {index} is empty"
            )));
        }
        Ok(())
    }
}

/// Builder for [`EvaluationConfig`]
#[derive(Debug, Default)]
pub struct EvaluationConfigBuilder {
    config: EvaluationConfig,
}

impl EvaluationConfigBuilder {
    /// Append one ignore pattern
    pub fn ignore_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.ignore_patterns.push(pattern.into());
        self
    }

    /// Replace the ignore patterns
    pub fn ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.ignore_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable single-line normalization
    pub fn single_line(mut self, single_line: bool) -> Self {
        self.config.single_line = single_line;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EvaluationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = EvaluationConfig::default();
        assert!(config.ignore_patterns.is_empty());
        assert!(!config.single_line);
    }

    #[test]
    fn test_builder() {
        let config = EvaluationConfig::builder()
            .ignore_pattern("|")
            .ignore_pattern("[?]")
            .single_line(true)
            .build()
            .unwrap();
        assert_eq!(config.ignore_patterns, vec!["|", "[?]"]);
        assert!(config.single_line);
    }

    #[test]
    fn test_builder_replaces_patterns() {
        let config = EvaluationConfig::builder()
            .ignore_pattern("x")
            .ignore_patterns(["|", ","])
            .build()
            .unwrap();
        assert_eq!(config.ignore_patterns, vec!["|", ","]);
    }

    #[test]
    fn test_builder_rejects_empty_pattern() {
        let result = EvaluationConfig::builder()
            .ignore_pattern("|")
            .ignore_pattern("")
            .build();
        assert!(matches!(result, Err(EvalError::Config(msg)) if msg.contains("index 1")));
    }

    #[test]
    fn test_from_toml_str() {
        let config = EvaluationConfig::from_toml_str(
            r#"
ignore_patterns = ["|", "[?]"]
single_line = true
"#,
        )
        .unwrap();
        assert_eq!(config.ignore_patterns, vec!["|", "[?]"]);
        assert!(config.single_line);
    }

    #[test]
    fn test_from_toml_str_defaults_missing_fields() {
        let config = EvaluationConfig::from_toml_str("").unwrap();
        assert_eq!(config, EvaluationConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ignore_patterns = [\"|\"]").unwrap();

        let config = EvaluationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.ignore_patterns, vec!["|"]);
    }

    #[test]
    fn test_from_missing_file() {
        let result = EvaluationConfig::from_file("/nonexistent/eval.toml");
        assert!(matches!(result, Err(EvalError::Io { .. })));
    }
}
