//! Accuracy evaluation for OCR and handwritten text recognition
//!
//! This crate turns a ground-truth transcript and a machine transcription into
//! character and word level accuracy metrics. Ground truth may mark text the
//! labeler could not read; those markers are aligned away on both sides before
//! anything is scored.
//!
//! # Pipeline
//!
//! 1. **Normalize**: optionally flatten both texts to a single line
//! 2. **Align ignore patterns**: drop markers from the ground truth and skip
//!    the masked word or character in the transcription
//! 3. **Score characters**: Levenshtein similarity and character accuracy
//! 4. **Score words**: word-level alignment classifying every edit
//!
//! Every step is a pure function; evaluation never fails.
//!
//! # Example
//!
//! ```rust
//! use htr_eval_core::{EvaluationConfig, Evaluator};
//!
//! let config = EvaluationConfig::builder()
//!     .ignore_pattern("|")
//!     .build()
//!     .unwrap();
//! let evaluator = Evaluator::with_config(config).unwrap();
//!
//! let metrics = evaluator.evaluate("hello | world", "hello foo world");
//! assert_eq!(metrics.word_accuracy, 1.0);
//! assert_eq!(metrics.ignored_chars_count, 1);
//! ```

pub mod batch;
pub mod config;
pub mod distance;
pub mod error;
pub mod evaluator;
pub mod ignore;
pub mod metrics;
pub mod normalize;
pub mod report;
pub mod words;

pub use batch::BatchSummary;
pub use config::{EvaluationConfig, EvaluationConfigBuilder};
pub use distance::{character_accuracy, levenshtein, similarity};
pub use error::{EvalError, Result};
pub use evaluator::Evaluator;
pub use ignore::{align, ProcessedPair};
pub use metrics::{evaluate, evaluate_text, AccuracyMetrics, EvaluationInput};
pub use normalize::normalize;
pub use report::{EvalReport, EvalResult, ReportFormat, RunConfig};
pub use words::{align_words, tokenize, WordAlignment};
