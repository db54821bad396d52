//! Reusable evaluator for single pairs and whole batches

use crate::config::EvaluationConfig;
use crate::error::Result;
use crate::metrics::{evaluate, AccuracyMetrics, EvaluationInput};

#[cfg(feature = "parallel")]
use crate::error::EvalError;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates ground-truth/transcription pairs with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    /// Create an evaluator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with a validated configuration
    pub fn with_config(config: EvaluationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate one pair
    pub fn evaluate(&self, ground_truth: &str, transcription: &str) -> AccuracyMetrics {
        evaluate(&EvaluationInput::new(
            ground_truth,
            transcription,
            &self.config,
        ))
    }

    /// Evaluate pairs one after another, preserving order
    pub fn evaluate_sequential<G, T>(&self, pairs: &[(G, T)]) -> Vec<AccuracyMetrics>
    where
        G: AsRef<str>,
        T: AsRef<str>,
    {
        log::debug!("evaluating {} pairs sequentially", pairs.len());
        pairs
            .iter()
            .map(|(gt, trans)| self.evaluate(gt.as_ref(), trans.as_ref()))
            .collect()
    }

    /// Evaluate pairs on a dedicated worker pool, preserving order.
    ///
    /// `threads` of `None` uses one worker per CPU.
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel<G, T>(
        &self,
        pairs: &[(G, T)],
        threads: Option<usize>,
    ) -> Result<Vec<AccuracyMetrics>>
    where
        G: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        let threads = threads.unwrap_or_else(num_cpus::get).max(1);
        log::debug!("evaluating {} pairs on {threads} threads", pairs.len());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| EvalError::ParallelError(e.to_string()))?;

        Ok(pool.install(|| {
            pairs
                .par_iter()
                .map(|(gt, trans)| self.evaluate(gt.as_ref(), trans.as_ref()))
                .collect()
        }))
    }

    /// Evaluate a batch, going parallel only when it is worth it.
    ///
    /// Falls back to sequential evaluation for batches smaller than
    /// `parallel_threshold` or when the `parallel` feature is disabled.
    pub fn evaluate_batch<G, T>(
        &self,
        pairs: &[(G, T)],
        threads: Option<usize>,
        parallel_threshold: usize,
    ) -> Result<Vec<AccuracyMetrics>>
    where
        G: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        #[cfg(feature = "parallel")]
        if pairs.len() >= parallel_threshold && threads != Some(1) {
            return self.evaluate_parallel(pairs, threads);
        }

        #[cfg(not(feature = "parallel"))]
        let _ = (threads, parallel_threshold);

        Ok(self.evaluate_sequential(pairs))
    }
}
