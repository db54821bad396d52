//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const LOADING_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows loaded {msg}";

/// Progress over reading each row's files, ahead of batch evaluation
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize the progress bar for loading `total_rows` rows
    pub fn init_loading(&mut self, total_rows: u64) {
        if self.quiet || total_rows == 0 {
            return;
        }

        let pb = ProgressBar::new(total_rows);
        let style = match ProgressStyle::default_bar().template(LOADING_TEMPLATE) {
            Ok(style) => style.progress_chars("##-"),
            Err(e) => {
                log::debug!("Falling back to default progress style: {e}");
                ProgressStyle::default_bar()
            }
        };
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Advance past a row, whether or not its files could be read
    pub fn row_loaded(&self, identifier: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Loading: {identifier}"));
            pb.inc(1);
        }
    }

    /// Finish progress reporting; evaluation starts after this
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Loaded, evaluating");
        }
    }
}
