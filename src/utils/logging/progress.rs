//! Progress reporting for pipeline stages
//!
//! A run has a fixed number of stages (one per dimension plus the fact
//! table), so a bounded bar is used rather than a spinner.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for the stage progress bar
pub const DEFAULT_STAGE_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Create a stage progress bar with a standardized style
///
/// Falls back to the default bar style if the template fails to parse.
#[must_use]
pub fn create_stage_progress_bar(stages: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(stages);
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_STAGE_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Progress over pipeline stages that can be switched off entirely
#[derive(Debug, Clone)]
pub struct StageProgress {
    bar: ProgressBar,
}

impl StageProgress {
    /// Create a progress tracker; a hidden bar is used when `visible` is false
    #[must_use]
    pub fn new(stages: u64, visible: bool) -> Self {
        let bar = if visible {
            create_stage_progress_bar(stages, Some("building star schema"))
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Mark a stage as finished
    pub fn stage_done(&self, table: &str) {
        self.bar.set_message(format!("{table} done"));
        self.bar.inc(1);
    }

    /// Finish the bar with a completion message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
