//! Logging utilities for table operations and progress tracking

pub mod log;
pub mod progress;

pub use log::{log_build_complete, log_operation_complete, log_operation_start, log_warning};
pub use progress::{StageProgress, create_stage_progress_bar};
