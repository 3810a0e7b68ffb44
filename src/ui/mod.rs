//! User interface module - progress and result output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Summaries built from workflow results

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_plain, display_series_written, display_success, display_warning,
};

use crate::cli::orchestration::WorkflowResult;

/// Prints the closing summary of a run.
pub fn display_summary(result: &WorkflowResult) {
    for warning in &result.warnings {
        display_warning(warning);
    }

    display_success(&format!(
        "Wrote {} series to {}",
        result.written.len(),
        result.output_dir.display()
    ));
}
