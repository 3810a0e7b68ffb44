//! Pure formatting functions for UI output.
//!
//! Styling goes through `console`, which drops colors when the stream is not
//! a terminal.

use std::path::Path;

use console::style;

use crate::boundary::SelectionWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a progress line exactly as given, without styling.
///
/// Used for lines other tools may parse, e.g. `prefix: syzkaller`.
pub fn display_plain(message: &str) {
    println!("{}", message);
}

/// Display a selection warning to the user.
pub fn display_warning(warning: &SelectionWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Report one finished series file.
///
/// # Arguments
/// * `path` - The CSV file that was written
/// * `rows` - Number of data rows (header excluded)
/// * `total` - Final cumulative count, if the series is non-empty
pub fn display_series_written(path: &Path, rows: usize, total: Option<u64>) {
    let total = total
        .map(|t| format!(", {} matching commits", style(t).bold()))
        .unwrap_or_default();
    println!(
        "  {} {} ({} versions{})",
        style("wrote").dim(),
        style(path.display()).cyan(),
        rows,
        total
    );
}
