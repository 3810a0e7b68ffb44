use std::fmt;

/// Non-fatal issues found while selecting tags for a series.
/// These are reported to the user; the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionWarning {
    /// Tag passed the release filter but its components are not all numeric
    UnparsableTag { tag: String },
    /// No tag matched the requested series
    EmptySelection { series: String },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::UnparsableTag { tag } => {
                write!(f, "Skipping tag '{}': not a numeric version", tag)
            }
            SelectionWarning::EmptySelection { series } => {
                write!(
                    f,
                    "No tags selected for series '{}'; writing header only",
                    series
                )
            }
        }
    }
}
