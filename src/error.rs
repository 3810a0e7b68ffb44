use thiserror::Error;

/// Unified error type for patch-series operations
#[derive(Error, Debug)]
pub enum PatchSeriesError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("git {command} exited with code {code}: {stderr}")]
    GitCommand {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid commit filter: {0}")]
    Filter(#[from] regex::Error),

    #[error("Tag '{version}' does not contain the history of '{previous}'")]
    NonCumulativeHistory { previous: String, version: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config file parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in patch-series
pub type Result<T> = std::result::Result<T, PatchSeriesError>;

impl PatchSeriesError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PatchSeriesError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        PatchSeriesError::Version(msg.into())
    }

    /// Create a non-cumulative history error for a pair of consecutive tags
    pub fn non_cumulative(previous: impl Into<String>, version: impl Into<String>) -> Self {
        PatchSeriesError::NonCumulativeHistory {
            previous: previous.into(),
            version: version.into(),
        }
    }
}
