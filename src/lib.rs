pub mod boundary;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod report;
pub mod selector;
pub mod series;
pub mod ui;
pub mod version;

pub use error::{PatchSeriesError, Result};
