use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PatchSeriesError, Result};

/// Name of the config file searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "patchseries.toml";

/// Which implementation answers repository queries.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-process history walk via libgit2
    #[default]
    Git2,
    /// Shell out to the `git` binary
    Cli,
}

/// Represents the complete configuration for patch-series.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Commit message filter handed to `git log --grep`
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Output file name prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// File listing maintenance-line identifiers
    #[serde(default = "default_lts_file")]
    pub lts_file: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub backend: Backend,

    /// Fail when consecutive tags do not build on each other
    #[serde(default)]
    pub verify_history: bool,
}

fn default_filter() -> String {
    "syzkaller.appspotmail.com".to_string()
}

fn default_prefix() -> String {
    "syzkaller".to_string()
}

fn default_lts_file() -> PathBuf {
    PathBuf::from("lts_versions")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            filter: default_filter(),
            prefix: default_prefix(),
            lts_file: default_lts_file(),
            output_dir: default_output_dir(),
            backend: Backend::default(),
            verify_history: false,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `patchseries.toml` in current directory
/// 3. `.patchseries.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            PatchSeriesError::config(format!("Cannot read {}: {}", path.display(), e))
        })?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

/// Reads whitespace-separated maintenance-line identifiers (e.g. `5.10 5.4 4.19`).
///
/// A missing file is a configuration error.
pub fn load_lts_versions<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        PatchSeriesError::config(format!(
            "Cannot read maintenance lines from {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(content.split_whitespace().map(str::to_string).collect())
}
