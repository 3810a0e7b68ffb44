//! Main workflow orchestration logic
//!
//! Runs every requested series against one repository, in order: the
//! dot-zero series first, then one series per maintenance line. The first
//! failure aborts the run; files already written are left in place.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::boundary::SelectionWarning;
use crate::config::{load_lts_versions, Backend, Config};
use crate::error::Result;
use crate::git::{Git2Repository, GitCli, MessageFilter, Repository};
use crate::report::write_series;
use crate::selector::{dot_zero_versions, maintenance_line_versions, Selection};
use crate::series::{build_series, BuildOptions};
use crate::ui;

/// Suffix of the dot-zero series file (`<prefix>_zero.csv`).
pub const DOT_ZERO_SUFFIX: &str = "zero";

/// One CSV file produced by the workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenSeries {
    /// `zero` or the maintenance-line identifier
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
    /// Final cumulative count, `None` for an empty series
    pub total: Option<u64>,
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub output_dir: PathBuf,
    pub written: Vec<WrittenSeries>,
    pub warnings: Vec<SelectionWarning>,
}

/// Opens the configured backend on the repository at `path`.
pub fn open_repository(backend: Backend, path: &Path) -> Result<Box<dyn Repository>> {
    debug!("opening {} with {:?} backend", path.display(), backend);
    match backend {
        Backend::Git2 => Ok(Box::new(Git2Repository::open(path)?)),
        Backend::Cli => Ok(Box::new(GitCli::new(path))),
    }
}

/// Output path for a series: `<output_dir>/<prefix>_<suffix>.csv`
pub fn series_path(config: &Config, suffix: &str) -> PathBuf {
    config
        .output_dir
        .join(format!("{}_{}.csv", config.prefix, suffix))
}

/// Main series workflow
///
/// 1. Read the maintenance-line file
/// 2. List the repository's tags once
/// 3. Build and write the dot-zero series
/// 4. Build and write one series per maintenance line
///
/// Nothing is written if step 1 fails.
pub fn run_series_workflow<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
) -> Result<WorkflowResult> {
    ui::display_plain(&format!("prefix: {}", config.prefix));
    ui::display_plain(&format!("filter: {}", config.filter));

    let filter = MessageFilter::new(config.filter.as_str());
    let lines = load_lts_versions(&config.lts_file)?;
    info!("maintenance lines: {}", lines.join(" "));

    let tags = repo.list_tags()?;
    debug!("{} tags in repository", tags.len());

    let options = BuildOptions {
        verify_history: config.verify_history,
    };
    let mut result = WorkflowResult {
        output_dir: config.output_dir.clone(),
        written: Vec::new(),
        warnings: Vec::new(),
    };

    let selection = dot_zero_versions(&tags);
    write_selection(repo, config, &filter, options, DOT_ZERO_SUFFIX, selection, &mut result)?;

    for line in &lines {
        ui::display_plain(line);
        let selection = maintenance_line_versions(&tags, line);
        write_selection(repo, config, &filter, options, line, selection, &mut result)?;
    }

    Ok(result)
}

fn write_selection<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    filter: &MessageFilter,
    options: BuildOptions,
    name: &str,
    selection: Selection,
    result: &mut WorkflowResult,
) -> Result<()> {
    let series = build_series(repo, &selection.versions, filter, options)?;
    let path = series_path(config, name);
    write_series(&path, &series)?;

    let written = WrittenSeries {
        name: name.to_string(),
        path,
        rows: series.len(),
        total: series.counts().last().copied(),
    };
    ui::display_series_written(&written.path, written.rows, written.total);

    result.warnings.extend(selection.warnings);
    result.written.push(written);
    Ok(())
}
