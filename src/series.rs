//! Cumulative matching-commit counts over an ordered list of version tags.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PatchSeriesError, Result};
use crate::git::{MessageFilter, Repository};

/// Timestamp of a version's commit and the running count of matching commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRecord {
    pub timestamp: i64,
    pub count: u64,
}

/// One row of a series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesEntry {
    pub version: String,
    pub record: CountRecord,
}

/// Version-ordered mapping from tag to [CountRecord]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    entries: Vec<SeriesEntry>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, version: impl Into<String>, record: CountRecord) {
        self.entries.push(SeriesEntry {
            version: version.into(),
            record,
        });
    }

    pub fn get(&self, version: &str) -> Option<&CountRecord> {
        self.entries
            .iter()
            .find(|entry| entry.version == version)
            .map(|entry| &entry.record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running totals in series order
    pub fn counts(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.record.count).collect()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a SeriesEntry;
    type IntoIter = std::slice::Iter<'a, SeriesEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Options for [build_series]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildOptions {
    /// Check that each version's history contains its predecessor's
    pub verify_history: bool,
}

/// Builds a cumulative series over `versions`.
///
/// `versions` must be in increasing order, each tag built on top of the one
/// before it. That precondition is only checked when
/// [BuildOptions::verify_history] is set; otherwise a violation silently
/// produces wrong totals.
///
/// The first version contributes its absolute count (merges excluded); every
/// later version adds the count of `previous..version` (merges included).
pub fn build_series<R: Repository + ?Sized>(
    repo: &R,
    versions: &[String],
    filter: &MessageFilter,
    options: BuildOptions,
) -> Result<Series> {
    let mut series = Series::new();

    let Some((first, rest)) = versions.split_first() else {
        return Ok(series);
    };

    let mut running = repo.count_matching(first, filter)?;
    debug!("{}: {} (absolute)", first, running.count);
    series.push(first.clone(), running);

    let mut previous = first;
    for version in rest {
        if options.verify_history && !repo.is_ancestor(previous, version)? {
            return Err(PatchSeriesError::non_cumulative(previous, version));
        }

        let step = repo.count_matching_since(version, previous, filter)?;
        running = CountRecord {
            timestamp: step.timestamp,
            count: running.count + step.count,
        };
        debug!("{}: +{} -> {}", version, step.count, running.count);
        series.push(version.clone(), running);
        previous = version;
    }

    Ok(series)
}
