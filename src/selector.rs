//! Selection of the tag subsets that feed a series.
//!
//! Both selections start from [release_tags] and end sorted by
//! [compare_versions]. Tags that would reach the comparator without a plain
//! numeric form are dropped and reported instead.

use log::debug;

use crate::boundary::SelectionWarning;
use crate::version::{compare_versions, strip_prefix, VersionKey};

/// Markers of tags that never belong to a series: release candidates and
/// the pre-git `v2.x` line.
const EXCLUDED_MARKERS: [&str; 2] = ["-rc", "v2"];

/// Tags selected for one series, plus anything skipped along the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub versions: Vec<String>,
    pub warnings: Vec<SelectionWarning>,
}

/// Drops release candidates and `v2` tags, keeping repository order
pub fn release_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| !EXCLUDED_MARKERS.iter().any(|marker| tag.contains(marker)))
        .cloned()
        .collect()
}

/// Whether a tag is shaped like `major.minor` (or a bare `major`)
pub fn is_dot_zero(tag: &str) -> bool {
    tag.matches('.').count() < 2
}

/// Whether a tag belongs to the maintenance line `line`
///
/// The line's own tag counts, as does every `<line>.N` patch release. Any
/// single-character prefix is ignored on both sides.
pub fn in_maintenance_line(tag: &str, line: &str) -> bool {
    let tag = strip_prefix(tag);
    let line = strip_prefix(line);

    tag == line
        || tag
            .strip_prefix(line)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Dot-zero releases in version order
pub fn dot_zero_versions(tags: &[String]) -> Selection {
    let candidates: Vec<String> = release_tags(tags)
        .into_iter()
        .filter(|tag| is_dot_zero(tag))
        .collect();

    sorted_selection(candidates, "zero")
}

/// Every tag of a maintenance line in version order
pub fn maintenance_line_versions(tags: &[String], line: &str) -> Selection {
    let candidates: Vec<String> = release_tags(tags)
        .into_iter()
        .filter(|tag| in_maintenance_line(tag, line))
        .collect();

    sorted_selection(candidates, line)
}

fn sorted_selection(candidates: Vec<String>, series: &str) -> Selection {
    let mut warnings = Vec::new();
    let mut versions = Vec::with_capacity(candidates.len());

    for tag in candidates {
        if VersionKey::parse(&tag).is_some() {
            versions.push(tag);
        } else {
            debug!("series {}: dropping unparsable tag {}", series, tag);
            warnings.push(SelectionWarning::UnparsableTag { tag });
        }
    }

    versions.sort_by(|a, b| compare_versions(a, b));

    if versions.is_empty() {
        warnings.push(SelectionWarning::EmptySelection {
            series: series.to_string(),
        });
    }
    debug!("series {}: {} tags selected", series, versions.len());

    Selection { versions, warnings }
}
