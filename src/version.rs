use std::cmp::Ordering;
use std::fmt;

/// Numeric components of a version tag, with any single-character prefix removed.
///
/// Ordering is lexicographic over the components: the leading components are
/// compared as integers, and when one version runs out of components first it
/// sorts before the longer one (`5.10` < `5.10.2` < `5.11`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    components: Vec<u64>,
}

impl VersionKey {
    /// Parses a tag such as `v5.10.2` into `[5, 10, 2]`.
    ///
    /// Returns `None` when any dot-separated component is not a plain number
    /// (`v5.10-rc1`, `v2.6.11-tree`). An empty tag parses as `[0]`.
    pub fn parse(tag: &str) -> Option<Self> {
        let components = split_components(tag)
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        Some(VersionKey { components })
    }

    /// Like [`VersionKey::parse`], but never fails.
    ///
    /// A malformed component falls back to its leading digits, or `0` if it has
    /// none. The resulting position of a malformed tag is deterministic but
    /// carries no meaning.
    pub fn from_tag_lossy(tag: &str) -> Self {
        let components = split_components(tag)
            .map(|part| {
                let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u64>().unwrap_or(0)
            })
            .collect();
        VersionKey { components }
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Removes a single leading non-digit marker (`v5.10` -> `5.10`).
pub fn strip_prefix(tag: &str) -> &str {
    match tag.chars().next() {
        Some(first) if !first.is_ascii_digit() => &tag[first.len_utf8()..],
        _ => tag,
    }
}

fn split_components(tag: &str) -> impl Iterator<Item = &str> {
    let stripped = strip_prefix(tag);
    let body = if stripped.is_empty() { "0" } else { stripped };
    body.split('.')
}

/// Comparator over version tag strings, usable with `sort_by`.
///
/// Tags must be pre-filtered to plain numeric versions; anything else is
/// ordered via [`VersionKey::from_tag_lossy`].
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionKey::from_tag_lossy(a).cmp(&VersionKey::from_tag_lossy(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_prefix() {
        let key = VersionKey::parse("v5.10.2").unwrap();
        assert_eq!(key.components(), &[5, 10, 2]);
    }

    #[test]
    fn test_parse_without_prefix() {
        let key = VersionKey::parse("4.19").unwrap();
        assert_eq!(key.components(), &[4, 19]);
    }

    #[test]
    fn test_parse_empty_is_zero() {
        assert_eq!(VersionKey::parse("").unwrap().components(), &[0]);
        assert_eq!(VersionKey::parse("v").unwrap().components(), &[0]);
    }

    #[test]
    fn test_parse_rejects_suffixes() {
        assert_eq!(VersionKey::parse("v5.10-rc1"), None);
        assert_eq!(VersionKey::parse("v2.6.11-tree"), None);
        assert_eq!(VersionKey::parse("vv5.10"), None);
    }

    #[test]
    fn test_lossy_uses_leading_digits() {
        assert_eq!(VersionKey::from_tag_lossy("v5.10-rc1").components(), &[5, 10]);
        assert_eq!(VersionKey::from_tag_lossy("v5.x").components(), &[5, 0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(VersionKey::parse("v5.10.2").unwrap().to_string(), "5.10.2");
    }

    #[test]
    fn test_smaller_leading_component_sorts_first() {
        for (a, b) in [("v3.19", "v4.0"), ("v4.20", "v5.0"), ("v9", "v10"), ("1.99.99", "2")] {
            assert_eq!(compare_versions(a, b), Ordering::Less, "{} < {}", a, b);
            assert_eq!(compare_versions(b, a), Ordering::Greater, "{} > {}", b, a);
        }
    }

    #[test]
    fn test_shorter_version_sorts_before_longer() {
        assert_eq!(compare_versions("v5.10", "v5.10.2"), Ordering::Less);
        assert_eq!(compare_versions("v5", "v5.0"), Ordering::Less);
    }

    #[test]
    fn test_equal_versions() {
        assert_eq!(compare_versions("v5.10.2", "v5.10.2"), Ordering::Equal);
        assert_eq!(compare_versions("v5.10", "5.10"), Ordering::Equal);
        assert_eq!(compare_versions("", "v"), Ordering::Equal);
    }

    #[test]
    fn test_reference_order() {
        let expected = vec!["v4.9", "v4.9.1", "v4.10", "v5.0", "v5.0.1"];
        let mut tags = vec!["v5.0.1", "v4.10", "v4.9.1", "v5.0", "v4.9"];
        tags.sort_by(|a, b| compare_versions(a, b));
        assert_eq!(tags, expected);

        for pair in expected.windows(2) {
            assert_eq!(compare_versions(pair[0], pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn test_numeric_not_lexical() {
        assert_eq!(compare_versions("v4.9.10", "v4.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("v4.14", "v4.4"), Ordering::Greater);
    }
}
