use crate::error::{PatchSeriesError, Result};
use crate::git::{MessageFilter, Repository};
use crate::series::CountRecord;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
struct MockCommit {
    message: String,
    parents: Vec<usize>,
    timestamp: i64,
}

/// In-memory commit graph for testing without actual git operations
///
/// Commits are appended on a movable head; tags keep insertion order so
/// `list_tags` reproduces a repository-native listing.
pub struct MockRepository {
    commits: Vec<MockCommit>,
    tags: Vec<(String, usize)>,
    head: Option<usize>,
    clock: i64,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            head: None,
            clock: 1_500_000_000,
        }
    }

    /// Append a commit on top of the current head and return its id
    pub fn commit(&mut self, message: impl Into<String>) -> usize {
        let parents = self.head.into_iter().collect();
        self.push_commit(message.into(), parents)
    }

    /// Append `n` commits with the same message
    pub fn commits(&mut self, message: &str, n: usize) {
        for _ in 0..n {
            self.commit(message);
        }
    }

    /// Create a merge commit of the current head and `other`
    pub fn merge(&mut self, message: impl Into<String>, other: usize) -> usize {
        let parents = self.head.into_iter().chain(Some(other)).collect();
        self.push_commit(message.into(), parents)
    }

    /// Move the head to an existing commit, e.g. to start a side branch
    pub fn checkout(&mut self, id: usize) {
        self.head = Some(id);
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Tag the current head
    pub fn tag(&mut self, name: impl Into<String>) {
        if let Some(head) = self.head {
            self.tags.push((name.into(), head));
        }
    }

    /// Tag an arbitrary commit
    pub fn tag_at(&mut self, name: impl Into<String>, id: usize) {
        self.tags.push((name.into(), id));
    }

    fn push_commit(&mut self, message: String, parents: Vec<usize>) -> usize {
        self.clock += 3600;
        self.commits.push(MockCommit {
            message,
            parents,
            timestamp: self.clock,
        });
        let id = self.commits.len() - 1;
        self.head = Some(id);
        id
    }

    fn resolve(&self, version: &str) -> Result<usize> {
        self.tags
            .iter()
            .find(|(name, _)| name == version)
            .map(|(_, id)| *id)
            .ok_or_else(|| PatchSeriesError::version(format!("Unknown tag: {}", version)))
    }

    fn reachable(&self, from: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if seen.insert(id) {
                stack.extend(self.commits[id].parents.iter().copied());
            }
        }
        seen
    }

    fn count(
        &self,
        ids: impl Iterator<Item = usize>,
        filter: &MessageFilter,
        skip_merges: bool,
    ) -> Result<u64> {
        let regex = filter.regex()?;
        Ok(ids
            .map(|id| &self.commits[id])
            .filter(|c| !(skip_merges && c.parents.len() > 1))
            .filter(|c| regex.is_match(&c.message))
            .count() as u64)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.iter().map(|(name, _)| name.clone()).collect())
    }

    fn timestamp_of(&self, version: &str) -> Result<i64> {
        Ok(self.commits[self.resolve(version)?].timestamp)
    }

    fn count_matching(&self, version: &str, filter: &MessageFilter) -> Result<CountRecord> {
        let reachable = self.reachable(self.resolve(version)?);

        Ok(CountRecord {
            timestamp: self.timestamp_of(version)?,
            count: self.count(reachable.into_iter(), filter, true)?,
        })
    }

    fn count_matching_since(
        &self,
        version: &str,
        previous: &str,
        filter: &MessageFilter,
    ) -> Result<CountRecord> {
        let hidden = self.reachable(self.resolve(previous)?);
        let reachable = self.reachable(self.resolve(version)?);
        let range = reachable.into_iter().filter(|id| !hidden.contains(id));

        Ok(CountRecord {
            timestamp: self.timestamp_of(version)?,
            count: self.count(range, filter, false)?,
        })
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let ancestor = self.resolve(ancestor)?;
        Ok(self.reachable(self.resolve(descendant)?).contains(&ancestor))
    }
}

/// Mock whose answers are fixed per tag rather than derived from a graph
///
/// Useful when a test cares only about the arithmetic on top of the counts.
#[derive(Default)]
pub struct ScriptedRepository {
    tags: Vec<String>,
    absolute: HashMap<String, CountRecord>,
    incremental: HashMap<(String, String), CountRecord>,
}

impl ScriptedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_absolute(mut self, version: &str, timestamp: i64, count: u64) -> Self {
        self.tags.push(version.to_string());
        self.absolute
            .insert(version.to_string(), CountRecord { timestamp, count });
        self
    }

    pub fn with_incremental(mut self, previous: &str, version: &str, timestamp: i64, count: u64) -> Self {
        self.tags.push(version.to_string());
        self.incremental.insert(
            (previous.to_string(), version.to_string()),
            CountRecord { timestamp, count },
        );
        self
    }
}

impl Repository for ScriptedRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn timestamp_of(&self, version: &str) -> Result<i64> {
        self.absolute
            .get(version)
            .or_else(|| {
                self.incremental
                    .iter()
                    .find(|((_, v), _)| v == version)
                    .map(|(_, record)| record)
            })
            .map(|record| record.timestamp)
            .ok_or_else(|| PatchSeriesError::version(format!("Unknown tag: {}", version)))
    }

    fn count_matching(&self, version: &str, _filter: &MessageFilter) -> Result<CountRecord> {
        self.absolute
            .get(version)
            .copied()
            .ok_or_else(|| PatchSeriesError::version(format!("No absolute count for {}", version)))
    }

    fn count_matching_since(
        &self,
        version: &str,
        previous: &str,
        _filter: &MessageFilter,
    ) -> Result<CountRecord> {
        self.incremental
            .get(&(previous.to_string(), version.to_string()))
            .copied()
            .ok_or_else(|| {
                PatchSeriesError::version(format!("No count for {}..{}", previous, version))
            })
    }

    fn is_ancestor(&self, _ancestor: &str, _descendant: &str) -> Result<bool> {
        Ok(true)
    }
}
