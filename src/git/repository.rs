use crate::error::{PatchSeriesError, Result};
use crate::git::MessageFilter;
use crate::series::CountRecord;
use git2::{Oid, Repository as Git2Repo};
use log::debug;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Resolve a tag (lightweight or annotated) to the commit it points at
    fn commit_oid(&self, version: &str) -> Result<Oid> {
        let reference_name = format!("refs/tags/{}", version);
        let object = match self.repo.find_reference(&reference_name) {
            Ok(reference) => reference.peel(git2::ObjectType::Commit)?,
            Err(e) if e.code() == git2::ErrorCode::NotFound => self
                .repo
                .revparse_single(version)
                .and_then(|obj| obj.peel(git2::ObjectType::Commit))
                .map_err(|e| {
                    PatchSeriesError::version(format!("Cannot resolve '{}': {}", version, e))
                })?,
            Err(e) => return Err(e.into()),
        };

        Ok(object.id())
    }

    fn count_walk(
        &self,
        include: Oid,
        exclude: Option<Oid>,
        filter: &MessageFilter,
        skip_merges: bool,
    ) -> Result<u64> {
        let regex = filter.regex()?;
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(include)?;
        if let Some(exclude) = exclude {
            revwalk.hide(exclude)?;
        }

        let mut count = 0;
        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;

            if skip_merges && commit.parent_count() > 1 {
                continue;
            }

            let message = String::from_utf8_lossy(commit.message_bytes());
            if regex.is_match(&message) {
                count += 1;
            }
        }

        Ok(count)
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn timestamp_of(&self, version: &str) -> Result<i64> {
        let commit = self.repo.find_commit(self.commit_oid(version)?)?;

        let seconds = commit.author().when().seconds();
        Ok(seconds)
    }

    fn count_matching(&self, version: &str, filter: &MessageFilter) -> Result<CountRecord> {
        let oid = self.commit_oid(version)?;
        let count = self.count_walk(oid, None, filter, true)?;
        debug!("{}: {} matching non-merge commits", version, count);

        Ok(CountRecord {
            timestamp: self.timestamp_of(version)?,
            count,
        })
    }

    fn count_matching_since(
        &self,
        version: &str,
        previous: &str,
        filter: &MessageFilter,
    ) -> Result<CountRecord> {
        let oid = self.commit_oid(version)?;
        let previous_oid = self.commit_oid(previous)?;
        let count = self.count_walk(oid, Some(previous_oid), filter, false)?;
        debug!("{}..{}: {} matching commits", previous, version, count);

        Ok(CountRecord {
            timestamp: self.timestamp_of(version)?,
            count,
        })
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let ancestor_oid = self.commit_oid(ancestor)?;
        let descendant_oid = self.commit_oid(descendant)?;
        if ancestor_oid == descendant_oid {
            return Ok(true);
        }

        Ok(self
            .repo
            .graph_descendant_of(descendant_oid, ancestor_oid)?)
    }
}
