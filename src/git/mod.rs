//! Git query abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only history
//! queries patch-series needs, so that series accumulation and tag selection
//! can run against real repositories and in-memory fixtures alike.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: walks history in-process with the `git2` crate
//! - [cli::GitCli]: shells out to the `git` binary
//! - [mock::MockRepository]: an in-memory commit graph for testing
//!
//! ```rust
//! # use patch_series::git::{MessageFilter, Repository};
//! # fn example<R: Repository>(repo: &R) -> patch_series::Result<()> {
//! let filter = MessageFilter::new("syzkaller.appspotmail.com");
//! let first = repo.count_matching("v5.10", &filter)?;
//! let next = repo.count_matching_since("v5.11", "v5.10", &filter)?;
//! println!("{} + {}", first.count, next.count);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod filter;
pub mod mock;
pub mod repository;

pub use cli::GitCli;
pub use filter::MessageFilter;
pub use mock::{MockRepository, ScriptedRepository};
pub use repository::Git2Repository;

use crate::error::Result;
use crate::series::CountRecord;

/// Read-only history queries over version tags
///
/// ## Error Handling
///
/// Every failure is fatal to the run: implementations never retry and never
/// return partial results. Underlying errors map to
/// [crate::error::PatchSeriesError] variants.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository)
/// - [GitCli](cli::GitCli)
/// - [MockRepository](mock::MockRepository)
pub trait Repository {
    /// List every tag, in repository-native order
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Unix timestamp (author date) of the commit the tag points to
    fn timestamp_of(&self, version: &str) -> Result<i64>;

    /// Count non-merge commits reachable from `version` whose message matches
    ///
    /// Merge commits are excluded here but included by
    /// [Repository::count_matching_since].
    fn count_matching(&self, version: &str, filter: &MessageFilter) -> Result<CountRecord>;

    /// Count matching commits in `previous..version`, merges included
    fn count_matching_since(
        &self,
        version: &str,
        previous: &str,
        filter: &MessageFilter,
    ) -> Result<CountRecord>;

    /// Whether `ancestor`'s commit is reachable from `descendant`'s commit
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool>;
}
