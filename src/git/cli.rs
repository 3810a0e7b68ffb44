use crate::error::{PatchSeriesError, Result};
use crate::git::MessageFilter;
use crate::series::CountRecord;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Repository queries answered by running the `git` binary
///
/// Each query runs one `git` process in the repository directory and waits
/// for it. Any non-zero exit becomes [PatchSeriesError::GitCommand].
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        GitCli {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(command_error(args, &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn count_lines(&self, args: &[&str]) -> Result<u64> {
        Ok(self.run(args)?.lines().count() as u64)
    }
}

fn command_error(args: &[&str], output: &Output) -> PatchSeriesError {
    PatchSeriesError::GitCommand {
        command: args.join(" "),
        code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

impl super::Repository for GitCli {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .run(&["tag"])?
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn timestamp_of(&self, version: &str) -> Result<i64> {
        let stdout = self.run(&["log", version, "--pretty=format:%ad", "--date", "unix", "-1"])?;
        let raw = stdout.trim().trim_matches('\'');

        raw.parse::<i64>().map_err(|e| {
            PatchSeriesError::version(format!("Bad timestamp '{}' for '{}': {}", raw, version, e))
        })
    }

    fn count_matching(&self, version: &str, filter: &MessageFilter) -> Result<CountRecord> {
        let count = self.count_lines(&[
            "log",
            version,
            "--grep",
            filter.pattern(),
            "--oneline",
            "--no-merges",
        ])?;

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
        let range = format!("{}..{}", previous, version);
        let count = self.count_lines(&["log", &range, "--grep", filter.pattern(), "--oneline"])?;

        Ok(CountRecord {
            timestamp: self.timestamp_of(version)?,
            count,
        })
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let args = ["merge-base", "--is-ancestor", ancestor, descendant];
        let output = self.output(&args)?;

        // exit 1 means "not an ancestor"; anything else non-zero is a failure
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(command_error(&args, &output)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{Git2Repository, Repository};
    use git2::{Oid, Repository as Git2Repo, Signature, Time};

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn commit(repo: &Git2Repo, message: &str, time: i64, parents: &[Oid]) -> Oid {
        let sig = Signature::new("Test User", "test@example.com", &Time::new(time, 0)).unwrap();
        let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<_> = parents
            .iter()
            .map(|oid| repo.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();
        repo.commit(None, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn tag(repo: &Git2Repo, name: &str, oid: Oid) {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(name, &object, false).unwrap();
    }

    fn sample_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        let c1 = commit(&repo, "one\n\nReported-by: bot", 1_600_000_100, &[]);
        let c2 = commit(&repo, "two", 1_600_000_200, &[c1]);
        tag(&repo, "v1.0", c2);
        let side = commit(&repo, "side\n\nReported-by: bot", 1_600_000_300, &[c2]);
        let main = commit(&repo, "main", 1_600_000_400, &[c2]);
        let merge = commit(&repo, "merge\n\nReported-by: bot", 1_600_000_500, &[main, side]);
        tag(&repo, "v1.1", merge);

        dir
    }

    #[test]
    fn test_cli_matches_git2_backend() {
        if !git_available() {
            return;
        }
        let dir = sample_repo();
        let cli = GitCli::new(dir.path());
        let lib = Git2Repository::open(dir.path()).unwrap();
        let filter = MessageFilter::new("Reported-by: bot");

        let mut cli_tags = cli.list_tags().unwrap();
        let mut lib_tags = lib.list_tags().unwrap();
        cli_tags.sort();
        lib_tags.sort();
        assert_eq!(cli_tags, lib_tags);

        assert_eq!(cli.timestamp_of("v1.1").unwrap(), 1_600_000_500);
        assert_eq!(
            cli.count_matching("v1.1", &filter).unwrap(),
            lib.count_matching("v1.1", &filter).unwrap()
        );
        assert_eq!(
            cli.count_matching_since("v1.1", "v1.0", &filter).unwrap(),
            lib.count_matching_since("v1.1", "v1.0", &filter).unwrap()
        );
    }

    #[test]
    fn test_cli_merge_asymmetry() {
        if !git_available() {
            return;
        }
        let dir = sample_repo();
        let cli = GitCli::new(dir.path());
        let filter = MessageFilter::new("Reported-by: bot");

        // --no-merges drops the merge commit from the absolute count only
        assert_eq!(cli.count_matching("v1.1", &filter).unwrap().count, 2);
        assert_eq!(cli.count_matching_since("v1.1", "v1.0", &filter).unwrap().count, 2);
        assert_eq!(cli.count_matching("v1.0", &filter).unwrap().count, 1);
    }

    #[test]
    fn test_cli_is_ancestor() {
        if !git_available() {
            return;
        }
        let dir = sample_repo();
        let cli = GitCli::new(dir.path());
        assert!(cli.is_ancestor("v1.0", "v1.1").unwrap());
        assert!(!cli.is_ancestor("v1.1", "v1.0").unwrap());
    }

    #[test]
    fn test_cli_failure_is_fatal() {
        if !git_available() {
            return;
        }
        let dir = sample_repo();
        let cli = GitCli::new(dir.path());
        match cli.timestamp_of("v9.9") {
            Err(PatchSeriesError::GitCommand { code, .. }) => assert_ne!(code, 0),
            other => panic!("expected GitCommand error, got {:?}", other),
        }
    }
}
