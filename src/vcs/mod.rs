//! Version-control gateway
//!
//! Typed interface over the git operations the workflow consumes. Each
//! operation takes structured arguments; nothing is assembled into a
//! shell string.

mod git;

pub use git::GitCli;

use crate::error::Result;
use crate::types::{IntegrationOutcome, RawCommit};

/// Flags for a merge invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeFlags {
    /// Stop before creating the merge commit (`--no-commit`)
    pub no_commit: bool,
    /// Always create a merge commit (`--no-ff`)
    pub no_fast_forward: bool,
    /// Open the editor on the merge commit message (`--edit`)
    pub edit: bool,
}

impl MergeFlags {
    /// Trial merge used by the conflict probe
    pub const fn trial() -> Self {
        Self {
            no_commit: true,
            no_fast_forward: true,
            edit: false,
        }
    }

    /// Final merge of a finished branch
    pub const fn finish() -> Self {
        Self {
            no_commit: false,
            no_fast_forward: true,
            edit: true,
        }
    }
}

/// Gateway trait for version-control operations
///
/// Abstracts the external tool so the workflow can be exercised against
/// a test double.
pub trait VcsGateway {
    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Whether there are no modified tracked files and no untracked files
    fn is_clean(&self) -> Result<bool>;

    /// Human-readable status of the checked-out branch
    fn status(&self) -> Result<String>;

    /// Switch to a branch
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Pull the checked-out branch from its upstream
    fn pull(&self) -> Result<String>;

    /// Hashes of commits reachable from `tip` but not from `base`, newest first
    fn log_range(&self, base: &str, tip: &str) -> Result<Vec<String>>;

    /// Walk history of `branch` newest first, returning at most `limit` commits
    fn commit_log(&self, branch: &str, limit: usize) -> Result<Vec<RawCommit>>;

    /// Move the branch pointer back by `count` commits, keeping changes staged
    fn reset_soft(&self, count: usize) -> Result<()>;

    /// Create a commit from the staged changes
    fn commit(&self, subject: &str, body: &str) -> Result<()>;

    /// Rebase the checked-out branch onto `onto`
    fn rebase(&self, onto: &str) -> Result<IntegrationOutcome>;

    /// Merge `branch` into the checked-out branch
    fn merge(&self, branch: &str, flags: MergeFlags) -> Result<IntegrationOutcome>;

    /// Abort an in-progress merge
    fn merge_abort(&self) -> Result<()>;

    /// Roll back a failed merge, keeping unrelated local changes
    fn reset_merge(&self) -> Result<()>;

    /// Delete `branch` on `remote`
    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Force-delete a local branch
    fn delete_local_branch(&self, branch: &str) -> Result<()>;
}

/// Whether `git status` output says the branch has unpushed commits
pub fn reports_ahead_of_remote(status: &str) -> bool {
    status.contains("Your branch is ahead of ")
}
