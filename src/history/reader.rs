//! Reading the commits unique to the active branch

use crate::error::{Error, Result};
use crate::types::{CommitMessage, CommitSequence, WorkflowContext};
use crate::vcs::VcsGateway;
use tracing::debug;

/// Reads the commit sequence between the divergence point and the branch tip
///
/// Nothing is cached: squash and rebase rewrite history, so every call
/// reads from the repository again.
pub struct CommitHistoryReader<'a> {
    ctx: &'a WorkflowContext,
    vcs: &'a dyn VcsGateway,
}

impl<'a> CommitHistoryReader<'a> {
    /// Create a reader for the context's branches
    pub fn new(ctx: &'a WorkflowContext, vcs: &'a dyn VcsGateway) -> Self {
        Self { ctx, vcs }
    }

    /// Hash of the oldest commit on the active branch that the target lacks
    pub fn divergence_point(&self) -> Result<String> {
        let mut hashes = self.unique_hashes()?;
        hashes.pop().ok_or_else(|| self.not_found())
    }

    /// Commits to fold into one, newest first, divergence point included
    pub fn commits_to_squash(&self) -> Result<CommitSequence> {
        let hashes = self.unique_hashes()?;
        let count = hashes.len();
        let first = hashes.last().cloned().ok_or_else(|| self.not_found())?;
        let log = self.vcs.commit_log(&self.ctx.active_branch, count)?;

        let mut commits = Vec::with_capacity(log.len());
        for commit in log {
            commits.push(CommitMessage::parse(&commit.message));
            if commit.hash.starts_with(&first) || first.starts_with(&commit.hash) {
                break;
            }
        }
        debug!(count = commits.len(), divergence_point = %first, "collected commits to squash");
        Ok(commits)
    }

    /// Hashes in `target..active`, newest first; never empty
    fn unique_hashes(&self) -> Result<Vec<String>> {
        let hashes = self
            .vcs
            .log_range(&self.ctx.target_branch, &self.ctx.active_branch)
            .map_err(|e| {
                debug!(error = %e, "log between target and active branch failed");
                self.not_found()
            })?;
        if hashes.is_empty() {
            return Err(self.not_found());
        }
        Ok(hashes)
    }

    fn not_found(&self) -> Error {
        Error::DivergencePointNotFound(self.ctx.target_branch.clone())
    }
}
