//! Pre-flight safety checks
//!
//! Run once before any workflow step. The checks short-circuit on the first
//! failure; on success they yield the [`WorkflowContext`] the rest of the
//! program trusts for its lifetime.

use crate::error::{Error, Result};
use crate::history::CommitHistoryReader;
use crate::types::{PROTECTED_BRANCHES, WorkflowContext};
use crate::vcs::{VcsGateway, reports_ahead_of_remote};
use std::fmt;
use tracing::{debug, warn};

/// Non-fatal findings of the safety checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardWarning {
    /// Fewer than two commits are ahead of the divergence point
    NothingToSquash {
        /// Branch that was inspected
        branch: String,
        /// Number of commits found
        count: usize,
    },
}

impl fmt::Display for GuardWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToSquash { branch, count } => write!(
                f,
                "There is only {count} commit to be squashed on branch '{branch}'. Squashing is disabled!"
            ),
        }
    }
}

/// Outcome of a successful validation
#[derive(Debug, Clone)]
pub struct GuardReport {
    /// Branch identities for the rest of the run
    pub context: WorkflowContext,
    /// Findings that do not block the workflow
    pub warnings: Vec<GuardWarning>,
}

/// Pre-flight invariant checks
pub struct SafetyGuard<'a> {
    vcs: &'a dyn VcsGateway,
}

impl<'a> SafetyGuard<'a> {
    /// Create a guard over a repository
    pub fn new(vcs: &'a dyn VcsGateway) -> Self {
        Self { vcs }
    }

    /// Check that the repository may be worked on
    ///
    /// Order: clean tree, protected branch, same branch, squashable commit
    /// count (warning only), unpushed target.
    pub fn validate(&self, target_branch: &str, remote: &str) -> Result<GuardReport> {
        if !self.vcs.is_clean()? {
            return Err(Error::DirtyRepository);
        }

        let active = self.vcs.current_branch()?;
        if PROTECTED_BRANCHES.contains(&active.as_str()) {
            return Err(Error::ProtectedBranch(active));
        }
        if active == target_branch {
            return Err(Error::SameBranch(active));
        }

        let context = WorkflowContext::new(active, target_branch, remote);
        let mut warnings = Vec::new();

        let count = CommitHistoryReader::new(&context, self.vcs)
            .commits_to_squash()?
            .len();
        if count < 2 {
            warn!(count, branch = %context.active_branch, "nothing to squash");
            warnings.push(GuardWarning::NothingToSquash {
                branch: context.active_branch.clone(),
                count,
            });
        }

        if self.target_is_ahead(&context)? {
            return Err(Error::TargetBranchUnpushed(context.target_branch));
        }

        debug!(
            active = %context.active_branch,
            target = %context.target_branch,
            "safety checks passed"
        );
        Ok(GuardReport { context, warnings })
    }

    /// Inspect the target branch's status, then return to the active branch
    fn target_is_ahead(&self, ctx: &WorkflowContext) -> Result<bool> {
        self.vcs.checkout(&ctx.target_branch)?;
        let status = self.vcs.status();
        // restore before looking at the result, on both paths
        self.vcs.checkout(&ctx.active_branch)?;
        Ok(reports_ahead_of_remote(&status?))
    }
}
