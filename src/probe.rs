//! Non-destructive conflict probe
//!
//! Tries the merge into the target branch without committing it, then
//! aborts it and puts the repository back on the active branch.

use crate::error::{Error, Result};
use crate::interaction::Interaction;
use crate::types::{IntegrationOutcome, WorkflowContext};
use crate::vcs::{MergeFlags, VcsGateway};
use tracing::debug;

/// Result of a trial merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// Merging would succeed without conflicts
    Clean,
    /// Merging would stop on conflicts
    WouldConflict,
}

/// Trial merge of the active branch into the target branch
pub struct ConflictProbe<'a> {
    ctx: &'a WorkflowContext,
    vcs: &'a dyn VcsGateway,
    io: &'a dyn Interaction,
}

impl<'a> ConflictProbe<'a> {
    /// Create a probe
    pub fn new(ctx: &'a WorkflowContext, vcs: &'a dyn VcsGateway, io: &'a dyn Interaction) -> Self {
        Self { ctx, vcs, io }
    }

    /// Run the trial merge
    ///
    /// On conflict the half-merged tree is left in place until the operator
    /// acknowledges, so it can be inspected. Cleanup runs on every path,
    /// including when the acknowledgement is interrupted.
    pub fn probe(&self) -> Result<ProbeResult> {
        self.vcs.checkout(&self.ctx.target_branch)?;

        let result = match self.vcs.merge(&self.ctx.active_branch, MergeFlags::trial()) {
            Ok(IntegrationOutcome::Clean) => Ok(ProbeResult::Clean),
            Ok(IntegrationOutcome::Conflict) => {
                self.io.on_warning("Squash/merge will lead to conflicts!");
                self.io
                    .acknowledge(
                        "You can inspect your working directory and accept with Return. \
                         The test merge will be reverted then!",
                    )
                    .map(|()| ProbeResult::WouldConflict)
            }
            Ok(IntegrationOutcome::Incomplete) => {
                Err(Error::MergeIncomplete(self.ctx.target_branch.clone()))
            }
            Err(e) => Err(e),
        };

        let restored = self.cleanup();
        let result = result?;
        restored?;
        debug!(?result, "conflict probe finished");
        Ok(result)
    }

    /// Discard the trial merge and return to the active branch
    fn cleanup(&self) -> Result<()> {
        if let Err(e) = self.vcs.merge_abort() {
            // an up-to-date merge leaves nothing to abort
            debug!(error = %e, "no merge to abort");
        }
        self.vcs.checkout(&self.ctx.active_branch)
    }
}
