//! Workflow engine - effectful command execution
//!
//! Runs the commands produced by [`parse_input`] against the repository.
//! Each step reports a [`StepOutcome`]; batches and the composite finish
//! command stop at the first step that does not continue.

use crate::editor::{SubjectEditor, SubjectPrompt};
use crate::error::{Error, Result};
use crate::history::{CommitHistoryReader, synthesize};
use crate::interaction::Interaction;
use crate::probe::{ConflictProbe, ProbeResult};
use crate::types::{DeletionChoice, IntegrationOutcome, WorkflowContext};
use crate::vcs::{MergeFlags, VcsGateway};
use crate::workflow::command::{Command, FINISH_SEQUENCE, StepOutcome, parse_input};
use tracing::debug;

/// Dispatcher for the command vocabulary
pub struct WorkflowEngine<'a> {
    ctx: &'a WorkflowContext,
    vcs: &'a dyn VcsGateway,
    editor: &'a dyn SubjectEditor,
    io: &'a dyn Interaction,
}

impl<'a> WorkflowEngine<'a> {
    /// Create an engine over fixed branch identities
    pub fn new(
        ctx: &'a WorkflowContext,
        vcs: &'a dyn VcsGateway,
        editor: &'a dyn SubjectEditor,
        io: &'a dyn Interaction,
    ) -> Self {
        Self {
            ctx,
            vcs,
            editor,
            io,
        }
    }

    /// Branch identities this engine works on
    pub const fn context(&self) -> &WorkflowContext {
        self.ctx
    }

    /// Run a line of operator input (e.g. `"126"`) as a batch
    ///
    /// An unrecognized character is reported and halts the batch after the
    /// commands preceding it have run.
    pub fn run_input(&self, input: &str) -> Result<StepOutcome> {
        let parsed = parse_input(input);
        let outcome = self.run_batch(&parsed.commands)?;
        if outcome != StepOutcome::Continue {
            return Ok(outcome);
        }
        if let Some(c) = parsed.unrecognized {
            self.io.on_warning(&format!("Unrecognized command: {c}"));
            return Ok(StepOutcome::Abort);
        }
        Ok(StepOutcome::Continue)
    }

    /// Run commands in order, stopping at the first abort or exit
    pub fn run_batch(&self, commands: &[Command]) -> Result<StepOutcome> {
        for &command in commands {
            match self.execute(command)? {
                StepOutcome::Continue => {}
                stop => return Ok(stop),
            }
        }
        Ok(StepOutcome::Continue)
    }

    /// Run a single command
    pub fn execute(&self, command: Command) -> Result<StepOutcome> {
        debug!(%command, read_only = command.is_read_only(), "executing command");
        match command {
            Command::FinishBranch => self.run_batch(&FINISH_SEQUENCE),
            Command::PullTarget => self.pull_target(),
            Command::Rebase => self.rebase(),
            Command::Squash => self.squash(),
            Command::Merge => self.merge(),
            Command::DeleteBranch => self.delete_branch(),
            Command::ListCommits => self.list_commits(),
            Command::ProbeConflicts => self.probe_conflicts(),
            Command::Exit => Ok(StepOutcome::Exit),
        }
    }

    /// Pull the target branch, then switch back to the active branch
    ///
    /// A failing pull (e.g. no upstream configured) is reported and the
    /// batch continues.
    pub fn pull_target(&self) -> Result<StepOutcome> {
        let target = &self.ctx.target_branch;
        self.io.on_step_start(&format!("Pulling '{target}'..."));
        self.vcs.checkout(target)?;
        let pulled = self.vcs.pull();
        self.vcs.checkout(&self.ctx.active_branch)?;
        match pulled {
            Ok(_) => self.io.on_step_done(&format!("Pulled '{target}'")),
            Err(e) => {
                debug!(error = %e, "pull failed");
                self.io
                    .on_warning(&format!("Pulling '{target}' failed, continuing: {e}"));
            }
        }
        Ok(StepOutcome::Continue)
    }

    /// Rebase the active branch onto the target branch
    ///
    /// Conflicts are fatal and left in place for manual resolution.
    pub fn rebase(&self) -> Result<StepOutcome> {
        let target = &self.ctx.target_branch;
        self.io.on_step_start(&format!(
            "Rebasing '{}' onto '{target}'...",
            self.ctx.active_branch
        ));
        self.vcs.checkout(&self.ctx.active_branch)?;
        match self.vcs.rebase(target)? {
            IntegrationOutcome::Clean => {
                self.io.on_step_done(&format!("Rebased onto '{target}'"));
                Ok(StepOutcome::Continue)
            }
            IntegrationOutcome::Conflict | IntegrationOutcome::Incomplete => {
                Err(Error::RebaseConflict(target.clone()))
            }
        }
    }

    /// Squash the active branch into a single commit
    ///
    /// Nothing is changed unless the operator supplies a valid subject.
    /// With fewer than two commits there is nothing to fold; the step is a
    /// no-op and the batch continues.
    pub fn squash(&self) -> Result<StepOutcome> {
        // an earlier step may have left the target branch checked out
        self.vcs.checkout(&self.ctx.active_branch)?;
        let commits = CommitHistoryReader::new(self.ctx, self.vcs).commits_to_squash()?;
        let count = commits.len();
        if count < 2 {
            self.io
                .on_warning(&format!("Can not squash because there is only {count} commit!"));
            return Ok(StepOutcome::Continue);
        }

        self.io
            .on_message(&format!("Going to squash {count} commits into one"));
        let body = synthesize(&commits);
        let subject = match self.editor.prompt_subject(&body)? {
            SubjectPrompt::Accepted(subject) => subject,
            SubjectPrompt::Rejected(reason) => {
                self.io.on_warning(&reason.to_string());
                self.io.on_message("Aborting...");
                return Ok(StepOutcome::Abort);
            }
        };

        self.vcs.reset_soft(count)?;
        self.vcs.commit(subject.as_str(), body.as_str())?;
        debug!(count, %subject, "squashed");
        self.io
            .on_message(&format!("Squashed {count} commits into '{subject}'"));
        Ok(StepOutcome::Continue)
    }

    /// Merge the active branch into the target branch with `--no-ff`
    ///
    /// When the merge stops, on conflicts or because the merge message was
    /// abandoned, the attempt is rolled back before failing.
    pub fn merge(&self) -> Result<StepOutcome> {
        let target = &self.ctx.target_branch;
        self.vcs.checkout(target)?;
        match self
            .vcs
            .merge(&self.ctx.active_branch, MergeFlags::finish())?
        {
            IntegrationOutcome::Clean => {
                self.io.on_message(&format!(
                    "Merged '{}' into '{target}'",
                    self.ctx.active_branch
                ));
                Ok(StepOutcome::Continue)
            }
            stopped => {
                self.io.on_warning("Reverting merge...");
                if let Err(e) = self.vcs.reset_merge() {
                    self.io
                        .on_warning(&format!("Could not revert the merge: {e}"));
                }
                if stopped == IntegrationOutcome::Conflict {
                    Err(Error::MergeConflict(target.clone()))
                } else {
                    Err(Error::MergeIncomplete(target.clone()))
                }
            }
        }
    }

    /// Delete the active branch as chosen by the operator
    ///
    /// Switches to the target branch first. A failing remote deletion is
    /// reported and ignored.
    pub fn delete_branch(&self) -> Result<StepOutcome> {
        let branch = &self.ctx.active_branch;
        let choice = self.io.choose_deletion(branch)?;
        if choice == DeletionChoice::Skip {
            self.io.on_message("Skipping deletion");
            return Ok(StepOutcome::Continue);
        }

        self.vcs.checkout(&self.ctx.target_branch)?;
        if choice.deletes_local() {
            self.vcs.delete_local_branch(branch)?;
            self.io.on_message(&format!("Deleted local branch '{branch}'"));
        }
        if choice.deletes_remote() {
            match self.vcs.delete_remote_branch(&self.ctx.remote, branch) {
                Ok(()) => self.io.on_message(&format!(
                    "Deleted remote branch '{}/{branch}'",
                    self.ctx.remote
                )),
                Err(e) => {
                    debug!(error = %e, "remote branch deletion failed");
                    self.io.on_warning(
                        "Failed to delete the remote branch. This can be ignored!",
                    );
                }
            }
        }
        Ok(StepOutcome::Continue)
    }

    /// Report the commits a squash would fold together
    pub fn list_commits(&self) -> Result<StepOutcome> {
        let commits = CommitHistoryReader::new(self.ctx, self.vcs).commits_to_squash()?;
        self.io.on_message(&format!(
            "There are {} commits to be squashed:",
            commits.len()
        ));
        for commit in &commits {
            self.io.on_message(&format!("* {}", commit.subject));
        }
        Ok(StepOutcome::Continue)
    }

    /// Check whether merging would conflict, without lasting effect
    pub fn probe_conflicts(&self) -> Result<StepOutcome> {
        match ConflictProbe::new(self.ctx, self.vcs, self.io).probe()? {
            ProbeResult::Clean => {
                self.io.on_message("No conflicts detected!");
                self.io.acknowledge("Proceed with Return")?;
            }
            ProbeResult::WouldConflict => {
                self.io
                    .on_message("The test merge was reverted. Rebase before merging.");
            }
        }
        Ok(StepOutcome::Continue)
    }
}
