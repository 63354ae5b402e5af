//! Mock git gateway for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

use git_squash::error::{Error, Result};
use git_squash::types::{IntegrationOutcome, RawCommit};
use git_squash::vcs::{MergeFlags, VcsGateway};
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    CurrentBranch,
    IsClean,
    Status,
    Checkout(String),
    Pull,
    LogRange { base: String, tip: String },
    CommitLog { branch: String, limit: usize },
    ResetSoft(usize),
    Commit { subject: String, body: String },
    Rebase(String),
    Merge { branch: String, flags: MergeFlags },
    MergeAbort,
    ResetMerge,
    DeleteRemote { remote: String, branch: String },
    DeleteLocal(String),
}

/// Simple mock gateway
///
/// Hand-written rather than generated so that call order can be asserted
/// across methods.
///
/// Features:
/// - Tracks the checked-out branch
/// - Call tracking for verification
/// - Configurable history, status and merge outcomes
/// - Error injection for failure path testing
pub struct MockVcs {
    current: Mutex<String>,
    clean: bool,
    statuses: HashMap<String, String>,
    /// Commits unique to the feature branch, newest first
    unique: Vec<RawCommit>,
    /// Commits shared with the target branch, newest first
    shared: Vec<RawCommit>,
    rebase_outcome: IntegrationOutcome,
    trial_merge_outcome: IntegrationOutcome,
    merge_outcome: IntegrationOutcome,
    // Error injection
    error_on_log_range: Option<String>,
    error_on_pull: Option<String>,
    error_on_status: Option<String>,
    error_on_remote_delete: Option<String>,
    error_on_merge_abort: Option<String>,
    // Call tracking
    calls: Mutex<Vec<VcsCall>>,
}

/// Fixed-width fake hash so no hash is a prefix of another
pub fn fake_hash(n: usize) -> String {
    format!("{n:040}")
}

impl MockVcs {
    /// Clean repository checked out on `branch` with no history
    pub fn on_branch(branch: &str) -> Self {
        Self {
            current: Mutex::new(branch.to_string()),
            clean: true,
            statuses: HashMap::new(),
            unique: Vec::new(),
            shared: vec![RawCommit {
                hash: fake_hash(1),
                message: "Initial commit\n".to_string(),
            }],
            rebase_outcome: IntegrationOutcome::Clean,
            trial_merge_outcome: IntegrationOutcome::Clean,
            merge_outcome: IntegrationOutcome::Clean,
            error_on_log_range: None,
            error_on_pull: None,
            error_on_status: None,
            error_on_remote_delete: None,
            error_on_merge_abort: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add commits unique to the feature branch (raw messages, newest first)
    pub fn with_commits(mut self, messages: &[&str]) -> Self {
        let offset = 100;
        self.unique = messages
            .iter()
            .enumerate()
            .map(|(i, message)| RawCommit {
                hash: fake_hash(offset + messages.len() - i),
                message: format!("{message}\n"),
            })
            .collect();
        self
    }

    /// Mark the working tree dirty
    pub fn dirty(mut self) -> Self {
        self.clean = false;
        self
    }

    /// Set what `git status` prints while `branch` is checked out
    pub fn with_status(mut self, branch: &str, status: &str) -> Self {
        self.statuses.insert(branch.to_string(), status.to_string());
        self
    }

    /// Make the rebase stop on conflicts
    pub fn rebase_conflicts(mut self) -> Self {
        self.rebase_outcome = IntegrationOutcome::Conflict;
        self
    }

    /// Make the `--no-commit` trial merge stop on conflicts
    pub fn trial_merge_conflicts(mut self) -> Self {
        self.trial_merge_outcome = IntegrationOutcome::Conflict;
        self
    }

    /// Make the final merge stop on conflicts
    pub fn merge_conflicts(mut self) -> Self {
        self.merge_outcome = IntegrationOutcome::Conflict;
        self
    }

    /// Make the final merge stop without conflicts (abandoned message)
    pub fn merge_stops(mut self) -> Self {
        self.merge_outcome = IntegrationOutcome::Incomplete;
        self
    }

    /// Make `log_range` fail (e.g. unknown target branch)
    pub fn fail_log_range(mut self, msg: &str) -> Self {
        self.error_on_log_range = Some(msg.to_string());
        self
    }

    /// Make `pull` fail
    pub fn fail_pull(mut self, msg: &str) -> Self {
        self.error_on_pull = Some(msg.to_string());
        self
    }

    /// Make `status` fail
    pub fn fail_status(mut self, msg: &str) -> Self {
        self.error_on_status = Some(msg.to_string());
        self
    }

    /// Make remote branch deletion fail
    pub fn fail_remote_delete(mut self, msg: &str) -> Self {
        self.error_on_remote_delete = Some(msg.to_string());
        self
    }

    /// Make `merge --abort` fail
    pub fn fail_merge_abort(mut self, msg: &str) -> Self {
        self.error_on_merge_abort = Some(msg.to_string());
        self
    }

    fn record(&self, call: VcsCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected(command: &str, error: Option<&String>) -> Result<()> {
        error.map_or(Ok(()), |message| {
            Err(Error::Git {
                command: command.to_string(),
                message: message.clone(),
            })
        })
    }

    // === Call verification methods ===

    /// All calls in order
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change the repository (everything but reads and checkouts)
    pub fn mutating_calls(&self) -> Vec<VcsCall> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !matches!(
                    c,
                    VcsCall::CurrentBranch
                        | VcsCall::IsClean
                        | VcsCall::Status
                        | VcsCall::Checkout(_)
                        | VcsCall::LogRange { .. }
                        | VcsCall::CommitLog { .. }
                )
            })
            .collect()
    }

    /// Branch checked out right now
    pub fn current(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    /// Position of the first call matching `pred`
    pub fn position(&self, pred: impl Fn(&VcsCall) -> bool) -> Option<usize> {
        self.calls().iter().position(pred)
    }

    /// Assert that a call was made
    pub fn assert_called(&self, call: &VcsCall) {
        let calls = self.calls();
        assert!(
            calls.contains(call),
            "Expected {call:?} but got: {calls:?}"
        );
    }

    /// Assert that nothing was changed
    pub fn assert_untouched(&self) {
        let calls = self.mutating_calls();
        assert!(calls.is_empty(), "Expected no mutation but got: {calls:?}");
    }
}

impl VcsGateway for MockVcs {
    fn current_branch(&self) -> Result<String> {
        self.record(VcsCall::CurrentBranch);
        Ok(self.current())
    }

    fn is_clean(&self) -> Result<bool> {
        self.record(VcsCall::IsClean);
        Ok(self.clean)
    }

    fn status(&self) -> Result<String> {
        self.record(VcsCall::Status);
        Self::injected("status", self.error_on_status.as_ref())?;
        let current = self.current();
        Ok(self
            .statuses
            .get(&current)
            .cloned()
            .unwrap_or_else(|| format!("On branch {current}\nnothing to commit, working tree clean\n")))
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.record(VcsCall::Checkout(branch.to_string()));
        *self.current.lock().unwrap() = branch.to_string();
        Ok(())
    }

    fn pull(&self) -> Result<String> {
        self.record(VcsCall::Pull);
        Self::injected("pull", self.error_on_pull.as_ref())?;
        Ok("Already up to date.\n".to_string())
    }

    fn log_range(&self, base: &str, tip: &str) -> Result<Vec<String>> {
        self.record(VcsCall::LogRange {
            base: base.to_string(),
            tip: tip.to_string(),
        });
        Self::injected("log", self.error_on_log_range.as_ref())?;
        Ok(self.unique.iter().map(|c| c.hash.clone()).collect())
    }

    fn commit_log(&self, branch: &str, limit: usize) -> Result<Vec<RawCommit>> {
        self.record(VcsCall::CommitLog {
            branch: branch.to_string(),
            limit,
        });
        Ok(self
            .unique
            .iter()
            .chain(&self.shared)
            .take(limit)
            .cloned()
            .collect())
    }

    fn reset_soft(&self, count: usize) -> Result<()> {
        self.record(VcsCall::ResetSoft(count));
        Ok(())
    }

    fn commit(&self, subject: &str, body: &str) -> Result<()> {
        self.record(VcsCall::Commit {
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    fn rebase(&self, onto: &str) -> Result<IntegrationOutcome> {
        self.record(VcsCall::Rebase(onto.to_string()));
        Ok(self.rebase_outcome)
    }

    fn merge(&self, branch: &str, flags: MergeFlags) -> Result<IntegrationOutcome> {
        self.record(VcsCall::Merge {
            branch: branch.to_string(),
            flags,
        });
        Ok(if flags.no_commit {
            self.trial_merge_outcome
        } else {
            self.merge_outcome
        })
    }

    fn merge_abort(&self) -> Result<()> {
        self.record(VcsCall::MergeAbort);
        Self::injected("merge --abort", self.error_on_merge_abort.as_ref())
    }

    fn reset_merge(&self) -> Result<()> {
        self.record(VcsCall::ResetMerge);
        Ok(())
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(VcsCall::DeleteRemote {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        Self::injected("push --delete", self.error_on_remote_delete.as_ref())
    }

    fn delete_local_branch(&self, branch: &str) -> Result<()> {
        self.record(VcsCall::DeleteLocal(branch.to_string()));
        Ok(())
    }
}
