//! Shared command context
//!
//! Performs the startup sequence once, before any command runs:
//! - Check that an editor is configured
//! - Open the repository
//! - Load the per-repository config and resolve branch settings
//! - Run the safety checks, which fix the branch identities
//!
//! Nothing in here is mutated after construction.

use git_squash::config::load_config;
use git_squash::editor::ExternalEditor;
use git_squash::error::Result;
use git_squash::guard::{GuardWarning, SafetyGuard};
use git_squash::types::WorkflowContext;
use git_squash::vcs::GitCli;
use std::path::Path;
use tracing::debug;

/// Everything the commands need, validated
pub struct CommandContext {
    /// The git repository
    pub repo: GitCli,
    /// Editor used for the squash subject
    pub editor: ExternalEditor,
    /// Active and target branch, fixed for the run
    pub workflow: WorkflowContext,
    /// Non-fatal findings of the safety checks
    pub warnings: Vec<GuardWarning>,
}

impl CommandContext {
    /// Create the context
    ///
    /// `branch` and `remote` are the command-line overrides; the config
    /// file and built-in defaults fill in the rest.
    pub fn new(path: &Path, branch: Option<&str>, remote: Option<&str>) -> Result<Self> {
        let editor = ExternalEditor::from_env()?;
        let repo = GitCli::open(path)?;

        let config = load_config(&repo.git_dir()?)?;
        let target = config.resolve_target(branch);
        let remote = config.resolve_remote(remote);
        debug!(%target, %remote, editor = editor.command(), "resolved settings");

        let report = SafetyGuard::new(&repo).validate(&target, &remote)?;

        Ok(Self {
            repo,
            editor,
            workflow: report.context,
            warnings: report.warnings,
        })
    }
}
