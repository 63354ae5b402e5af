//! Shared test fixtures

#![allow(dead_code)]

mod mock_vcs;
mod scripted;
mod temp_repo;

pub use mock_vcs::{MockVcs, VcsCall};
pub use scripted::{RecordingInteraction, ScriptedEditor};
pub use temp_repo::TempGitRepo;

use git_squash::types::WorkflowContext;

/// Context for a feature branch `feat` merging into `develop`
pub fn feature_context() -> WorkflowContext {
    WorkflowContext::new("feat", "develop", "origin")
}
