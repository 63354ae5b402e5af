//! Error types for git-squash

use thiserror::Error;

/// Result type alias for git-squash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while finishing a branch
#[derive(Error, Debug)]
pub enum Error {
    /// The working directory is not inside a git repository
    #[error("Directory is not a git repository!")]
    NotARepository,

    /// Modified tracked files or untracked files are present
    #[error("Repository is dirty or has untracked files! Aborting...")]
    DirtyRepository,

    /// The active branch is one of the protected branches
    #[error("Current branch \"{0}\" is protected! Aborting...")]
    ProtectedBranch(String),

    /// Active and target branch are the same
    #[error(
        "Trying to merge and squash onto same branch \"{0}\"!\n\
         Is your --branch argument correct? --branch specifies the branch \
         your current branch should be merged into.\nAborting..."
    )]
    SameBranch(String),

    /// The target branch has commits that were never pushed
    #[error("The branch you want to merge into ('{0}') is ahead of its remote. Push first!")]
    TargetBranchUnpushed(String),

    /// No commit log exists between the target branch and the active branch
    #[error("Can not find commits unique to the current branch relative to '{0}'. Did you set --branch correctly?")]
    DivergencePointNotFound(String),

    /// Rebasing produced conflicts that need manual resolution
    #[error("Rebase onto '{0}' has lead to conflicts. Fix them manually!")]
    RebaseConflict(String),

    /// Merging produced conflicts; the merge attempt was rolled back
    #[error("Merging into '{0}' lead to conflicts because the branch was not correctly rebased! The merge was reverted.")]
    MergeConflict(String),

    /// Merging stopped without conflicts; the merge attempt was rolled back
    #[error("Merging into '{0}' did not complete (was the merge message empty?). The merge was reverted.")]
    MergeIncomplete(String),

    /// `$EDITOR` is not set
    #[error("Set the environment variable $EDITOR to edit commit messages! Aborting...")]
    MissingEditor,

    /// HEAD does not point to a branch
    #[error("HEAD is detached; check out the branch you want to finish first")]
    DetachedHead,

    /// A git invocation failed
    #[error("git {command} failed: {message}")]
    Git {
        /// The git subcommand and arguments
        command: String,
        /// Captured stderr (or stdout when stderr was empty)
        message: String,
    },

    /// The external editor could not be run
    #[error("editor error: {0}")]
    Editor(String),

    /// Configuration file error
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The operator interrupted a prompt
    #[error("interrupted")]
    Interrupted,
}

impl Error {
    /// Process exit code for this error
    ///
    /// `2` for a dirty working tree, `3` outside a repository, `0` when the
    /// operator interrupted a prompt, `1` otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted => 0,
            Self::DirtyRepository => 2,
            Self::NotARepository => 3,
            _ => 1,
        }
    }
}
