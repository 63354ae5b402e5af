//! Core types for git-squash

/// Branches that are never squashed or deleted
pub const PROTECTED_BRANCHES: [&str; 2] = ["master", "develop"];

/// Default branch to merge into when nothing else is configured
pub const DEFAULT_TARGET_BRANCH: &str = "develop";

/// Default remote used when deleting the remote branch
pub const DEFAULT_REMOTE: &str = "origin";

/// A commit message split into subject and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// First line of the message
    pub subject: String,
    /// Everything from the third line onward (may be empty)
    pub body: String,
}

impl CommitMessage {
    /// Build a message from its parts
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Parse a raw commit message
    ///
    /// The first line is the subject. The second line, conventionally
    /// blank, is dropped and the rest becomes the body.
    pub fn parse(raw: &str) -> Self {
        let lines: Vec<&str> = raw.trim().split('\n').collect();
        if lines.len() == 1 {
            return Self::new(lines[0], "");
        }
        let body = lines.get(2..).map(|rest| rest.join("\n")).unwrap_or_default();
        Self::new(lines[0], body)
    }
}

/// A commit as read from the log: hash plus raw message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    /// Full commit hash
    pub hash: String,
    /// Unparsed commit message
    pub message: String,
}

/// Commits unique to the active branch, newest first
pub type CommitSequence = Vec<CommitMessage>;

/// Branch identities fixed at startup
///
/// Constructed once after the safety checks passed and shared by
/// reference with every component. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowContext {
    /// The feature branch the user started on
    pub active_branch: String,
    /// The integration branch to merge into
    pub target_branch: String,
    /// Remote holding the published feature branch
    pub remote: String,
}

impl WorkflowContext {
    /// Create a context
    pub fn new(
        active_branch: impl Into<String>,
        target_branch: impl Into<String>,
        remote: impl Into<String>,
    ) -> Self {
        Self {
            active_branch: active_branch.into(),
            target_branch: target_branch.into(),
            remote: remote.into(),
        }
    }
}

/// Outcome of a rebase or merge attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationOutcome {
    /// Completed without conflicts
    Clean,
    /// Stopped on conflicts
    Conflict,
    /// Stopped without conflicts, e.g. the merge message was left empty
    Incomplete,
}

/// How the active branch should be deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionChoice {
    /// Delete both the local and the remote branch
    LocalAndRemote,
    /// Delete the local branch only
    LocalOnly,
    /// Delete the remote branch only
    RemoteOnly,
    /// Keep everything
    Skip,
}

impl DeletionChoice {
    /// Menu entries in display order
    pub const ALL: [Self; 4] = [
        Self::LocalAndRemote,
        Self::LocalOnly,
        Self::RemoteOnly,
        Self::Skip,
    ];

    /// Whether the local branch is removed
    pub const fn deletes_local(self) -> bool {
        matches!(self, Self::LocalAndRemote | Self::LocalOnly)
    }

    /// Whether the remote branch is removed
    pub const fn deletes_remote(self) -> bool {
        matches!(self, Self::LocalAndRemote | Self::RemoteOnly)
    }
}

impl std::fmt::Display for DeletionChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::LocalAndRemote => "Delete local and remote branch",
            Self::LocalOnly => "Delete local branch only",
            Self::RemoteOnly => "Delete remote branch only",
            Self::Skip => "Skip deletion",
        };
        f.write_str(label)
    }
}
