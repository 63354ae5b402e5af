//! Command vocabulary (pure)
//!
//! Parses operator input into commands and expands the composite
//! "finish branch" command. No I/O happens here.

use crate::types::WorkflowContext;
use std::fmt;

/// One entry of the command menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `0` - run the whole finish sequence
    FinishBranch,
    /// `1` - pull the target branch and switch back
    PullTarget,
    /// `2` - rebase the active branch onto the target branch
    Rebase,
    /// `3` - squash the active branch into one commit
    Squash,
    /// `4` - merge the active branch into the target with `--no-ff`
    Merge,
    /// `5` - delete the active branch locally and/or on the remote
    DeleteBranch,
    /// `6` - list the commits that would be squashed
    ListCommits,
    /// `7` - check whether the merge would conflict
    ProbeConflicts,
    /// `8` - stop
    Exit,
}

/// Steps of [`Command::FinishBranch`], in order
pub const FINISH_SEQUENCE: [Command; 6] = [
    Command::PullTarget,
    Command::Rebase,
    Command::Squash,
    Command::Merge,
    Command::DeleteBranch,
    Command::Exit,
];

impl Command {
    /// All commands in menu order
    pub const ALL: [Self; 9] = [
        Self::FinishBranch,
        Self::PullTarget,
        Self::Rebase,
        Self::Squash,
        Self::Merge,
        Self::DeleteBranch,
        Self::ListCommits,
        Self::ProbeConflicts,
        Self::Exit,
    ];

    /// Look up a command by its menu digit
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '0' => Self::FinishBranch,
            '1' => Self::PullTarget,
            '2' => Self::Rebase,
            '3' => Self::Squash,
            '4' => Self::Merge,
            '5' => Self::DeleteBranch,
            '6' => Self::ListCommits,
            '7' => Self::ProbeConflicts,
            '8' => Self::Exit,
            _ => return None,
        })
    }

    /// Menu digit of this command
    pub const fn digit(self) -> char {
        match self {
            Self::FinishBranch => '0',
            Self::PullTarget => '1',
            Self::Rebase => '2',
            Self::Squash => '3',
            Self::Merge => '4',
            Self::DeleteBranch => '5',
            Self::ListCommits => '6',
            Self::ProbeConflicts => '7',
            Self::Exit => '8',
        }
    }

    /// Whether the command only reads the repository
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::ListCommits | Self::ProbeConflicts | Self::Exit)
    }

    /// Menu line describing what the command does for `ctx`
    pub fn describe(self, ctx: &WorkflowContext) -> String {
        let current = format!("current branch '{}'", ctx.active_branch);
        let target = &ctx.target_branch;
        match self {
            Self::FinishBranch => "alias for 123458 (default behavior)".to_string(),
            Self::PullTarget => format!("Pull '{target}' and switch back to {current}"),
            Self::Rebase => format!("Rebase {current} onto '{target}'"),
            Self::Squash => format!("Squash {current} into a single commit"),
            Self::Merge => format!("Merge {current} into '{target}' with --no-ff"),
            Self::DeleteBranch => format!(
                "Delete local and/or remote branch '{}' and switch to '{target}'",
                ctx.active_branch
            ),
            Self::ListCommits => "Count commits to squash".to_string(),
            Self::ProbeConflicts => "Check if merge will lead to conflicts".to_string(),
            Self::Exit => "Exit".to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FinishBranch => "finish branch",
            Self::PullTarget => "pull target",
            Self::Rebase => "rebase",
            Self::Squash => "squash",
            Self::Merge => "merge",
            Self::DeleteBranch => "delete branch",
            Self::ListCommits => "list commits",
            Self::ProbeConflicts => "probe conflicts",
            Self::Exit => "exit",
        };
        write!(f, "{} ({name})", self.digit())
    }
}

/// What the engine should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Proceed with the next command
    Continue,
    /// Stop the current batch; nothing was changed by the aborted step
    Abort,
    /// Stop the program
    Exit,
}

/// Operator input split into runnable commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// Commands before the first unrecognized character
    pub commands: Vec<Command>,
    /// First character that is not a command, if any
    pub unrecognized: Option<char>,
}

/// Parse a digit string such as `"126"`
///
/// Surrounding whitespace is ignored. Parsing stops at the first
/// unrecognized character; the commands before it are still returned.
pub fn parse_input(input: &str) -> ParsedInput {
    let mut commands = Vec::new();
    for c in input.trim().chars() {
        match Command::from_char(c) {
            Some(command) => commands.push(command),
            None => {
                return ParsedInput {
                    commands,
                    unrecognized: Some(c),
                };
            }
        }
    }
    ParsedInput {
        commands,
        unrecognized: None,
    }
}
