//! Folding many commit messages into one body (pure)

use crate::types::CommitMessage;
use std::fmt;

/// Body of the squashed commit
///
/// Keeps a traceable record of every commit that was folded together,
/// since the squash itself throws the individual commits away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedBody(String);

impl AggregatedBody {
    /// Raw text, suitable for passing as a structured commit argument
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no commits contributed any text
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text with embedded double quotes escaped for a shell-quoted command
    pub fn escaped(&self) -> String {
        self.0.replace('"', "\\\"")
    }
}

impl fmt::Display for AggregatedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Synthesize one commit body from a commit sequence
///
/// Each commit contributes a `## subject` heading, a blank line, and its
/// body followed by a blank line when the body is non-empty. Order follows
/// the input sequence. Trailing whitespace is stripped.
pub fn synthesize(commits: &[CommitMessage]) -> AggregatedBody {
    let mut text = String::new();
    for commit in commits {
        text.push_str("## ");
        text.push_str(&commit.subject);
        text.push_str("\n\n");
        if !commit.body.is_empty() {
            text.push_str(&commit.body);
            text.push_str("\n\n");
        }
    }
    AggregatedBody(text.trim().to_string())
}
