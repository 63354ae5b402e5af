//! Subject line authoring in an external editor
//!
//! The template and validation are pure; [`ExternalEditor`] performs the
//! round trip through a temporary file that is removed on every exit path.

use crate::error::{Error, Result};
use crate::history::AggregatedBody;
use std::fmt;
use std::io::Write;
use std::process::Command;
use tracing::debug;

/// Maximum length of a commit subject, in characters
pub const MAX_SUBJECT_LEN: usize = 50;

/// Lines starting with this marker are stripped from the edited text
pub const COMMENT_MARKER: char = '#';

/// Environment variable naming the editor command
pub const EDITOR_ENV: &str = "EDITOR";

/// A validated single-line commit subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    /// Subject text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why an edited subject was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectRejection {
    /// Nothing but comments and blank lines were left
    Empty,
    /// More than one non-comment line was entered
    MultiLine,
    /// Longer than [`MAX_SUBJECT_LEN`] characters
    TooLong(usize),
}

impl fmt::Display for SubjectRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Your subject is empty!"),
            Self::MultiLine => f.write_str("Your subject is multi line!"),
            Self::TooLong(len) => write!(
                f,
                "Your subject is longer than {MAX_SUBJECT_LEN} characters ({len})!"
            ),
        }
    }
}

/// Result of asking the user for a subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectPrompt {
    /// A usable subject was entered
    Accepted(Subject),
    /// The edit was refused; the caller must not touch the repository
    Rejected(SubjectRejection),
}

/// Boundary for obtaining the squashed commit's subject
pub trait SubjectEditor {
    /// Ask for a subject, showing `body` for reference
    fn prompt_subject(&self, body: &AggregatedBody) -> Result<SubjectPrompt>;
}

/// Build the editable template: a blank subject line followed by a comment
/// block that shows the body
pub fn template(body: &AggregatedBody) -> String {
    let mut text = String::from("\n\n");
    text.push_str("# Enter the commit subject above (one line, at most 50 characters).\n");
    text.push_str("# Lines starting with '#' are removed.\n");
    text.push_str("# This will be the body:\n#");
    for line in body.as_str().split('\n') {
        text.push_str("\n#");
        if !line.is_empty() {
            text.push(' ');
            text.push_str(line);
        }
    }
    text.push('\n');
    text
}

/// Validate edited text into a subject
///
/// Comment and blank lines are dropped; what remains must be exactly one
/// line of at most [`MAX_SUBJECT_LEN`] characters.
pub fn parse_subject(edited: &str) -> std::result::Result<Subject, SubjectRejection> {
    let lines: Vec<&str> = edited
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with(COMMENT_MARKER))
        .collect();

    if lines.len() > 1 {
        return Err(SubjectRejection::MultiLine);
    }
    let subject = lines.concat();
    if subject.is_empty() {
        return Err(SubjectRejection::Empty);
    }
    let len = subject.chars().count();
    if len > MAX_SUBJECT_LEN {
        return Err(SubjectRejection::TooLong(len));
    }
    Ok(Subject(subject))
}

/// Subject editor that runs the user's `$EDITOR`
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// Use an explicit editor command (may contain arguments, e.g. `code --wait`)
    pub fn new(command: impl Into<String>) -> Result<Self> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(Error::MissingEditor);
        }
        Ok(Self { command })
    }

    /// Read the editor command from the environment
    pub fn from_env() -> Result<Self> {
        let command = std::env::var(EDITOR_ENV).map_err(|_| Error::MissingEditor)?;
        Self::new(command)
    }

    /// The configured command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Edit `initial` in the external editor and return the saved text
    pub fn edit(&self, initial: &str) -> Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("SQUASH_EDITMSG")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(initial.as_bytes())?;
        file.flush()?;

        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(Error::MissingEditor)?;
        debug!(editor = program, path = %file.path().display(), "launching editor");
        let status = Command::new(program)
            .args(parts)
            .arg(file.path())
            .status()
            .map_err(|e| Error::Editor(format!("failed to launch '{program}': {e}")))?;
        if !status.success() {
            return Err(Error::Editor(format!("'{program}' exited with {status}")));
        }

        // the file handle is dropped (and the file removed) after reading
        Ok(std::fs::read_to_string(file.path())?)
    }
}

impl SubjectEditor for ExternalEditor {
    fn prompt_subject(&self, body: &AggregatedBody) -> Result<SubjectPrompt> {
        let edited = self.edit(&template(body))?;
        Ok(match parse_subject(&edited) {
            Ok(subject) => SubjectPrompt::Accepted(subject),
            Err(rejection) => SubjectPrompt::Rejected(rejection),
        })
    }
}
