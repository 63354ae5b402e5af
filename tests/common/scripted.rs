//! Scripted editor and interaction doubles

use git_squash::editor::{SubjectEditor, SubjectPrompt, parse_subject};
use git_squash::error::{Error, Result};
use git_squash::history::AggregatedBody;
use git_squash::interaction::Interaction;
use git_squash::types::DeletionChoice;
use std::sync::Mutex;

/// Editor that "types" a fixed text and validates it like the real one
pub struct ScriptedEditor {
    edited: String,
    bodies: Mutex<Vec<String>>,
}

impl ScriptedEditor {
    /// Editor whose saved buffer is `edited`
    pub fn typing(edited: &str) -> Self {
        Self {
            edited: edited.to_string(),
            bodies: Mutex::new(Vec::new()),
        }
    }

    /// Bodies shown to the operator, one per prompt
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

impl SubjectEditor for ScriptedEditor {
    fn prompt_subject(&self, body: &AggregatedBody) -> Result<SubjectPrompt> {
        self.bodies.lock().unwrap().push(body.as_str().to_string());
        Ok(match parse_subject(&self.edited) {
            Ok(subject) => SubjectPrompt::Accepted(subject),
            Err(rejection) => SubjectPrompt::Rejected(rejection),
        })
    }
}

/// Interaction that records everything and answers from a script
pub struct RecordingInteraction {
    deletion: DeletionChoice,
    interrupt_acknowledge: bool,
    messages: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    acknowledgements: Mutex<Vec<String>>,
}

impl Default for RecordingInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingInteraction {
    /// Skips deletion and confirms every pause
    pub fn new() -> Self {
        Self {
            deletion: DeletionChoice::Skip,
            interrupt_acknowledge: false,
            messages: Mutex::new(Vec::new()),
            warnings: Mutex::new(Vec::new()),
            acknowledgements: Mutex::new(Vec::new()),
        }
    }

    /// Answer the deletion menu with `choice`
    pub fn deleting(mut self, choice: DeletionChoice) -> Self {
        self.deletion = choice;
        self
    }

    /// Simulate the operator interrupting at a pause
    pub fn interrupting(mut self) -> Self {
        self.interrupt_acknowledge = true;
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn acknowledgements(&self) -> Vec<String> {
        self.acknowledgements.lock().unwrap().clone()
    }

    /// Whether any warning contains `needle`
    pub fn warned(&self, needle: &str) -> bool {
        self.warnings().iter().any(|w| w.contains(needle))
    }
}

impl Interaction for RecordingInteraction {
    fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn on_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn acknowledge(&self, prompt: &str) -> Result<()> {
        self.acknowledgements.lock().unwrap().push(prompt.to_string());
        if self.interrupt_acknowledge {
            return Err(Error::Interrupted);
        }
        Ok(())
    }

    fn choose_deletion(&self, _branch: &str) -> Result<DeletionChoice> {
        Ok(self.deletion)
    }
}
