//! Operator interaction callbacks
//!
//! The library never prints or reads the terminal itself. The CLI supplies
//! an implementation backed by styled output and dialoguer prompts; tests
//! supply scripted ones.

use crate::error::Result;
use crate::types::DeletionChoice;

/// Callback for reporting progress and asking the operator
pub trait Interaction {
    /// Report an informational message
    fn on_message(&self, message: &str);

    /// Report something that went wrong but is not fatal
    fn on_warning(&self, message: &str);

    /// A long-running external call is starting
    fn on_step_start(&self, message: &str) {
        self.on_message(message);
    }

    /// The call announced by [`Self::on_step_start`] has finished
    fn on_step_done(&self, message: &str) {
        self.on_message(message);
    }

    /// Block until the operator confirms (e.g. presses Return)
    fn acknowledge(&self, prompt: &str) -> Result<()>;

    /// Ask how `branch` should be deleted
    fn choose_deletion(&self, branch: &str) -> Result<DeletionChoice>;
}

/// Interaction that stays silent, confirms immediately and deletes nothing
pub struct NoopInteraction;

impl Interaction for NoopInteraction {
    fn on_message(&self, _message: &str) {}

    fn on_warning(&self, _message: &str) {}

    fn acknowledge(&self, _prompt: &str) -> Result<()> {
        Ok(())
    }

    fn choose_deletion(&self, _branch: &str) -> Result<DeletionChoice> {
        Ok(DeletionChoice::Skip)
    }
}
