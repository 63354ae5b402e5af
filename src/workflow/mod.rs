//! Workflow engine for finishing a feature branch
//!
//! Split like the rest of the crate:
//! 1. Command - parse operator input into commands (pure, testable)
//! 2. Engine - run the commands against the repository (effectful)

mod command;
mod engine;

pub use command::{Command, FINISH_SEQUENCE, ParsedInput, StepOutcome, parse_input};
pub use engine::WorkflowEngine;
