//! CLI wiring for git-squash

mod context;
mod menu;
mod prompt;
pub mod style;

use anstream::println;
use context::CommandContext;
use git_squash::error::Result;
use git_squash::workflow::WorkflowEngine;
use prompt::TerminalInteraction;
use std::path::Path;
use style::Stylize;

/// Options collected from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Digit string to run once; interactive when absent
    pub commands: Option<String>,
    /// Target branch override
    pub branch: Option<String>,
    /// Remote override
    pub remote: Option<String>,
}

/// Validate the repository, then run the requested commands
pub fn run(path: &Path, options: &RunOptions) -> Result<()> {
    let ctx = CommandContext::new(
        path,
        options.branch.as_deref(),
        options.remote.as_deref(),
    )?;

    for warning in &ctx.warnings {
        println!("{}", format!("⚠️  {warning}").warn());
    }

    let io = TerminalInteraction::new();
    let engine = WorkflowEngine::new(&ctx.workflow, &ctx.repo, &ctx.editor, &io);

    match options.commands.as_deref() {
        Some(input) => menu::run_batch(&engine, input),
        None => menu::run_interactive(&engine, &io),
    }
}
