//! Batch and interactive command loops

use crate::cli::prompt::TerminalInteraction;
use crate::cli::style::Stylize;
use anstream::println;
use git_squash::error::Result;
use git_squash::workflow::{Command, StepOutcome, WorkflowEngine};

const DIVIDER: &str = "-------------------------------------------------------";

/// Run a digit string once and return
pub fn run_batch(engine: &WorkflowEngine<'_>, input: &str) -> Result<()> {
    engine.run_input(input)?;
    Ok(())
}

/// Show the menu and run commands until exit or interrupt
pub fn run_interactive(engine: &WorkflowEngine<'_>, io: &TerminalInteraction) -> Result<()> {
    loop {
        print_menu(engine);
        let input = io.read_line("Choice (0-8)")?;

        println!("{}", DIVIDER.muted());
        if engine.run_input(&input)? == StepOutcome::Exit {
            return Ok(());
        }
        println!("{}", DIVIDER.muted());
    }
}

fn print_menu(engine: &WorkflowEngine<'_>) {
    let ctx = engine.context();
    println!(
        "Currently on branch {} and will merge into branch {}",
        ctx.active_branch.accent(),
        ctx.target_branch.accent()
    );
    println!();
    for command in Command::ALL {
        if command == Command::ListCommits {
            println!("{}", "------------".muted());
        }
        println!(
            "{}:  {}",
            command.digit().emphasis(),
            command.describe(ctx)
        );
    }
    println!();
}
