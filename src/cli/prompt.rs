//! Terminal implementation of the operator interaction callbacks

use crate::cli::style::{Stylize, check, spinner_style};
use anstream::{print, println};
use dialoguer::{Input, Select};
use git_squash::error::{Error, Result};
use git_squash::interaction::Interaction;
use git_squash::types::DeletionChoice;
use indicatif::ProgressBar;
use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

/// Styled output plus dialoguer prompts
#[derive(Default)]
pub struct TerminalInteraction {
    spinner: RefCell<Option<ProgressBar>>,
}

impl TerminalInteraction {
    /// Create an interaction with no spinner running
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop a running spinner so prompts and messages are not overdrawn
    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }

    /// Read one line of input from the operator
    ///
    /// Falls back to plain line reads when stdin is piped. End of input
    /// yields [`Error::Interrupted`].
    pub fn read_line(&self, prompt: &str) -> Result<String> {
        self.clear_spinner();
        if !io::stdin().is_terminal() {
            return read_piped_line(prompt);
        }
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }
}

fn read_piped_line(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        return Err(Error::Interrupted);
    }
    let line = line.trim_end_matches(['\n', '\r']).to_string();
    println!("{line}");
    Ok(line)
}

/// Map a typed menu answer to a deletion choice; anything else skips
fn deletion_from_answer(answer: &str) -> DeletionChoice {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| DeletionChoice::ALL.get(i).copied())
        .unwrap_or(DeletionChoice::Skip)
}

impl Drop for TerminalInteraction {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}

/// Map a prompt failure; an interrupt or closed input ends the program cleanly
fn prompt_error(e: dialoguer::Error) -> Error {
    let dialoguer::Error::IO(e) = e;
    match e.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => Error::Interrupted,
        _ => Error::Io(e),
    }
}

impl Interaction for TerminalInteraction {
    fn on_message(&self, message: &str) {
        self.clear_spinner();
        println!("{message}");
    }

    fn on_warning(&self, message: &str) {
        self.clear_spinner();
        println!("{}", format!("⚠️  {message}").warn());
    }

    fn on_step_start(&self, message: &str) {
        self.clear_spinner();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn on_step_done(&self, message: &str) {
        match self.spinner.borrow_mut().take() {
            Some(spinner) => spinner.finish_with_message(format!("{} {message}", check())),
            None => println!("{} {message}", check()),
        }
    }

    fn acknowledge(&self, prompt: &str) -> Result<()> {
        self.read_line(prompt).map(|_| ())
    }

    fn choose_deletion(&self, branch: &str) -> Result<DeletionChoice> {
        self.clear_spinner();
        println!();
        if !io::stdin().is_terminal() {
            println!("Choose how to delete the branch {}", branch.accent());
            for (i, choice) in DeletionChoice::ALL.iter().enumerate() {
                println!("{i}: {choice}");
            }
            let answer = read_piped_line("Choice")?;
            return Ok(deletion_from_answer(&answer));
        }
        let index = Select::new()
            .with_prompt(format!(
                "Choose how to delete the branch {}",
                branch.accent()
            ))
            .items(&DeletionChoice::ALL)
            .default(DeletionChoice::ALL.len() - 1)
            .interact()
            .map_err(prompt_error)?;
        Ok(DeletionChoice::ALL
            .get(index)
            .copied()
            .unwrap_or(DeletionChoice::Skip))
    }
}
