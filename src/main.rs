//! git-squash CLI

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::RunOptions;
use cli::style::Stylize;
use git_squash::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Finish a feature branch: pull, rebase, squash, merge and clean up.
///
/// If COMMANDS is passed, those actions run once and the program exits;
/// otherwise a menu prompts for actions on stdin.
#[derive(Parser)]
#[command(name = "git-squash", version, about, long_about = None)]
struct Cli {
    /// Commands to run once, e.g. `0` for everything or `126`
    commands: Option<String>,

    /// Branch to merge into [default: develop]
    #[arg(short, long)]
    branch: Option<String>,

    /// Remote holding the feature branch [default: origin]
    #[arg(long)]
    remote: Option<String>,

    /// Path to the repository
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Log every git invocation to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "git_squash=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = RunOptions {
        commands: cli.commands,
        branch: cli.branch,
        remote: cli.remote,
    };

    match cli::run(&cli.path, &options) {
        Ok(()) | Err(Error::Interrupted) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().error());
            u8::try_from(e.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
        }
    }
}
