//! Git gateway backed by the `git` executable

use crate::error::{Error, Result};
use crate::types::{IntegrationOutcome, RawCommit};
use crate::vcs::{MergeFlags, VcsGateway};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Separates hash and message inside one log record
const FIELD_SEP: char = '\u{0}';

/// Terminates one log record
const RECORD_SEP: char = '\u{1e}';

/// Git gateway that shells out to `git` (no shell involved)
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Open the repository containing `path`
    ///
    /// Fails with [`Error::NotARepository`] when `path` is not inside a
    /// git working tree.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::NotARepository);
        }
        let probe = Self {
            workdir: path.to_path_buf(),
        };
        let output = probe.output(&["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(Error::NotARepository);
        }
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(root, "opened repository");
        Ok(Self {
            workdir: PathBuf::from(root),
        })
    }

    /// Absolute path of the `.git` directory
    pub fn git_dir(&self) -> Result<PathBuf> {
        let dir = self.run(&["rev-parse", "--absolute-git-dir"])?;
        Ok(PathBuf::from(dir.trim()))
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(&self.workdir)
            // status text is parsed, keep it in English
            .env("LC_ALL", "C");
        cmd
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!(?args, "running git");
        let output = self.command(args).output()?;
        debug!(?args, status = ?output.status.code(), "git finished");
        Ok(output)
    }

    /// Run git and return stdout, failing on a non-zero exit status
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        Err(failure(args, &output))
    }

    /// Run git and report only whether it succeeded
    fn succeeds(&self, args: &[&str]) -> Result<bool> {
        let output = self.output(args)?;
        if !output.status.success() {
            debug!(
                ?args,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git reported failure"
            );
        }
        Ok(output.status.success())
    }

    /// Run git attached to the terminal (for commands that open an editor)
    fn run_attached(&self, args: &[&str]) -> Result<bool> {
        debug!(?args, "running git attached to terminal");
        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        debug!(?args, status = ?status.code(), "git finished");
        Ok(status.success())
    }

    /// Whether the index holds unresolved paths
    fn has_unmerged_paths(&self) -> Result<bool> {
        let out = self.run(&["diff", "--name-only", "--diff-filter=U"])?;
        Ok(!out.trim().is_empty())
    }

    /// Classify a finished merge by its exit status and the index
    fn merge_outcome(&self, success: bool) -> Result<IntegrationOutcome> {
        if success {
            return Ok(IntegrationOutcome::Clean);
        }
        if self.has_unmerged_paths()? {
            Ok(IntegrationOutcome::Conflict)
        } else {
            Ok(IntegrationOutcome::Incomplete)
        }
    }
}

fn failure(args: &[&str], output: &Output) -> Error {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let message = if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    };
    Error::Git {
        command: args.join(" "),
        message,
    }
}

fn outcome(success: bool) -> IntegrationOutcome {
    if success {
        IntegrationOutcome::Clean
    } else {
        IntegrationOutcome::Conflict
    }
}

/// Split `git log --format=%H%x00%B%x1e` output into commits
fn parse_log_records(raw: &str) -> Vec<RawCommit> {
    raw.split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches('\n');
            let (hash, message) = record.split_once(FIELD_SEP)?;
            Some(RawCommit {
                hash: hash.trim().to_string(),
                message: message.to_string(),
            })
        })
        .collect()
}

impl VcsGateway for GitCli {
    fn current_branch(&self) -> Result<String> {
        let output = self.output(&["symbolic-ref", "--quiet", "--short", "HEAD"])?;
        if !output.status.success() {
            return Err(Error::DetachedHead);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn is_clean(&self) -> Result<bool> {
        let porcelain = self.run(&["status", "--porcelain", "--untracked-files=all"])?;
        Ok(porcelain.trim().is_empty())
    }

    fn status(&self) -> Result<String> {
        self.run(&["status"])
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map(|_| ())
    }

    fn pull(&self) -> Result<String> {
        self.run(&["pull"])
    }

    fn log_range(&self, base: &str, tip: &str) -> Result<Vec<String>> {
        let range = format!("{base}..{tip}");
        let out = self.run(&["log", "--format=%H", "--no-color", &range, "--"])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    fn commit_log(&self, branch: &str, limit: usize) -> Result<Vec<RawCommit>> {
        let max = format!("--max-count={limit}");
        let out = self.run(&["log", "--format=%H%x00%B%x1e", "--no-color", &max, branch, "--"])?;
        Ok(parse_log_records(&out))
    }

    fn reset_soft(&self, count: usize) -> Result<()> {
        let target = format!("HEAD~{count}");
        self.run(&["reset", "--soft", &target]).map(|_| ())
    }

    fn commit(&self, subject: &str, body: &str) -> Result<()> {
        let mut args = vec!["commit", "-m", subject];
        if !body.is_empty() {
            args.extend(["-m", body]);
        }
        self.run(&args).map(|_| ())
    }

    fn rebase(&self, onto: &str) -> Result<IntegrationOutcome> {
        self.succeeds(&["rebase", onto]).map(outcome)
    }

    fn merge(&self, branch: &str, flags: MergeFlags) -> Result<IntegrationOutcome> {
        let mut args = vec!["merge"];
        if flags.no_commit {
            args.push("--no-commit");
        }
        if flags.no_fast_forward {
            args.push("--no-ff");
        }
        if flags.edit {
            args.push("--edit");
            args.push(branch);
            let success = self.run_attached(&args)?;
            return self.merge_outcome(success);
        }
        args.push(branch);
        let success = self.succeeds(&args)?;
        self.merge_outcome(success)
    }

    fn merge_abort(&self) -> Result<()> {
        self.run(&["merge", "--abort"]).map(|_| ())
    }

    fn reset_merge(&self) -> Result<()> {
        self.run(&["reset", "--merge"]).map(|_| ())
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", remote, "--delete", branch]).map(|_| ())
    }

    fn delete_local_branch(&self, branch: &str) -> Result<()> {
        self.run(&["branch", "-D", branch]).map(|_| ())
    }
}
