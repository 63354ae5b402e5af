//! git-squash: finish a feature branch in one go
//!
//! Pulls the integration branch, rebases the feature branch onto it,
//! squashes the feature branch into one well-formed commit, merges it with
//! `--no-ff`, and optionally deletes the feature branch.
//!
//! The library holds the workflow engine; the `git-squash` binary wires it
//! to the terminal.

pub mod config;
pub mod editor;
pub mod error;
pub mod guard;
pub mod history;
pub mod interaction;
pub mod probe;
pub mod types;
pub mod vcs;
pub mod workflow;
