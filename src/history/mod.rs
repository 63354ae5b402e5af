//! Commit history of the active branch
//!
//! Two halves, following the gather/plan split used elsewhere:
//! - [`CommitHistoryReader`] - effectful, reads the commits to squash
//! - [`synthesize`] - pure, folds them into one commit body

mod reader;
mod synthesize;

pub use reader::CommitHistoryReader;
pub use synthesize::{AggregatedBody, synthesize};
