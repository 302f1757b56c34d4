//! Pipeline entry points.
//!
//! - `run`: check every platform and group, then flush the snapshot
//! - `check_*`: per-target diffing against the snapshot store
//! - `Report`: findings rendered to Markdown and HTML

pub mod check;
pub mod diff;
pub mod report;
pub mod run;
#[cfg(test)]
mod testing;

pub use check::{check_group, check_platform, check_production};
pub use diff::has_new_comment;
pub use report::{Report, Section};
pub use run::{Targets, run, run_checks};
