// src/pipeline/mod.rs

//! Run orchestration: connectivity gate, per-source fetch/extract/diff,
//! notification, and conditional persistence.

mod diff;
mod run;

pub use diff::novel_lectures;
pub use run::{RunOutcome, run_pipeline};
