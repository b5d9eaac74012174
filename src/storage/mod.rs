// src/storage/mod.rs

//! Seen-set persistence.
//!
//! The seen-set is a single JSON document keyed by source key, then by
//! lecture URL:
//!
//! ```text
//! {
//!   "numerical_analysis": { "/files/l1.pdf": { "name": "...", "url": "..." } },
//!   "complexity": {}
//! }
//! ```
//!
//! Loaded once at the start of a run, mutated in memory, written back
//! whole only after a successful notification.

mod local;

pub use local::SeenStore;
