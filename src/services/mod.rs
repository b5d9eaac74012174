// src/services/mod.rs

//! Fetching, probing, and extraction services.

mod connectivity;
mod extract;
mod fetch;

pub use connectivity::is_online;
pub use extract::LectureExtractor;
pub use fetch::{create_client, fetch_page};
