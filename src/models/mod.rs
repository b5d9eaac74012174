// src/models/mod.rs

//! Domain models for the watcher application.

mod config;
mod lecture;

// Re-export all public types
pub use config::{
    Config, CrawlerConfig, ExtractionConfig, MailConfig, MailCredentials, PathsConfig, Source,
    recipients_from_env,
};
pub use lecture::{Lecture, NewLecture};
