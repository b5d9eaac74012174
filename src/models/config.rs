//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::log;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and probing behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// HTML extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Outbound mail settings
    #[serde(default)]
    pub mail: MailConfig,

    /// File path settings
    #[serde(default)]
    pub paths: PathsConfig,

    /// Course pages to watch
    #[serde(default = "defaults::default_sources")]
    pub sources: Vec<Source>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn(&format!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            ));
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.probe_timeout_secs == 0 {
            return Err(AppError::validation(
                "crawler.probe_timeout_secs must be > 0",
            ));
        }
        url::Url::parse(&self.crawler.probe_url)?;
        if self.extraction.lecture_selector.trim().is_empty() {
            return Err(AppError::validation("extraction.lecture_selector is empty"));
        }
        if self.mail.smtp_host.trim().is_empty() {
            return Err(AppError::validation("mail.smtp_host is empty"));
        }
        if self.paths.state_file.trim().is_empty() {
            return Err(AppError::validation("paths.state_file is empty"));
        }
        if self.sources.is_empty() {
            return Err(AppError::validation("No sources defined"));
        }
        for source in &self.sources {
            if source.key.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Source '{}' has an empty key",
                    source.name
                )));
            }
            url::Url::parse(&source.url)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            extraction: ExtractionConfig::default(),
            mail: MailConfig::default(),
            paths: PathsConfig::default(),
            sources: defaults::default_sources(),
        }
    }
}

/// One course page to watch, identified by a stable key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    /// Display name (e.g., "Complexity")
    pub name: String,

    /// URL of the course page
    pub url: String,

    /// Stable identifier used to partition the seen-set
    pub key: String,
}

/// HTTP client and connectivity probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Endpoint hit by the connectivity probe
    #[serde(default = "defaults::probe_url")]
    pub probe_url: String,

    /// Short timeout for the connectivity probe, in seconds
    #[serde(default = "defaults::probe_timeout")]
    pub probe_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            probe_url: defaults::probe_url(),
            probe_timeout_secs: defaults::probe_timeout(),
        }
    }
}

/// HTML extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// CSS selector chain matching lecture summary links
    #[serde(default = "defaults::lecture_selector")]
    pub lecture_selector: String,

    /// Reverse link display text character-by-character.
    ///
    /// The original deployment reversed captured text as an RTL display
    /// fix-up. Off by default; enable only to reproduce legacy output.
    #[serde(default)]
    pub reverse_display_text: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lecture_selector: defaults::lecture_selector(),
            reverse_display_text: false,
        }
    }
}

/// Outbound mail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP submission host
    #[serde(default = "defaults::smtp_host")]
    pub smtp_host: String,

    /// SMTP submission port (STARTTLS)
    #[serde(default = "defaults::smtp_port")]
    pub smtp_port: u16,

    /// Prefix for the notification subject line
    #[serde(default = "defaults::subject_prefix")]
    pub subject_prefix: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: defaults::smtp_host(),
            smtp_port: defaults::smtp_port(),
            subject_prefix: defaults::subject_prefix(),
        }
    }
}

/// File path settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path of the persisted seen-set file
    #[serde(default = "defaults::state_file")]
    pub state_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_file: defaults::state_file(),
        }
    }
}

/// Sender credentials for the mail transport.
///
/// Read once at startup from the environment; never accessed ambiently
/// from pipeline internals.
#[derive(Debug, Clone)]
pub struct MailCredentials {
    /// Sender address
    pub sender: String,

    /// Sender secret (app password)
    pub secret: String,
}

impl MailCredentials {
    /// Read credentials from the environment.
    pub fn from_env() -> Result<Self> {
        let sender = env::var("LECTURE_WATCH_SENDER_EMAIL")
            .map_err(|_| AppError::config("LECTURE_WATCH_SENDER_EMAIL is not set"))?;
        let secret = env::var("LECTURE_WATCH_SENDER_PASSWORD")
            .map_err(|_| AppError::config("LECTURE_WATCH_SENDER_PASSWORD is not set"))?;
        Ok(Self { sender, secret })
    }
}

/// Read the recipient list from the environment.
///
/// Always a sequence of addresses, possibly of length one.
pub fn recipients_from_env() -> Result<Vec<String>> {
    let raw = env::var("LECTURE_WATCH_RECIPIENTS")
        .map_err(|_| AppError::config("LECTURE_WATCH_RECIPIENTS is not set"))?;
    let recipients: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if recipients.is_empty() {
        return Err(AppError::config("LECTURE_WATCH_RECIPIENTS is empty"));
    }
    Ok(recipients)
}

mod defaults {
    use super::Source;

    const BASE_URL: &str = "http://www.arazim-project.com";

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; lecture-watch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn probe_url() -> String {
        "http://google.com".into()
    }
    pub fn probe_timeout() -> u64 {
        1
    }

    // Extraction defaults
    pub fn lecture_selector() -> String {
        ".field-name-field-lesson-sum .field-items .field-item .field-name-field-sum .file a"
            .into()
    }

    // Mail defaults
    pub fn smtp_host() -> String {
        "smtp.gmail.com".into()
    }
    pub fn smtp_port() -> u16 {
        587
    }
    pub fn subject_prefix() -> String {
        "[Arazim]".into()
    }

    // Path defaults
    pub fn state_file() -> String {
        "saved_lectures.json".into()
    }

    // Source defaults
    pub fn default_sources() -> Vec<Source> {
        vec![
            Source {
                name: "Numerical Analysis".to_string(),
                url: format!("{}/node/386", BASE_URL),
                key: "numerical_analysis".to_string(),
            },
            Source {
                name: "Complexity".to_string(),
                url: format!("{}/node/369", BASE_URL),
                key: "complexity".to_string(),
            },
        ]
    }
}
