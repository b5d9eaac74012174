// src/pipeline/run.rs

//! The full watcher run, start to finish.

use crate::error::{AppError, Result};
use crate::models::{Config, MailCredentials, NewLecture};
use crate::notify::Mailer;
use crate::pipeline::novel_lectures;
use crate::services::{LectureExtractor, create_client, fetch_page, is_online};
use crate::storage::SeenStore;
use crate::utils::log;

/// Subject line for the notification, after the configured prefix.
const SUBJECT: &str = "New Lectures Are Here!";

/// What one run did.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// New lectures found across all sources
    pub new_count: usize,
    /// Whether the notification was delivered
    pub notified: bool,
    /// Whether the seen-set was written back
    pub persisted: bool,
}

/// Build the plain-text notification body, one line per new lecture.
pub fn format_body(new_lectures: &[NewLecture]) -> String {
    new_lectures
        .iter()
        .map(NewLecture::format)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The persist gate: write the seen-set back only when the mail went
/// out. A skipped save means the same lectures are re-detected and
/// re-sent on the next scheduled run.
async fn persist_if_sent(store: &SeenStore, sent: bool) -> Result<bool> {
    if sent {
        store.save().await?;
        log::info(&format!("Seen-set saved to {}", store.path().display()));
        Ok(true)
    } else {
        log::warn("Email not sent; seen-set left untouched for the next run");
        Ok(false)
    }
}

/// Run the pipeline once.
///
/// Connectivity gate, then for each source: fetch, extract, diff. If any
/// new lectures were found, send one email; persist the seen-set only
/// when the send succeeded. A failed send is not fatal: the run ends
/// normally without persisting and the same lectures are re-detected
/// next time.
///
/// Fetch, parse, and state-load failures abort the whole run.
pub async fn run_pipeline(
    config: &Config,
    credentials: &MailCredentials,
    recipients: &[String],
) -> Result<RunOutcome> {
    let client = create_client(&config.crawler)?;

    if !is_online(
        &client,
        &config.crawler.probe_url,
        config.crawler.probe_timeout_secs,
    )
    .await
    {
        return Err(AppError::Offline(config.crawler.probe_url.clone()));
    }

    let mut store = SeenStore::load(&config.paths.state_file, &config.sources).await?;
    let extractor = LectureExtractor::new(&config.extraction)?;

    let mut new_lectures = Vec::new();
    for source in &config.sources {
        log::header(&source.name);

        let html = fetch_page(&client, &source.url).await?;
        let extracted = extractor.extract(&html);

        for lecture in &extracted {
            log::sub_item(&format!("{} : {}", lecture.name, lecture.url));
        }
        log::separator();

        new_lectures.extend(novel_lectures(&mut store, source, &extracted));
    }

    let mut outcome = RunOutcome {
        new_count: new_lectures.len(),
        ..RunOutcome::default()
    };

    if new_lectures.is_empty() {
        log::info("No new lectures, not sending an email.");
        return Ok(outcome);
    }

    log::info(&format!("New lectures: {}", new_lectures.len()));
    for lecture in &new_lectures {
        log::sub_item(&lecture.format());
    }

    let body = format_body(&new_lectures);
    let sent = match Mailer::new(&config.mail, credentials, recipients) {
        Ok(mailer) => match mailer.send(SUBJECT, &body).await {
            Ok(()) => {
                log::success("Successfully sent email");
                true
            }
            Err(e) => {
                log::error(&format!("Failed to send email: {e}"));
                false
            }
        },
        Err(e) => {
            log::error(&format!("Failed to set up mailer: {e}"));
            false
        }
    };

    outcome.notified = sent;
    outcome.persisted = persist_if_sent(&store, sent).await?;

    Ok(outcome)
}
