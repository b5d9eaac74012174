// src/services/fetch.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Create a configured HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and return the raw response body as text.
///
/// One GET, no retry. Any transport error propagates and aborts the
/// whole run: a failed source must not be mistaken for an empty one.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let text = client.get(url).send().await?.text().await?;
    Ok(text)
}
