// src/services/connectivity.rs

//! Network connectivity probe.

use std::time::Duration;

use reqwest::Client;

/// Check basic network reachability.
///
/// Issues one GET with a short timeout to a well-known endpoint and
/// reports whether it completed. Not retried; the orchestrator treats a
/// failed probe as fatal for the run.
pub async fn is_online(client: &Client, probe_url: &str, timeout_secs: u64) -> bool {
    client
        .get(probe_url)
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await
        .is_ok()
}
