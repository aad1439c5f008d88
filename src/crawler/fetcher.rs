//! HTTP fetcher for individual pages
//!
//! One shared client per run, one attempt per URL. A page fetch succeeds
//! only when the response status is in the success range and the
//! `content-type` header says HTML; everything else is a per-page error
//! that the orchestrator records without stopping the run.

use crate::PageError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client shared by the whole run
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("sitedown/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its HTML body
///
/// # Fetch contract
///
/// - non-2xx status -> [`PageError::Status`]
/// - `content-type` header without `text/html` (case-insensitive
///   substring match) -> [`PageError::ContentType`]
/// - network failure -> [`PageError::Network`]
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The page URL
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, PageError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PageError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.to_lowercase().contains("text/html") {
        return Err(PageError::ContentType { content_type });
    }

    response
        .text()
        .await
        .map_err(|e| PageError::Network(e.to_string()))
}
