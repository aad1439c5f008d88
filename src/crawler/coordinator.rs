//! Crawl orchestration
//!
//! Drives the resolved page list one URL at a time: fetch, classify,
//! extract (statically or through the renderer), normalize, and record the
//! outcome. Every attempt updates the progress tracker; a failure on one
//! URL never aborts processing of the rest.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::CrawlOptions;
use crate::extract::{self, PageKind, Renderer};
use crate::markdown::normalize;
use crate::progress::{ProgressCallback, ProgressTracker};
use crate::sitemap::PageLocation;
use crate::{Heading, PageError};
use reqwest::Client;
use serde::Serialize;

/// Final record for one successfully crawled page
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// The crawled URL
    pub url: String,
    /// Extracted page title
    pub title: String,
    /// Meta description, if the page had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Normalized Markdown content
    pub content: String,
    /// Document outline, in document order
    pub headings: Vec<Heading>,
    /// RFC 3339 completion timestamp
    pub crawled_at: String,
}

/// Record for one URL that could not be crawled
#[derive(Debug, Clone, Serialize)]
pub struct CrawlFailure {
    /// The URL that failed
    pub url: String,
    /// Human-readable failure message
    pub error: String,
    /// RFC 3339 failure timestamp
    pub timestamp: String,
}

/// Terminal output of a crawl run
///
/// `success_count + error_count == total_count`, and both lists preserve
/// the order in which their URLs were attempted.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlAggregate {
    pub success_count: usize,
    pub error_count: usize,
    pub total_count: usize,
    pub pages: Vec<PageResult>,
    pub failures: Vec<CrawlFailure>,
}

/// Crawls every location in list order and aggregates the outcomes
///
/// This function is total: per-page errors are folded into the aggregate's
/// failure list, never raised. After each attempt the progress tracker is
/// incremented, which synchronously notifies `on_progress` (when supplied)
/// with a fresh snapshot.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `options` - Rendering configuration for dynamic pages
/// * `locations` - Resolved page list, crawled strictly in order
/// * `on_progress` - Optional progress observer
pub async fn crawl_pages(
    client: &Client,
    options: &CrawlOptions,
    locations: Vec<PageLocation>,
    on_progress: Option<ProgressCallback>,
) -> CrawlAggregate {
    let total_count = locations.len();
    let mut tracker = ProgressTracker::new(total_count, on_progress);

    // One WebDriver session for the whole run, opened lazily by the first
    // dynamic page.
    let mut renderer = Renderer::new(options.renderer.clone());

    let mut pages = Vec::new();
    let mut failures = Vec::new();

    for location in locations {
        let url = location.location;
        tracing::debug!("Crawling {}", url);

        match crawl_single_page(client, &mut renderer, &url).await {
            Ok(page) => {
                pages.push(page);
                tracker.increment_completed();
            }
            Err(e) => {
                tracing::debug!("Failed to crawl {}: {}", url, e);
                failures.push(CrawlFailure {
                    url,
                    error: e.to_string(),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                });
                tracker.increment_failed();
            }
        }
    }

    renderer.shutdown().await;

    CrawlAggregate {
        success_count: pages.len(),
        error_count: failures.len(),
        total_count,
        pages,
        failures,
    }
}

/// Fetches, classifies, extracts, and normalizes one page
async fn crawl_single_page(
    client: &Client,
    renderer: &mut Renderer,
    url: &str,
) -> Result<PageResult, PageError> {
    let html = fetch_page(client, url).await?;

    let extracted = match extract::classify(&html) {
        PageKind::Static => extract::extract(&html),
        PageKind::Dynamic => renderer.extract(url).await?,
    };

    let content = normalize(&extracted.content);

    Ok(PageResult {
        url: url.to_string(),
        title: extracted.title,
        description: extracted.description,
        content,
        headings: extracted.headings,
        crawled_at: chrono::Utc::now().to_rfc3339(),
    })
}
