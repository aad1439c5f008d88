//! Crawler module for fetching and processing sitemap pages
//!
//! This module contains the core crawling logic:
//! - HTTP client construction and the page fetch contract
//! - Sequential orchestration of fetch, extraction, and normalization
//! - Success/failure bookkeeping and the final aggregate

mod coordinator;
mod fetcher;

pub use coordinator::{crawl_pages, CrawlAggregate, CrawlFailure, PageResult};
pub use fetcher::{build_http_client, fetch_page};

use crate::extract::RendererConfig;
use crate::progress::ProgressCallback;
use crate::sitemap::{load_sitemap, SitemapResolver};
use crate::SitedownError;

/// Options for a crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// WebDriver configuration used for script-rendered pages
    pub renderer: RendererConfig,
}

/// Runs the complete pipeline against a sitemap source
///
/// This is the main entry point for a crawl. It will:
/// 1. Load the sitemap from a file path or URL
/// 2. Resolve sitemap indices into a flat page list
/// 3. Crawl every page in order, collecting successes and failures
///
/// Failures to obtain or recognize the top-level sitemap are fatal and
/// produce no partial aggregate; per-page failures are folded into the
/// aggregate's failure list.
///
/// # Arguments
///
/// * `source` - Sitemap URL or file path
/// * `options` - Rendering configuration for dynamic pages
/// * `on_progress` - Optional observer notified after every page attempt
///
/// # Returns
///
/// * `Ok(CrawlAggregate)` - Results for the whole run
/// * `Err(SitedownError)` - The sitemap could not be loaded or parsed
pub async fn crawl(
    source: &str,
    options: CrawlOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<CrawlAggregate, SitedownError> {
    let client = build_http_client()?;

    tracing::info!("Loading sitemap from {}", source);
    let xml = load_sitemap(&client, source).await?;

    let resolver = SitemapResolver::new(&client);
    let locations = resolver.resolve(&xml).await?;
    tracing::info!("Resolved {} page locations", locations.len());

    Ok(crawl_pages(&client, &options, locations, on_progress).await)
}
