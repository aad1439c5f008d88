//! Sitedown: a sitemap-to-Markdown crawler
//!
//! This crate resolves a sitemap (local file or remote URL, including
//! sitemap-of-sitemaps indices), fetches every listed page, extracts its
//! meaningful content, converts it to Markdown, and aggregates everything
//! into a single report with live progress telemetry.

pub mod crawler;
pub mod extract;
pub mod markdown;
pub mod progress;
pub mod report;
pub mod sitemap;

use thiserror::Error;

/// Fatal errors that abort a crawl before any page is attempted
#[derive(Debug, Error)]
pub enum SitedownError {
    #[error("failed to load sitemap from file {path}: {source}")]
    SitemapFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load sitemap from {url}: {source}")]
    SitemapFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to load sitemap from {url}: HTTP {status}")]
    SitemapStatus { url: String, status: u16 },

    #[error("failed to parse sitemap XML: {0}")]
    MalformedSitemap(String),

    #[error("invalid sitemap format: missing urlset or sitemapindex")]
    UnrecognizedSitemap,

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-page errors. These never abort a run; the orchestrator converts
/// each one into a [`crawler::CrawlFailure`] carrying the display string.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("not HTML content: {content_type}")]
    ContentType { content_type: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("page did not finish rendering: {0}")]
    RenderTimeout(String),

    #[error("WebDriver session error: {0}")]
    Webdriver(String),
}

/// Result type alias for fatal crawl operations
pub type Result<T> = std::result::Result<T, SitedownError>;

// Re-export commonly used types
pub use crawler::{crawl, CrawlAggregate, CrawlFailure, CrawlOptions, PageResult};
pub use extract::{classify, ExtractedContent, Heading, PageKind};
pub use progress::{ProgressCallback, ProgressSnapshot, ProgressTracker};
pub use sitemap::PageLocation;
