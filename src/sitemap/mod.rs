//! Sitemap module for locating the pages to crawl
//!
//! This module turns a sitemap source (file path or URL) into a flat,
//! ordered list of page locations:
//!
//! - `loader`: decides file vs. network by URL syntax and loads the raw XML
//! - `parser`: parses a single sitemap document (urlset or sitemapindex)
//! - `resolver`: recursively expands sitemap indices into page locations

mod loader;
mod parser;
mod resolver;

pub use loader::{is_url, load_sitemap};
pub use parser::{parse_sitemap_document, PageLocation, SitemapDocument};
pub use resolver::{SitemapResolver, MAX_SITEMAP_DEPTH};
