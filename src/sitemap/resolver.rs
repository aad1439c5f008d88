//! Recursive sitemap-index expansion
//!
//! A sitemap index shards a large sitemap across child documents. The
//! resolver flattens that shape into one ordered list of page locations,
//! fetching each referenced sub-sitemap over the network. A sub-sitemap
//! that cannot be loaded or parsed is skipped with a diagnostic; it never
//! aborts resolution of its siblings.

use crate::sitemap::parser::{parse_sitemap_document, PageLocation, SitemapDocument};
use crate::SitedownError;
use reqwest::Client;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

/// Maximum nesting depth below the top-level sitemap. Deeper references are
/// skipped like unreachable sub-sitemaps.
pub const MAX_SITEMAP_DEPTH: usize = 5;

/// Expands sitemap documents into a flat list of page locations
pub struct SitemapResolver<'a> {
    client: &'a Client,
}

impl<'a> SitemapResolver<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Resolves raw sitemap XML into an ordered list of page locations
    ///
    /// A `urlset` document maps directly to its entries. A `sitemapindex`
    /// document is expanded recursively: each child sitemap is fetched and
    /// resolved, and the results are concatenated in encountered order.
    /// Self-referencing indices and nesting beyond [`MAX_SITEMAP_DEPTH`]
    /// are skipped with a warning instead of recursing unboundedly.
    ///
    /// # Arguments
    ///
    /// * `xml` - The raw top-level sitemap XML
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PageLocation>)` - The flattened page list
    /// * `Err(SitedownError)` - The top-level document is malformed or has
    ///   an unrecognized root; sub-sitemap failures are non-fatal
    pub async fn resolve(&self, xml: &str) -> Result<Vec<PageLocation>, SitedownError> {
        let mut visited = HashSet::new();
        self.resolve_at_depth(xml, 0, &mut visited).await
    }

    /// Recursive worker. Boxed because async recursion needs an indirected
    /// future type.
    fn resolve_at_depth<'b>(
        &'b self,
        xml: &'b str,
        depth: usize,
        visited: &'b mut HashSet<String>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<PageLocation>, SitedownError>> + Send + 'b>> {
        Box::pin(async move {
            match parse_sitemap_document(xml)? {
                SitemapDocument::UrlSet(locations) => Ok(locations),
                SitemapDocument::Index(sitemaps) => {
                    let mut all_locations = Vec::new();

                    for sitemap_url in sitemaps {
                        if depth + 1 > MAX_SITEMAP_DEPTH {
                            tracing::warn!(
                                "Skipping sitemap nested deeper than {} levels: {}",
                                MAX_SITEMAP_DEPTH,
                                sitemap_url
                            );
                            continue;
                        }

                        if !visited.insert(sitemap_url.clone()) {
                            tracing::warn!(
                                "Skipping already visited sitemap (reference cycle): {}",
                                sitemap_url
                            );
                            continue;
                        }

                        let content = match self.fetch_sub_sitemap(&sitemap_url).await {
                            Ok(content) => content,
                            Err(e) => {
                                tracing::warn!("Failed to load sitemap {}: {}", sitemap_url, e);
                                continue;
                            }
                        };

                        match self.resolve_at_depth(&content, depth + 1, visited).await {
                            Ok(locations) => all_locations.extend(locations),
                            Err(e) => {
                                tracing::warn!("Failed to resolve sitemap {}: {}", sitemap_url, e);
                            }
                        }
                    }

                    Ok(all_locations)
                }
            }
        })
    }

    async fn fetch_sub_sitemap(&self, url: &str) -> Result<String, SitedownError> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| SitedownError::SitemapFetch {
                    url: url.to_string(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SitedownError::SitemapStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| SitedownError::SitemapFetch {
                url: url.to_string(),
                source,
            })
    }
}
