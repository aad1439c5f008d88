//! Sitemap source loading
//!
//! A sitemap source is either an absolute URL (fetched over the network) or
//! a local file path (read as UTF-8). The decision is a pure syntax check on
//! the source string, not a filesystem probe.

use crate::SitedownError;
use reqwest::Client;

/// Returns true if the source string parses as an absolute URL
///
/// Relative paths like `./sitemap.xml` or `pages/sitemap.xml` fail URL
/// parsing and are treated as file paths.
///
/// # Example
///
/// ```
/// use sitedown::sitemap::is_url;
///
/// assert!(is_url("https://example.com/sitemap.xml"));
/// assert!(!is_url("./sitemap.xml"));
/// ```
pub fn is_url(source: &str) -> bool {
    url::Url::parse(source).is_ok()
}

/// Loads the raw sitemap XML from a file path or URL
///
/// Any failure here is fatal: a missing file, a network error, or a non-2xx
/// response on the top-level sitemap aborts the run before any page is
/// attempted.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `source` - A URL or a file path
pub async fn load_sitemap(client: &Client, source: &str) -> Result<String, SitedownError> {
    if is_url(source) {
        load_from_url(client, source).await
    } else {
        load_from_file(source).await
    }
}

async fn load_from_file(path: &str) -> Result<String, SitedownError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SitedownError::SitemapFile {
            path: path.to_string(),
            source,
        })
}

async fn load_from_url(client: &Client, url: &str) -> Result<String, SitedownError> {
    let response =
        client
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url_absolute() {
        assert!(is_url("https://example.com/sitemap.xml"));
        assert!(is_url("http://localhost:8080/sitemap.xml"));
    }

    #[test]
    fn test_is_url_rejects_paths() {
        assert!(!is_url("./sitemap.xml"));
        assert!(!is_url("sitemap.xml"));
        assert!(!is_url("/var/data/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<urlset></urlset>").unwrap();

        let client = Client::new();
        let content = load_sitemap(&client, file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(content, "<urlset></urlset>");
    }

    #[tokio::test]
    async fn test_load_from_missing_file() {
        let client = Client::new();
        let result = load_sitemap(&client, "/nonexistent/sitemap.xml").await;
        assert!(matches!(result, Err(SitedownError::SitemapFile { .. })));
    }
}
