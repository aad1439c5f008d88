//! Content extraction from crawled pages
//!
//! Given a fetched page, this module decides whether the server-delivered
//! HTML is enough (static extraction) or whether the page is a script-driven
//! application that must be rendered first (dynamic extraction), and then
//! isolates its title, description, main content region, and heading
//! outline. Both paths converge on the same [`ExtractedContent`] shape.

pub mod browser;
pub mod static_html;

pub use browser::{Renderer, RendererConfig};
pub use static_html::extract;

use serde::Serialize;

/// Title used when no `<title>` or `<h1>` source is found
pub const UNTITLED_PAGE: &str = "Untitled Page";

/// One heading of the document outline, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: u8,
    /// Trimmed heading text, never empty
    pub text: String,
}

/// Intermediate result of content extraction, consumed once by the
/// Markdown normalizer
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    /// Page title, falling back to [`UNTITLED_PAGE`]
    pub title: String,
    /// `<meta name="description">` content, if present
    pub description: Option<String>,
    /// Raw HTML of the isolated main content region; may be empty
    pub content: String,
    /// Document outline, in document order
    pub headings: Vec<Heading>,
}

/// How a page should be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Server-delivered HTML is complete; parse it directly
    Static,
    /// The page is a script-rendered application; render it first
    Dynamic,
}

/// Framework signatures that mark a page as script-rendered: root mount
/// elements with well-known ids, data-island script tags, and framework
/// boot attributes.
const FRAMEWORK_MARKERS: &[&str] = &[
    "__next",
    "__NEXT_DATA__",
    "id=\"root\"",
    "id=\"app\"",
    "ng-version",
    "data-reactroot",
    "v-cloak",
];

/// Classifies raw HTML as statically parseable or requiring rendering
///
/// A page is [`PageKind::Dynamic`] if its raw HTML contains any of a fixed
/// set of framework signature markers; otherwise it is static.
pub fn classify(html: &str) -> PageKind {
    if FRAMEWORK_MARKERS.iter().any(|marker| html.contains(marker)) {
        PageKind::Dynamic
    } else {
        PageKind::Static
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_html_is_static() {
        let html = "<html><body><main><h1>Hello</h1></main></body></html>";
        assert_eq!(classify(html), PageKind::Static);
    }

    #[test]
    fn test_next_data_island_is_dynamic() {
        let html = r#"<html><body><script id="__NEXT_DATA__">{}</script></body></html>"#;
        assert_eq!(classify(html), PageKind::Dynamic);
    }

    #[test]
    fn test_react_root_mount_is_dynamic() {
        let html = r#"<html><body><div id="root"></div></body></html>"#;
        assert_eq!(classify(html), PageKind::Dynamic);
    }

    #[test]
    fn test_angular_boot_attribute_is_dynamic() {
        let html = r#"<html><body><app-root ng-version="17.0.1"></app-root></body></html>"#;
        assert_eq!(classify(html), PageKind::Dynamic);
    }

    #[test]
    fn test_vue_cloak_is_dynamic() {
        let html = r#"<html><body><div v-cloak></div></body></html>"#;
        assert_eq!(classify(html), PageKind::Dynamic);
    }
}
