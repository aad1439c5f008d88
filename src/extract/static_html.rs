//! Static content extraction
//!
//! Runs the extraction heuristics directly against server-delivered HTML
//! with no script execution. Static extraction never fails; missing data
//! degrades to sentinels or empty values.

use crate::extract::{ExtractedContent, Heading, UNTITLED_PAGE};
use scraper::{Html, Selector};

/// Elements removed from the document before the main region is selected
const CHROME_SELECTOR: &str = "nav, header, footer, script, style";

/// Extracts title, description, main content, and headings from raw HTML
///
/// The heuristic cascade:
/// - title: first `<title>` text, else first `<h1>` text, else the
///   "Untitled Page" sentinel
/// - description: `content` attribute of `<meta name="description">`
/// - main content: after stripping navigation chrome from the document,
///   the first `<main>`, else the first `<article>`, else the stripped
///   `<body>`
/// - headings: every `h1`-`h6` remaining after the strip, captured in a
///   single forward traversal so duplicate heading text keeps its true
///   document order
pub fn extract(html: &str) -> ExtractedContent {
    let mut document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_else(|| UNTITLED_PAGE.to_string());
    let description = extract_description(&document);

    strip_elements(&mut document, CHROME_SELECTOR);

    let content = extract_main_content(&document);
    let headings = collect_headings(&document);

    ExtractedContent {
        title,
        description,
        content,
        headings,
    }
}

/// Extracts the page title from `<title>`, falling back to the first `<h1>`
pub(crate) fn extract_title(document: &Html) -> Option<String> {
    for css in ["title", "h1"] {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        let text = document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());
        if text.is_some() {
            return text;
        }
    }
    None
}

/// Extracts the meta description, if one is present and non-empty
pub(crate) fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Detaches every element matching `css` from the document tree
pub(crate) fn strip_elements(document: &mut Html, css: &str) {
    let Ok(selector) = Selector::parse(css) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Returns the inner HTML of the first element matching `css`
pub(crate) fn first_inner_html(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.inner_html())
}

fn extract_main_content(document: &Html) -> String {
    first_inner_html(document, "main")
        .or_else(|| first_inner_html(document, "article"))
        .or_else(|| first_inner_html(document, "body"))
        .unwrap_or_default()
}

/// Collects every non-empty `h1`-`h6` heading in document order
pub(crate) fn collect_headings(document: &Html) -> Vec<Heading> {
    let Ok(selector) = Selector::parse("h1, h2, h3, h4, h5, h6") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let level = match element.value().name() {
                "h1" => 1,
                "h2" => 2,
                "h3" => 3,
                "h4" => 4,
                "h5" => 5,
                "h6" => 6,
                _ => return None,
            };
            let text = element.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(Heading { level, text })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_title_tag() {
        let extracted = extract("<html><head><title>  My Page  </title></head><body></body></html>");
        assert_eq!(extracted.title, "My Page");
    }

    #[test]
    fn test_title_falls_back_to_h1() {
        let extracted = extract("<html><body><main><h1>From Heading</h1></main></body></html>");
        assert_eq!(extracted.title, "From Heading");
    }

    #[test]
    fn test_title_sentinel_when_nothing_found() {
        let extracted = extract("<html><body><p>no title here</p></body></html>");
        assert_eq!(extracted.title, UNTITLED_PAGE);
    }

    #[test]
    fn test_empty_title_tag_falls_back() {
        let extracted =
            extract("<html><head><title>  </title></head><body><h1>Real</h1></body></html>");
        assert_eq!(extracted.title, "Real");
    }

    #[test]
    fn test_description() {
        let html = r#"<html><head><meta name="description" content=" A summary. "></head><body></body></html>"#;
        let extracted = extract(html);
        assert_eq!(extracted.description.as_deref(), Some("A summary."));
    }

    #[test]
    fn test_missing_description() {
        let extracted = extract("<html><body></body></html>");
        assert_eq!(extracted.description, None);
    }

    #[test]
    fn test_content_from_main() {
        let html = "<html><body><nav>menu</nav><main><p>Body text</p></main></body></html>";
        let extracted = extract(html);
        assert_eq!(extracted.content, "<p>Body text</p>");
    }

    #[test]
    fn test_content_falls_back_to_article() {
        let html = "<html><body><article><p>Article text</p></article></body></html>";
        let extracted = extract(html);
        assert_eq!(extracted.content, "<p>Article text</p>");
    }

    #[test]
    fn test_content_falls_back_to_stripped_body() {
        let html = "<html><body><nav>menu</nav><p>Loose text</p><footer>foot</footer></body></html>";
        let extracted = extract(html);
        assert!(extracted.content.contains("<p>Loose text</p>"));
        assert!(!extracted.content.contains("menu"));
        assert!(!extracted.content.contains("foot"));
    }

    #[test]
    fn test_scripts_and_styles_are_stripped() {
        let html = "<html><body><script>alert(1)</script><style>p{}</style><p>Kept</p></body></html>";
        let extracted = extract(html);
        assert!(extracted.content.contains("Kept"));
        assert!(!extracted.content.contains("alert"));
        assert!(!extracted.content.contains("p{}"));
    }

    #[test]
    fn test_headings_in_document_order() {
        let html = "<html><body>
            <h2>Second level first</h2>
            <h1>Top</h1>
            <h3>Third</h3>
        </body></html>";
        let extracted = extract(html);

        let levels: Vec<u8> = extracted.headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![2, 1, 3]);
        assert_eq!(extracted.headings[0].text, "Second level first");
    }

    #[test]
    fn test_duplicate_heading_text_keeps_order() {
        let html = "<html><body><h1>Same</h1><h2>Other</h2><h1>Same</h1></body></html>";
        let extracted = extract(html);

        let pairs: Vec<(u8, &str)> = extracted
            .headings
            .iter()
            .map(|h| (h.level, h.text.as_str()))
            .collect();
        assert_eq!(pairs, vec![(1, "Same"), (2, "Other"), (1, "Same")]);
    }

    #[test]
    fn test_empty_headings_are_skipped() {
        let html = "<html><body><h1>  </h1><h2>Real</h2></body></html>";
        let extracted = extract(html);
        assert_eq!(extracted.headings.len(), 1);
        assert_eq!(extracted.headings[0].text, "Real");
    }

    #[test]
    fn test_headings_inside_stripped_chrome_are_ignored() {
        let html = "<html><body><header><h1>Site name</h1></header><main><h1>Page</h1></main></body></html>";
        let extracted = extract(html);
        assert_eq!(extracted.headings.len(), 1);
        assert_eq!(extracted.headings[0].text, "Page");
    }
}
