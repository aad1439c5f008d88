//! HTML to Markdown normalization
//!
//! Converts an extracted HTML fragment into canonical Markdown with a
//! fixed, documented style: ATX headings, `-` bullet markers, fenced
//! backtick code blocks, and inlined links. The
//! conversion itself is delegated to the rule-based `htmd` engine; this
//! module pins the style and cleans up whitespace artifacts afterwards.

use htmd::options::{BulletListMarker, CodeBlockFence, CodeBlockStyle, HeadingStyle, LinkStyle, Options};
use htmd::HtmlToMarkdown;

/// Converts an HTML fragment into normalized Markdown
///
/// This is a total function: empty or whitespace-only input yields an
/// empty string, and a conversion failure degrades to an empty string with
/// a warning rather than propagating. Output post-processing collapses
/// runs of three or more newlines to exactly two and trims surrounding
/// whitespace, so re-normalizing already-normalized Markdown is a no-op.
///
/// # Example
///
/// ```
/// use sitedown::markdown::normalize;
///
/// assert_eq!(normalize("<h1>A</h1><h2>B</h2>"), "# A\n\n## B");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let converter = HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            bullet_list_marker: BulletListMarker::Dash,
            code_block_style: CodeBlockStyle::Fenced,
            code_block_fence: CodeBlockFence::Backticks,
            link_style: LinkStyle::Inlined,
            ..Options::default()
        })
        .build();

    match converter.convert(html) {
        Ok(markdown) => cleanup(&markdown),
        Err(e) => {
            tracing::warn!("HTML to Markdown conversion failed: {}", e);
            String::new()
        }
    }
}

/// Collapses runs of 3+ newlines to exactly 2 and trims the ends
fn cleanup(markdown: &str) -> String {
    let mut cleaned = String::with_capacity(markdown.len());
    let mut newline_run = 0;

    for ch in markdown.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                cleaned.push(ch);
            }
        } else {
            newline_run = 0;
            cleaned.push(ch);
        }
    }

    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_empty_paragraph() {
        assert_eq!(normalize("<p></p>"), "");
    }

    #[test]
    fn test_headings() {
        assert_eq!(normalize("<h1>A</h1><h2>B</h2>"), "# A\n\n## B");
    }

    #[test]
    fn test_paragraphs_are_blank_line_separated() {
        assert_eq!(normalize("<p>First</p><p>Second</p>"), "First\n\nSecond");
    }

    #[test]
    fn test_inline_link() {
        assert_eq!(
            normalize(r#"<a href="https://example.com">Example</a>"#),
            "[Example](https://example.com)"
        );
    }

    #[test]
    fn test_strong_delimiter() {
        assert_eq!(normalize("<strong>loud</strong>"), "**loud**");
    }

    #[test]
    fn test_list_markers() {
        let markdown = normalize("<ul><li>one</li><li>two</li></ul>");
        assert!(markdown.contains("- one"));
        assert!(markdown.contains("- two"));
    }

    #[test]
    fn test_newline_runs_collapse() {
        assert_eq!(cleanup("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_cleanup_trims_ends() {
        assert_eq!(cleanup("\n\n  # Title  \n\n\n"), "# Title");
    }

    #[test]
    fn test_normalization_is_idempotent_on_whitespace() {
        let once = normalize("<h1>Welcome</h1><p>Hello</p><p>World</p>");
        assert_eq!(cleanup(&once), once);
    }
}
