//! Report assembly
//!
//! Renders the final user-facing Markdown report from a crawl aggregate:
//! a header with run totals, a table of contents with per-page anchors,
//! one section per successful page, and an error-details section. The
//! rendering is deterministic given the aggregate and the source string.

use crate::crawler::{CrawlAggregate, CrawlFailure, PageResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Renders the full crawl report as Markdown
///
/// # Arguments
///
/// * `aggregate` - The crawl results
/// * `source` - The sitemap source identifier the run started from
pub fn render(aggregate: &CrawlAggregate, source: &str) -> String {
    let header = format_header(aggregate, source);
    let toc = format_table_of_contents(&aggregate.pages, &aggregate.failures);
    let pages = format_page_sections(&aggregate.pages);
    let errors = if aggregate.failures.is_empty() {
        String::new()
    } else {
        // Error anchors continue the TOC numbering after the page sections.
        format_error_section(&aggregate.failures, aggregate.pages.len())
    };

    [header, toc, pages, errors]
        .iter()
        .filter(|section| !section.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Renders the report and writes it to a file
pub fn write_report(
    aggregate: &CrawlAggregate,
    source: &str,
    output_path: &Path,
) -> std::io::Result<()> {
    let markdown = render(aggregate, source);
    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;
    Ok(())
}

fn format_header(aggregate: &CrawlAggregate, source: &str) -> String {
    format!(
        "# Sitemap Crawl Results\n\n\
         **Source**: {}\n\
         **Generated**: {}\n\
         **Total Pages**: {}\n\
         **Successful**: {}\n\
         **Failed**: {}",
        source,
        chrono::Utc::now().to_rfc3339(),
        aggregate.total_count,
        aggregate.success_count,
        aggregate.error_count,
    )
}

fn format_table_of_contents(pages: &[PageResult], failures: &[CrawlFailure]) -> String {
    if pages.is_empty() && failures.is_empty() {
        return "## Table of Contents\n\n*No pages were crawled*".to_string();
    }

    let mut md = String::from("## Table of Contents\n");
    let mut index = 1;

    for page in pages {
        md.push_str(&format!("\n{}. ✅ [{}](#page-{})", index, page.title, index));
        index += 1;
    }
    for failure in failures {
        md.push_str(&format!("\n{}. ❌ [{}](#error-{})", index, failure.url, index));
        index += 1;
    }

    md
}

fn format_page_sections(pages: &[PageResult]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| format_page_section(page, i + 1))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

fn format_page_section(page: &PageResult, page_number: usize) -> String {
    let mut md = format!(
        "## <a id=\"page-{}\"></a>{}\n\n**URL**: {}\n**Crawled**: {}",
        page_number, page.title, page.url, page.crawled_at
    );

    if let Some(description) = &page.description {
        md.push_str(&format!("\n**Description**: {}", description));
    }

    if !page.headings.is_empty() {
        md.push_str("\n\n### Page Structure\n");
        for heading in &page.headings {
            let indent = "  ".repeat(heading.level.saturating_sub(1) as usize);
            md.push_str(&format!("\n{}- {}", indent, heading.text));
        }
    }

    if page.content.trim().is_empty() {
        md.push_str("\n\n### Content\n\n*No content found*");
    } else {
        md.push_str(&format!("\n\n### Content\n\n{}", page.content));
    }

    md
}

fn format_error_section(failures: &[CrawlFailure], page_count: usize) -> String {
    let mut md = String::from("## Error Details\n");

    for (i, failure) in failures.iter().enumerate() {
        let anchor = page_count + i + 1;
        md.push_str(&format!(
            "\n### <a id=\"error-{}\"></a>Error {}\n\
             **URL**: {}\n\
             **Error**: {}\n\
             **Occurred**: {}\n",
            anchor,
            i + 1,
            failure.url,
            failure.error,
            failure.timestamp
        ));
    }

    md
}
