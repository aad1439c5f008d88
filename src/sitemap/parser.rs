//! Sitemap XML parsing
//!
//! Parses a single sitemap document into either a list of sub-sitemap URLs
//! (for `sitemapindex` roots) or a list of page locations (for `urlset`
//! roots), per the standard sitemap schema.

use crate::SitedownError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// One resolved crawl target from a urlset entry
///
/// Only `location` is required by the schema. The optional metadata fields
/// are carried through opaquely: `last_modified` and `change_frequency` are
/// kept as strings, and `priority` is parsed as a float (non-numeric values
/// become `NaN` rather than failing resolution).
#[derive(Debug, Clone, PartialEq)]
pub struct PageLocation {
    /// Absolute URL of the page. An entry without a `loc` yields an empty
    /// string here, which fails at fetch time rather than at parse time.
    pub location: String,

    /// Raw `lastmod` value, if present
    pub last_modified: Option<String>,

    /// Raw `changefreq` value, if present
    pub change_frequency: Option<String>,

    /// Parsed `priority` value (0.0-1.0 per the schema), if present
    pub priority: Option<f64>,
}

/// A parsed sitemap document, before index expansion
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapDocument {
    /// A `sitemapindex` root: the `loc` of each child sitemap, in order
    Index(Vec<String>),

    /// A `urlset` root: one location per `url` entry, in order
    UrlSet(Vec<PageLocation>),
}

/// Element names we capture text for inside an entry
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Loc,
    LastMod,
    ChangeFreq,
    Priority,
}

/// Accumulates the child values of one `<url>` or `<sitemap>` entry
#[derive(Debug, Default)]
struct EntryBuilder {
    loc: Option<String>,
    lastmod: Option<String>,
    changefreq: Option<String>,
    priority: Option<String>,
}

impl EntryBuilder {
    fn into_location(self) -> PageLocation {
        PageLocation {
            location: self.loc.unwrap_or_default(),
            last_modified: self.lastmod,
            change_frequency: self.changefreq,
            // Non-numeric priorities propagate as NaN, never as a failure.
            priority: self.priority.map(|p| p.trim().parse().unwrap_or(f64::NAN)),
        }
    }
}

/// Parses a sitemap document into its index or urlset shape
///
/// # Arguments
///
/// * `xml` - The raw sitemap XML
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - The recognized document shape
/// * `Err(SitedownError::MalformedSitemap)` - The XML could not be parsed
/// * `Err(SitedownError::UnrecognizedSitemap)` - Parseable XML with neither
///   a `sitemapindex` nor a `urlset` root
pub fn parse_sitemap_document(xml: &str) -> Result<SitemapDocument, SitedownError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document: Option<SitemapDocument> = None;
    let mut entry: Option<EntryBuilder> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = start.local_name();
                if document.is_none() {
                    // The first element decides the document shape.
                    document = Some(recognize_root(name.as_ref())?);
                    continue;
                }
                match name.as_ref() {
                    b"sitemap" | b"url" => entry = Some(EntryBuilder::default()),
                    b"loc" => field = Some(Field::Loc),
                    b"lastmod" => field = Some(Field::LastMod),
                    b"changefreq" => field = Some(Field::ChangeFreq),
                    b"priority" => field = Some(Field::Priority),
                    _ => {}
                }
            }
            Ok(Event::Text(text)) => {
                let value = text
                    .unescape()
                    .map_err(|e| SitedownError::MalformedSitemap(e.to_string()))?;
                record_field(&mut entry, field, value.as_ref());
            }
            Ok(Event::CData(cdata)) => {
                let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                record_field(&mut entry, field, &value);
            }
            Ok(Event::Empty(empty)) => {
                // Self-closing elements carry no text; a self-closing root
                // is still a recognized (empty) document shape.
                if document.is_none() {
                    document = Some(recognize_root(empty.local_name().as_ref())?);
                }
            }
            Ok(Event::End(end)) => {
                let name = end.local_name();
                match name.as_ref() {
                    b"loc" | b"lastmod" | b"changefreq" | b"priority" => field = None,
                    b"sitemap" => {
                        if let (Some(built), Some(SitemapDocument::Index(sitemaps))) =
                            (entry.take(), &mut document)
                        {
                            sitemaps.push(built.loc.unwrap_or_default());
                        }
                    }
                    b"url" => {
                        if let (Some(built), Some(SitemapDocument::UrlSet(locations))) =
                            (entry.take(), &mut document)
                        {
                            locations.push(built.into_location());
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(SitedownError::MalformedSitemap(e.to_string())),
        }
    }

    document.ok_or(SitedownError::UnrecognizedSitemap)
}

fn recognize_root(name: &[u8]) -> Result<SitemapDocument, SitedownError> {
    match name {
        b"sitemapindex" => Ok(SitemapDocument::Index(Vec::new())),
        b"urlset" => Ok(SitemapDocument::UrlSet(Vec::new())),
        _ => Err(SitedownError::UnrecognizedSitemap),
    }
}

fn record_field(entry: &mut Option<EntryBuilder>, field: Option<Field>, value: &str) {
    let (Some(entry), Some(field)) = (entry, field) else {
        return;
    };

    let slot = match field {
        Field::Loc => &mut entry.loc,
        Field::LastMod => &mut entry.lastmod,
        Field::ChangeFreq => &mut entry.changefreq,
        Field::Priority => &mut entry.priority,
    };
    *slot = Some(value.trim().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url>
                <loc>https://example.com/</loc>
                <lastmod>2024-01-01</lastmod>
                <changefreq>daily</changefreq>
                <priority>0.8</priority>
            </url>
            <url>
                <loc>https://example.com/about</loc>
            </url>
        </urlset>"#;

    #[test]
    fn test_parse_urlset() {
        let document = parse_sitemap_document(URLSET).unwrap();
        let SitemapDocument::UrlSet(locations) = document else {
            panic!("expected urlset");
        };

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].location, "https://example.com/");
        assert_eq!(locations[0].last_modified.as_deref(), Some("2024-01-01"));
        assert_eq!(locations[0].change_frequency.as_deref(), Some("daily"));
        assert_eq!(locations[0].priority, Some(0.8));
        assert_eq!(locations[1].location, "https://example.com/about");
        assert_eq!(locations[1].last_modified, None);
        assert_eq!(locations[1].priority, None);
    }

    #[test]
    fn test_parse_sitemap_index() {
        let xml = r#"<?xml version="1.0"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <sitemap>
                    <loc>https://example.com/sitemap-a.xml</loc>
                    <lastmod>2024-01-01</lastmod>
                </sitemap>
                <sitemap>
                    <loc>https://example.com/sitemap-b.xml</loc>
                </sitemap>
            </sitemapindex>"#;

        let document = parse_sitemap_document(xml).unwrap();
        assert_eq!(
            document,
            SitemapDocument::Index(vec![
                "https://example.com/sitemap-a.xml".to_string(),
                "https://example.com/sitemap-b.xml".to_string(),
            ])
        );
    }

    #[test]
    fn test_missing_loc_yields_empty_location() {
        let xml = r#"<urlset><url><priority>0.5</priority></url></urlset>"#;

        let SitemapDocument::UrlSet(locations) = parse_sitemap_document(xml).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].location, "");
        assert_eq!(locations[0].priority, Some(0.5));
    }

    #[test]
    fn test_non_numeric_priority_becomes_nan() {
        let xml = r#"<urlset><url>
            <loc>https://example.com/</loc>
            <priority>high</priority>
        </url></urlset>"#;

        let SitemapDocument::UrlSet(locations) = parse_sitemap_document(xml).unwrap() else {
            panic!("expected urlset");
        };
        assert!(locations[0].priority.unwrap().is_nan());
    }

    #[test]
    fn test_cdata_loc() {
        let xml = r#"<urlset><url><loc><![CDATA[https://example.com/a?x=1&y=2]]></loc></url></urlset>"#;

        let SitemapDocument::UrlSet(locations) = parse_sitemap_document(xml).unwrap() else {
            panic!("expected urlset");
        };
        assert_eq!(locations[0].location, "https://example.com/a?x=1&y=2");
    }

    #[test]
    fn test_unrecognized_root() {
        let xml = r#"<rss version="2.0"><channel></channel></rss>"#;
        let result = parse_sitemap_document(xml);
        assert!(matches!(result, Err(SitedownError::UnrecognizedSitemap)));
    }

    #[test]
    fn test_malformed_xml() {
        let xml = "<urlset><url><loc>https://example.com</url></urlset>";
        let result = parse_sitemap_document(xml);
        assert!(matches!(result, Err(SitedownError::MalformedSitemap(_))));
    }

    #[test]
    fn test_empty_urlset() {
        let SitemapDocument::UrlSet(locations) =
            parse_sitemap_document("<urlset></urlset>").unwrap()
        else {
            panic!("expected urlset");
        };
        assert!(locations.is_empty());
    }
}
