//! Dynamic content extraction through a WebDriver session
//!
//! Script-rendered pages deliver an empty shell over HTTP; their real
//! content only exists after client-side rendering. This module navigates
//! such pages in a headless browser, waits for rendering to settle, and
//! runs the extraction heuristics against the rendered DOM with a wider
//! content-selector cascade than the static path.

use crate::extract::{static_html, ExtractedContent, UNTITLED_PAGE};
use crate::PageError;
use fantoccini::{Client, ClientBuilder};
use scraper::{Html, Selector};
use std::time::Duration;

/// Minimum visible text length for a selector-cascade candidate to be
/// accepted as the main content region
const MIN_CONTENT_TEXT_LEN: usize = 100;

/// Common content-container selectors, tried in priority order after
/// `main` and `article` come up empty
const CONTENT_SELECTORS: &[&str] = &[
    ".content",
    "#content",
    ".main-content",
    ".post-content",
    ".entry-content",
    r#"[role="main"]"#,
    ".container .row",
    ".page-content",
];

/// Chrome-like elements removed in the final whole-body fallback. Broader
/// than the static path's strip list because rendered applications carry
/// more decoration.
const RENDERED_CHROME_SELECTOR: &str = "nav, header, footer, script, style, noscript, \
     .navigation, .sidebar, .menu, .navbar, .header, .footer, \
     [role=\"navigation\"], [role=\"banner\"], [role=\"contentinfo\"], \
     .cookie-banner, .social-share, .advertisement";

/// Configuration for the WebDriver rendering session
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// WebDriver endpoint to connect to
    pub webdriver_url: String,
    /// Fixed delay after navigation to let client-side rendering finish
    pub settle: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            settle: Duration::from_millis(1000),
        }
    }
}

/// Shared WebDriver renderer for one crawl run
///
/// The session is created lazily on the first dynamic page and reused for
/// every later one; a run with no dynamic pages never touches the
/// WebDriver endpoint. The orchestrator calls [`Renderer::shutdown`] at
/// the end of the run, so the session is closed on every exit path.
pub struct Renderer {
    config: RendererConfig,
    session: Option<Client>,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Renders a page in the headless browser and extracts its content
    ///
    /// Navigation waits for the document load to complete, then a fixed
    /// settle delay gives client-side rendering time to fill the DOM.
    /// Image loading is disabled through the browser capabilities.
    ///
    /// # Arguments
    ///
    /// * `url` - The page to render
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractedContent)` - Content extracted from the rendered DOM
    /// * `Err(PageError)` - The session could not be created or the page
    ///   could not be loaded
    pub async fn extract(&mut self, url: &str) -> Result<ExtractedContent, PageError> {
        let settle = self.config.settle;
        let client = self.session().await?;

        match render_source(client, url, settle).await {
            Ok(html) => Ok(extract_from_rendered(&html)),
            Err(e) => {
                // A session-level failure leaves the browser in an unknown
                // state; drop it so the next dynamic page reconnects.
                if matches!(e, PageError::Webdriver(_)) {
                    self.shutdown().await;
                }
                Err(e)
            }
        }
    }

    /// Closes the WebDriver session, if one was ever opened
    pub async fn shutdown(&mut self) {
        if let Some(client) = self.session.take() {
            if let Err(e) = client.close().await {
                tracing::warn!("Failed to close WebDriver session: {}", e);
            }
        }
    }

    async fn session(&mut self) -> Result<&Client, PageError> {
        if self.session.is_none() {
            self.session = Some(connect(&self.config).await?);
        }
        Ok(self.session.as_ref().unwrap())
    }
}

async fn connect(config: &RendererConfig) -> Result<Client, PageError> {
    let mut capabilities = serde_json::map::Map::new();
    capabilities.insert(
        "goog:chromeOptions".to_string(),
        serde_json::json!({
            "args": [
                "--headless=new",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--blink-settings=imagesEnabled=false",
            ]
        }),
    );

    ClientBuilder::native()
        .capabilities(capabilities)
        .connect(&config.webdriver_url)
        .await
        .map_err(|e| PageError::Webdriver(e.to_string()))
}

async fn render_source(
    client: &Client,
    url: &str,
    settle: Duration,
) -> Result<String, PageError> {
    client.goto(url).await.map_err(map_navigation_error)?;

    // goto returns once the browser considers the page loaded; the settle
    // delay covers rendering work the framework does afterwards.
    tokio::time::sleep(settle).await;

    client
        .source()
        .await
        .map_err(|e| PageError::Webdriver(e.to_string()))
}

fn map_navigation_error(e: fantoccini::error::CmdError) -> PageError {
    classify_navigation_failure(&e.to_string())
}

/// Classifies a navigation failure by its WebDriver error message
///
/// The protocol reports a page-load deadline miss as a timeout error;
/// everything else stays a plain navigation failure. Like session loss,
/// this is detected from the message text.
fn classify_navigation_failure(message: &str) -> PageError {
    let lowered = message.to_lowercase();
    if lowered.contains("timeout") || lowered.contains("timed out") {
        PageError::RenderTimeout(message.to_string())
    } else {
        PageError::Navigation(message.to_string())
    }
}

/// Runs the extraction heuristics against rendered page source
///
/// Same four heuristics as the static path, but the content cascade is
/// wider: `main` -> `article` -> prioritized content-container selectors
/// (accepting the first whose visible text is long enough) -> the whole
/// body with chrome-like elements removed.
fn extract_from_rendered(html: &str) -> ExtractedContent {
    let mut document = Html::parse_document(html);

    let title = static_html::extract_title(&document).unwrap_or_else(|| UNTITLED_PAGE.to_string());
    let description = static_html::extract_description(&document);
    let headings = static_html::collect_headings(&document);
    let content = extract_rendered_content(&mut document);

    ExtractedContent {
        title,
        description,
        content,
        headings,
    }
}

fn extract_rendered_content(document: &mut Html) -> String {
    if let Some(html) = static_html::first_inner_html(document, "main") {
        return html;
    }
    if let Some(html) = static_html::first_inner_html(document, "article") {
        return html;
    }

    for css in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text: String = element.text().collect();
            if text.trim().len() > MIN_CONTENT_TEXT_LEN {
                return element.inner_html();
            }
        }
    }

    static_html::strip_elements(document, RENDERED_CHROME_SELECTOR);
    static_html::first_inner_html(document, "body").unwrap_or_default()
}
