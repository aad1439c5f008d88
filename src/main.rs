//! Sitedown main entry point
//!
//! Command-line interface for the sitemap-to-Markdown crawler.

use anyhow::Context;
use clap::Parser;
use sitedown::crawler::{crawl, CrawlOptions};
use sitedown::extract::RendererConfig;
use sitedown::progress::{ProgressCallback, ProgressSnapshot};
use sitedown::report;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Sitedown: crawl a sitemap into a single Markdown report
///
/// Sitedown resolves a sitemap (including sitemap-of-sitemaps indices),
/// fetches every listed page, extracts its content, and aggregates
/// everything into one Markdown report.
#[derive(Parser, Debug)]
#[command(name = "sitedown")]
#[command(version)]
#[command(about = "Crawl a sitemap into a single Markdown report", long_about = None)]
struct Cli {
    /// Sitemap URL or local file path
    #[arg(value_name = "SITEMAP")]
    source: String,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit the raw crawl aggregate as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// WebDriver endpoint used to render script-heavy pages
    #[arg(long, value_name = "URL", default_value = "http://localhost:4444")]
    webdriver_url: String,

    /// Delay in milliseconds after navigation for client-side rendering
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    render_settle_ms: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let options = CrawlOptions {
        renderer: RendererConfig {
            webdriver_url: cli.webdriver_url.clone(),
            settle: Duration::from_millis(cli.render_settle_ms),
        },
    };

    let on_progress = if cli.quiet {
        None
    } else {
        Some(progress_printer())
    };

    eprintln!("Starting crawl of {}", cli.source);
    let aggregate = crawl(&cli.source, options, on_progress)
        .await
        .context("crawl failed")?;
    eprintln!();

    if cli.json {
        let json = serde_json::to_string_pretty(&aggregate).context("failed to serialize results")?;
        match &cli.output {
            Some(path) => std::fs::write(path, json)
                .with_context(|| format!("failed to write results to {}", path.display()))?,
            None => println!("{}", json),
        }
    } else {
        match &cli.output {
            Some(path) => {
                report::write_report(&aggregate, &cli.source, path)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                eprintln!("Report written to {}", path.display());
            }
            None => println!("{}", report::render(&aggregate, &cli.source)),
        }
    }

    tracing::info!(
        "Crawl finished: {} succeeded, {} failed of {} pages",
        aggregate.success_count,
        aggregate.error_count,
        aggregate.total_count
    );

    Ok(())
}

/// Builds the progress observer for the terminal
///
/// The tracker notifies on every page attempt; de-duplication by
/// percentage happens here at the presentation boundary, so the printed
/// percentage is monotonically non-decreasing with no repeats.
fn progress_printer() -> ProgressCallback {
    let mut last_percentage: Option<u8> = None;

    Box::new(move |snapshot: ProgressSnapshot| {
        if last_percentage == Some(snapshot.percentage) {
            return;
        }
        last_percentage = Some(snapshot.percentage);

        let processed = snapshot.completed + snapshot.failed;
        eprint!(
            "\r\x1b[KProgress: {}/{} ({}%) | ✓ {} | ✗ {}",
            processed, snapshot.total, snapshot.percentage, snapshot.completed, snapshot.failed
        );
    })
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitedown=info,warn"),
            1 => EnvFilter::new("sitedown=debug,info"),
            2 => EnvFilter::new("sitedown=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
