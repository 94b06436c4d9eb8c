//! # News Source Check
//!
//! Checks whether web domains are indexed as news sources by Google News.
//! For each domain it searches the aggregator (by default with a
//! `site:<domain>` query), reads the result page for evidence of a match, and
//! reports a per-domain verdict together with every attempt it made.
//!
//! ## Usage
//!
//! ```sh
//! news_source_check -i domains.txt -o results.csv --region all
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: CLI flags over an optional YAML settings file
//! 2. **Input**: domains from a file, or the built-in list
//! 3. **Checking**: each domain walks regions × strategies until one matches
//! 4. **Output**: JSON or CSV report, then a console summary
//!
//! Ctrl-C stops new domains from starting; the partial report is still written.
//! A second Ctrl-C exits at once with status 130.

use clap::Parser;
use indicatif::MultiProgress;
use std::error::Error;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod batch;
mod cli;
mod config;
mod domains;
mod error;
mod evidence;
mod models;
mod outputs;
mod page;
mod progress;
mod strategies;
mod urls;
mod utils;
mod validator;

use batch::{run_all, watch_interrupts};
use cli::Cli;
use config::{CheckConfig, Settings};
use domains::{default_domains, load_domains};
use models::BatchReport;
use outputs::write_report;
use page::PageFetcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init ---
    let bars = MultiProgress::new();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_writer(progress::LogWriter::new(bars.clone()))
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_source_check starting up");

    // ---- Configuration ----
    let settings = match &args.config {
        Some(path) => Settings::load(path).await?,
        None => Settings::default(),
    };
    let config = CheckConfig::from_cli(&args, settings)?;

    // ---- Domains ----
    let domains = match &args.input {
        Some(path) => load_domains(path).await.inspect_err(|e| {
            error!(error = %e, "Cannot continue without a domain list");
        })?,
        None => {
            info!("No input file given; using the built-in domain list");
            default_domains()
        }
    };
    info!(
        domains = domains.len(),
        regions = %config.region_codes(),
        strategies = %config.strategy_names(),
        timeout = ?config.timeout,
        concurrency = config.concurrency,
        "Configuration ready"
    );

    // ---- Interrupt handling ----
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if watch_interrupts(tokio::signal::ctrl_c, &cancel_tx).await {
            error!("Second interrupt received; exiting without a report");
            std::process::exit(130);
        }
    });

    // ---- Check ----
    let report = check_all(&domains, &config, &bars, &cancel_rx).await?;
    if *cancel_rx.borrow() {
        warn!(
            checked = report.total,
            requested = domains.len(),
            "Run interrupted; writing partial report"
        );
    }

    // ---- Output ----
    let written = write_report(&report, &args.output).await;
    if let Err(e) = &written {
        error!(error = %e, "Failed to write report");
    }

    println!("{}", progress::render_summary(&report));
    if written.is_ok() {
        println!("Report written to {}", args.output);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    written.map_err(Into::into)
}

/// Pick the page fetcher for this build and run the batch with it.
#[cfg(feature = "browser")]
async fn check_all(
    domains: &[String],
    config: &CheckConfig,
    bars: &MultiProgress,
    cancel: &watch::Receiver<bool>,
) -> Result<BatchReport, Box<dyn Error>> {
    let fetcher = page::browser::BrowserFetcher::launch(config.headless)?;
    Ok(run_batch(domains, config, &fetcher, bars, cancel).await)
}

/// Pick the page fetcher for this build and run the batch with it.
#[cfg(not(feature = "browser"))]
async fn check_all(
    domains: &[String],
    config: &CheckConfig,
    bars: &MultiProgress,
    cancel: &watch::Receiver<bool>,
) -> Result<BatchReport, Box<dyn Error>> {
    if !config.headless {
        warn!("Visible browser mode needs the `browser` feature; fetching over HTTP instead");
    }
    let fetcher = page::HttpFetcher::new(&config.user_agent)?;
    Ok(run_batch(domains, config, &fetcher, bars, cancel).await)
}

#[instrument(level = "info", skip_all)]
async fn run_batch<F: PageFetcher>(
    domains: &[String],
    config: &CheckConfig,
    fetcher: &F,
    bars: &MultiProgress,
    cancel: &watch::Receiver<bool>,
) -> BatchReport {
    let pb = progress::create_progress_bar(bars, domains.len());
    let report = run_all(domains, config, fetcher, cancel, |p| progress::record(&pb, &p)).await;
    pb.finish_and_clear();
    report
}
