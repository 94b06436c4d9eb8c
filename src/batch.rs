//! Running the validator over the whole domain list.
//!
//! Domains are checked one at a time unless the configuration allows more.
//! With `concurrency > 1`, up to that many domains are in flight at once but
//! results still come back in input order; each domain's own walk over
//! regions and strategies stays sequential. A configured delay (plus a little
//! random jitter) is applied before each domain that has to wait for a slot.
//!
//! Raising the cancel flag stops new domains from being started. Domains
//! already in flight finish, and the report covers what was collected.
//! [`watch_interrupts`] raises the flag on Ctrl-C.

use crate::config::CheckConfig;
use crate::models::{BatchReport, DomainResult};
use crate::page::PageFetcher;
use crate::validator::validate;
use futures::future;
use futures::stream::{self, StreamExt};
use rand::{Rng, rng};
use std::io;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Upper bound of the random jitter added to the politeness delay.
pub const MAX_JITTER: Duration = Duration::from_millis(250);

/// Reported after each domain completes, in input order.
#[derive(Debug)]
pub struct Progress<'a> {
    pub done: usize,
    pub total: usize,
    pub result: &'a DomainResult,
}

fn jittered(delay: Duration) -> Duration {
    let jitter_ms: u64 = rng().random_range(0..=MAX_JITTER.as_millis() as u64);
    delay + Duration::from_millis(jitter_ms)
}

/// Check every domain and collect the results into a report.
///
/// Up to `config.concurrency` domains are validated at once. Every domain
/// after the first `concurrency` waits `config.delay` plus up to
/// [`MAX_JITTER`] before it starts. Results are reported in input order.
///
/// # Arguments
///
/// * `domains` - Normalized domains, in the order they should be reported
/// * `config` - Regions, strategies, indicators, timeout, concurrency and delay
/// * `fetcher` - Loads each result page
/// * `cancel` - Once it reads `true`, no further domain is started
/// * `on_progress` - Called after each completed domain
///
/// # Returns
///
/// A [`BatchReport`] over the domains that were checked. After a cancel this
/// covers fewer domains than were requested.
#[instrument(level = "info", skip_all, fields(domains = domains.len(), concurrency = config.concurrency))]
pub async fn run_all<F, P>(
    domains: &[String],
    config: &CheckConfig,
    fetcher: &F,
    cancel: &watch::Receiver<bool>,
    mut on_progress: P,
) -> BatchReport
where
    F: PageFetcher,
    P: FnMut(Progress<'_>),
{
    let total = domains.len();
    let concurrency = config.concurrency.max(1);
    let mut done = 0usize;

    let results: Vec<DomainResult> = stream::iter(domains.iter().enumerate())
        .take_while(|_| future::ready(!*cancel.borrow()))
        .map(move |(index, domain)| async move {
            if index >= concurrency && !config.delay.is_zero() {
                let pause = jittered(config.delay);
                debug!(%domain, ?pause, "Pausing before next domain");
                sleep(pause).await;
            }
            validate(domain, config, fetcher).await
        })
        .buffered(concurrency)
        .inspect(|result| {
            done += 1;
            on_progress(Progress {
                done,
                total,
                result,
            });
        })
        .collect()
        .await;

    let report = BatchReport::from_results(results);
    info!(
        checked = report.total,
        requested = total,
        valid = report.valid_count,
        percentage = report.percentage(),
        "Batch finished"
    );
    report
}

/// Raise `cancel` on the first interrupt, then wait for another.
///
/// `next_signal` resolves when an interrupt arrives, normally
/// [`tokio::signal::ctrl_c`].
///
/// # Returns
///
/// `true` when a second interrupt arrives and the caller should exit right
/// away, `false` if listening for interrupts fails.
pub async fn watch_interrupts<S, Fut>(mut next_signal: S, cancel: &watch::Sender<bool>) -> bool
where
    S: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if let Err(e) = next_signal().await {
        warn!(error = %e, "Cannot listen for interrupts");
        return false;
    }
    warn!("Interrupt received; finishing in-flight domains (press Ctrl-C again to quit)");
    cancel.send_replace(true);

    match next_signal().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Cannot listen for a second interrupt");
            false
        }
    }
}
