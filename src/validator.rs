//! Checking a single domain across the configured regions and strategies.
//!
//! The walk is a small state machine:
//!
//! ```text
//! Pending ─▶ Searching(region, strategy) ─┬─▶ Found      (attempt matched)
//!                  ▲                      ├─▶ Exhausted  (last pair failed)
//!                  └──────────────────────┘  next pair, strategies vary fastest
//! ```
//!
//! Once a pair matches nothing else is tried for that domain. A fetch or
//! extraction failure only fails its own attempt.

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::evidence::{Verdict, extract};
use crate::models::{Attempt, DomainResult, Region};
use crate::page::PageFetcher;
use crate::strategies::{SearchStrategy, generate};
use crate::urls::{build_publication_url, build_search_url};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Position of a domain's walk over regions × strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Pending,
    Searching { region: usize, strategy: usize },
    Found,
    Exhausted,
}

impl SearchState {
    /// Next state after the current pair resolved to `matched`.
    ///
    /// From `Pending` the outcome is ignored and the walk starts at the first
    /// pair, or ends right away when there are no pairs. Terminal states stay put.
    pub fn step(self, matched: bool, regions: usize, strategies: usize) -> Self {
        match self {
            SearchState::Pending if regions == 0 || strategies == 0 => SearchState::Exhausted,
            SearchState::Pending => SearchState::Searching {
                region: 0,
                strategy: 0,
            },
            SearchState::Searching { .. } if matched => SearchState::Found,
            SearchState::Searching { region, strategy } if strategy + 1 < strategies => {
                SearchState::Searching {
                    region,
                    strategy: strategy + 1,
                }
            }
            SearchState::Searching { region, .. } if region + 1 < regions => {
                SearchState::Searching {
                    region: region + 1,
                    strategy: 0,
                }
            }
            SearchState::Searching { .. } => SearchState::Exhausted,
            terminal => terminal,
        }
    }
}

/// Check `domain` and return its verdict with the attempts made.
///
/// Region and strategy pairs are tried in order, strategies varying fastest,
/// until one matches. Failed attempts are recorded and the walk moves on.
///
/// # Arguments
///
/// * `domain` - Normalized domain to look for
/// * `config` - Regions, strategies, indicators and page timeout
/// * `fetcher` - Loads each result page
///
/// # Returns
///
/// A [`DomainResult`] with one [`Attempt`] per pair tried. On a match,
/// `validation_url` is the matching search URL and `publication_url` is set.
#[instrument(level = "info", skip(config, fetcher))]
pub async fn validate<F: PageFetcher>(
    domain: &str,
    config: &CheckConfig,
    fetcher: &F,
) -> DomainResult {
    let regions = config.regions.len();
    let strategies = config.strategies.len();
    let mut result = DomainResult::new(domain);

    let mut state = SearchState::Pending.step(false, regions, strategies);
    while let SearchState::Searching { region, strategy } = state {
        let region = &config.regions[region];
        let attempt = run_attempt(
            domain,
            region,
            config.strategies[strategy].as_ref(),
            config,
            fetcher,
        )
        .await;

        let matched = attempt.success;
        if matched {
            result.is_valid_source = true;
            result.validation_url = Some(attempt.url.clone());
            result.publication_url = Some(build_publication_url(domain, region));
        }
        result.attempts.push(attempt);
        state = state.step(matched, regions, strategies);
    }

    info!(
        valid = result.is_valid_source,
        attempts = result.attempts.len(),
        outcome = ?state,
        "Domain checked"
    );
    result
}

async fn run_attempt<F: PageFetcher>(
    domain: &str,
    region: &Region,
    strategy: &dyn SearchStrategy,
    config: &CheckConfig,
    fetcher: &F,
) -> Attempt {
    let query = generate(strategy, domain);
    let url = build_search_url(region, &query);
    debug!(region = region.code, strategy = strategy.name(), %url, "Attempting");

    let (success, indicator, error) =
        match check_page(fetcher, config, &url, domain, config.timeout).await {
            Ok(Verdict { matched, indicator }) => (matched, indicator, None),
            Err(e) => {
                warn!(
                    domain,
                    region = region.code,
                    strategy = strategy.name(),
                    %url,
                    error = %e,
                    "Attempt failed; treating as no match"
                );
                (false, None, Some(e.to_string()))
            }
        };

    Attempt {
        strategy: strategy.name().to_string(),
        region: region.code.to_string(),
        query,
        url,
        success,
        indicator,
        error,
    }
}

/// Load one page and read a verdict from it. The page is dropped before this
/// returns, on success and on every error path.
async fn check_page<F: PageFetcher>(
    fetcher: &F,
    config: &CheckConfig,
    url: &str,
    domain: &str,
    timeout: Duration,
) -> Result<Verdict, CheckError> {
    let page = fetcher.load(url, timeout).await?;
    extract(&config.indicators, &page, domain)
}
