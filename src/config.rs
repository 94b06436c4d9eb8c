//! Run configuration.
//!
//! [`CheckConfig`] is built once at startup from the command line and the
//! optional YAML [`Settings`] file, then shared by reference with the runner
//! and validator. Precedence is CLI flag, then settings file, then default.

use crate::cli::Cli;
use crate::error::CheckError;
use crate::evidence::{Indicator, NoResultsBanner};
use crate::models::{DEFAULT_REGION, REGIONS, Region};
use crate::strategies::{self, STRATEGY_NAMES, SearchStrategy};
use itertools::Itertools;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Optional overrides read from a YAML file.
///
/// ```yaml
/// timeout_secs: 20
/// concurrency: 2
/// delay_ms: 1500
/// no_results_locator: "main c-wiz div.UW0SDc"
/// result_domain_locator: "div.vr1PYe"
/// no_results_sentinel: "There are no items to show."
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub timeout_secs: Option<u64>,
    pub concurrency: Option<usize>,
    pub delay_ms: Option<u64>,
    pub user_agent: Option<String>,
    pub no_results_locator: Option<String>,
    pub result_domain_locator: Option<String>,
    pub no_results_sentinel: Option<String>,
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self, CheckError> {
        serde_yaml::from_str(yaml).map_err(|e| CheckError::Config(e.to_string()))
    }

    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self, CheckError> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CheckError::Config(format!("cannot read {path}: {e}")))?;
        let settings = Self::from_yaml(&yaml)?;
        info!(path, "Loaded settings file");
        Ok(settings)
    }
}

/// Everything a run needs, fixed for its whole duration.
#[derive(Debug)]
pub struct CheckConfig {
    pub regions: Vec<Region>,
    pub strategies: Vec<Box<dyn SearchStrategy>>,
    pub indicators: Vec<Box<dyn Indicator>>,
    pub timeout: Duration,
    pub concurrency: usize,
    pub delay: Duration,
    pub user_agent: String,
    pub headless: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            regions: vec![DEFAULT_REGION],
            strategies: strategies::default_strategies(),
            indicators: crate::evidence::default_indicators(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: 1,
            delay: Duration::ZERO,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headless: true,
        }
    }
}

impl CheckConfig {
    /// Merge the command line over `settings`.
    pub fn from_cli(cli: &Cli, settings: Settings) -> Result<Self, CheckError> {
        let strategies = resolve_strategies(&cli.strategies)?;

        let defaults = NoResultsBanner::default();
        let banner = NoResultsBanner {
            banner_locator: settings.no_results_locator.unwrap_or(defaults.banner_locator),
            domain_locator: settings
                .result_domain_locator
                .unwrap_or(defaults.domain_locator),
            sentinel: settings.no_results_sentinel.unwrap_or(defaults.sentinel),
        };

        let timeout = cli
            .timeout_secs
            .or(settings.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(CheckError::Config("timeout must be at least one second".into()));
        }

        let requested = cli.concurrency.or(settings.concurrency).unwrap_or(1);
        let concurrency = requested.clamp(1, MAX_CONCURRENCY);
        if concurrency != requested {
            warn!(requested, used = concurrency, "Concurrency clamped");
        }

        Ok(Self {
            regions: resolve_regions(&cli.region),
            strategies,
            indicators: vec![Box::new(banner)],
            timeout,
            concurrency,
            delay: Duration::from_millis(cli.delay_ms.or(settings.delay_ms).unwrap_or(0)),
            user_agent: cli
                .user_agent
                .clone()
                .or(settings.user_agent)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            headless: cli.headless,
        })
    }

    pub fn region_codes(&self) -> String {
        self.regions.iter().map(|r| r.code).join(",")
    }

    pub fn strategy_names(&self) -> String {
        self.strategies.iter().map(|s| s.name()).join(",")
    }
}

/// Regions for a selector: one code, or `all`. Unknown codes fall back to the
/// default region with a warning.
pub fn resolve_regions(selector: &str) -> Vec<Region> {
    let selector = selector.trim();
    if selector.eq_ignore_ascii_case("all") {
        return REGIONS.to_vec();
    }
    match Region::by_code(selector) {
        Some(region) => vec![region],
        None => {
            warn!(
                region = selector,
                fallback = DEFAULT_REGION.code,
                "Unknown region; using default"
            );
            vec![DEFAULT_REGION]
        }
    }
}

/// Strategies by name in the given order; no names means the default set.
/// Names are matched case-insensitively and each strategy is kept once.
pub fn resolve_strategies(names: &[String]) -> Result<Vec<Box<dyn SearchStrategy>>, CheckError> {
    if names.is_empty() {
        return Ok(strategies::default_strategies());
    }
    let mut resolved: Vec<Box<dyn SearchStrategy>> = Vec::with_capacity(names.len());
    for name in names {
        let strategy = strategies::by_name(name).ok_or_else(|| {
            CheckError::Config(format!(
                "unknown strategy {name:?} (expected one of {})",
                STRATEGY_NAMES.join(", ")
            ))
        })?;
        if !resolved.iter().any(|s| s.name() == strategy.name()) {
            resolved.push(strategy);
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("news_source_check").chain(args.iter().copied()))
    }

    #[test]
    fn test_resolve_regions() {
        assert_eq!(resolve_regions("fr-FR"), vec![Region::by_code("fr-FR").unwrap()]);
        assert_eq!(resolve_regions("ALL").len(), REGIONS.len());
        assert_eq!(resolve_regions("xx-YY"), vec![DEFAULT_REGION]);
    }

    #[test]
    fn test_resolve_strategies_keeps_order_and_dedupes() {
        let names = vec!["source".to_string(), "site".to_string(), "source".to_string()];
        let resolved = resolve_strategies(&names).unwrap();
        let resolved: Vec<_> = resolved.iter().map(|s| s.name()).collect();
        assert_eq!(resolved, vec!["source", "site"]);
    }

    #[test]
    fn test_resolve_strategies_ignores_case_when_deduping() {
        let names = vec!["site".to_string(), "SITE".to_string(), "Exact".to_string()];
        let resolved = resolve_strategies(&names).unwrap();
        let resolved: Vec<_> = resolved.iter().map(|s| s.name()).collect();
        assert_eq!(resolved, vec!["site", "exact"]);
    }

    #[test]
    fn test_unknown_strategy_is_config_error() {
        let err = resolve_strategies(&["inurl".to_string()]).unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
    }

    #[test]
    fn test_settings_from_yaml() {
        let settings = Settings::from_yaml("timeout_secs: 12\nno_results_sentinel: Nada\n").unwrap();
        assert_eq!(settings.timeout_secs, Some(12));
        assert_eq!(settings.no_results_sentinel.as_deref(), Some("Nada"));
        assert!(Settings::from_yaml("colour: blue\n").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = CheckConfig::from_cli(&cli(&[]), Settings::default()).unwrap();
        assert_eq!(config.region_codes(), "en-US");
        assert_eq!(config.strategy_names(), "site");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.indicators.len(), 1);
    }

    #[test]
    fn test_cli_overrides_settings() {
        let settings = Settings {
            timeout_secs: Some(10),
            concurrency: Some(3),
            delay_ms: Some(500),
            ..Default::default()
        };
        let config =
            CheckConfig::from_cli(&cli(&["--timeout-secs", "5", "-r", "all"]), settings).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.regions.len(), 6);
    }

    #[test]
    fn test_concurrency_is_clamped() {
        let config = CheckConfig::from_cli(&cli(&["-c", "64"]), Settings::default()).unwrap();
        assert_eq!(config.concurrency, MAX_CONCURRENCY);
        let config = CheckConfig::from_cli(&cli(&["-c", "0"]), Settings::default()).unwrap();
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = CheckConfig::from_cli(&cli(&["--timeout-secs", "0"]), Settings::default())
            .unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
    }
}
