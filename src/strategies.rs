//! Search strategies: named ways of turning a domain into an aggregator query.
//!
//! | Name | Query | Enabled by default |
//! |------|-------|--------------------|
//! | `site` | `site:<domain>` | yes |
//! | `exact` | `"<domain>"` | no |
//! | `source` | `source:<domain>` | no |
//!
//! Strategies run in the order they are configured. New ones are added by
//! implementing [`SearchStrategy`] and registering a name in [`by_name`].

use std::fmt;

/// A named way of turning a domain into a raw (unencoded) search query.
pub trait SearchStrategy: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn query(&self, domain: &str) -> String;
}

/// Restrict results to pages hosted on the domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteQuery;

impl SearchStrategy for SiteQuery {
    fn name(&self) -> &str {
        "site"
    }

    fn query(&self, domain: &str) -> String {
        format!("site:{domain}")
    }
}

/// Search for the domain as a quoted phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactQuery;

impl SearchStrategy for ExactQuery {
    fn name(&self) -> &str {
        "exact"
    }

    fn query(&self, domain: &str) -> String {
        format!("\"{domain}\"")
    }
}

/// Ask the aggregator for articles attributed to the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceQuery;

impl SearchStrategy for SourceQuery {
    fn name(&self) -> &str {
        "source"
    }

    fn query(&self, domain: &str) -> String {
        format!("source:{domain}")
    }
}

/// Names accepted by [`by_name`].
pub const STRATEGY_NAMES: [&str; 3] = ["site", "exact", "source"];

/// Resolve a strategy by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<Box<dyn SearchStrategy>> {
    match name.to_ascii_lowercase().as_str() {
        "site" => Some(Box::new(SiteQuery)),
        "exact" => Some(Box::new(ExactQuery)),
        "source" => Some(Box::new(SourceQuery)),
        _ => None,
    }
}

/// The strategy set used when none is configured.
pub fn default_strategies() -> Vec<Box<dyn SearchStrategy>> {
    vec![Box::new(SiteQuery)]
}

/// Build the percent-encoded query a strategy produces for `domain`.
pub fn generate(strategy: &dyn SearchStrategy, domain: &str) -> String {
    urlencoding::encode(&strategy.query(domain)).into_owned()
}
