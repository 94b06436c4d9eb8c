//! Data models for regions, attempts and per-domain verdicts.
//!
//! - [`Region`]: one locale edition of Google News
//! - [`Attempt`]: a single (region, strategy) trial against one domain
//! - [`DomainResult`]: the verdict and attempt log for one domain
//! - [`BatchReport`]: every result of a run, plus derived statistics
//!
//! The serialized field names are camelCase so the JSON report reads the
//! same as the CSV header (`Domain,IsValidSource,ValidationUrl`).

use serde::{Deserialize, Serialize};

/// A locale edition of the aggregator.
///
/// `country` is sent as `gl`, `locale` as `hl` and `edition` as `ceid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub code: &'static str,
    pub country: &'static str,
    pub locale: &'static str,
    pub edition: &'static str,
}

/// Every region the aggregator is known to serve, in selection order for `all`.
pub const REGIONS: [Region; 6] = [
    Region {
        code: "en-US",
        country: "US",
        locale: "en-US",
        edition: "US:en",
    },
    Region {
        code: "es-ES",
        country: "ES",
        locale: "es",
        edition: "ES:es",
    },
    Region {
        code: "fr-FR",
        country: "FR",
        locale: "fr",
        edition: "FR:fr",
    },
    Region {
        code: "it-IT",
        country: "IT",
        locale: "it",
        edition: "IT:it",
    },
    Region {
        code: "de-DE",
        country: "DE",
        locale: "de",
        edition: "DE:de",
    },
    Region {
        code: "pt-BR",
        country: "BR",
        locale: "pt-BR",
        edition: "BR:pt-419",
    },
];

/// Region used when no selector is given or the selector is unknown.
pub const DEFAULT_REGION: Region = REGIONS[0];

impl Region {
    /// Look up a region by its code, ignoring ASCII case.
    pub fn by_code(code: &str) -> Option<Region> {
        REGIONS
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code))
            .copied()
    }
}

/// One (region, strategy) trial. Never modified once pushed onto a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub strategy: String,
    pub region: String,
    /// The percent-encoded query sent to the aggregator.
    pub query: String,
    pub url: String,
    pub success: bool,
    /// Name of the indicator that settled the verdict, if any did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
    /// Diagnostic for a failed fetch or extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Verdict for a single domain together with the attempts that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResult {
    pub domain: String,
    pub is_valid_source: bool,
    /// URL of the attempt that proved the domain, when one did.
    pub validation_url: Option<String>,
    /// Best-effort guess at the source's publication page. Never fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_url: Option<String>,
    pub attempts: Vec<Attempt>,
}

impl DomainResult {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            is_valid_source: false,
            validation_url: None,
            publication_url: None,
            attempts: Vec::new(),
        }
    }
}

/// All results of a run in input order.
///
/// `valid_count` and `total` are computed from `results` on construction;
/// the report is never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub results: Vec<DomainResult>,
    pub valid_count: usize,
    pub total: usize,
}

impl BatchReport {
    pub fn from_results(results: Vec<DomainResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.is_valid_source).count();
        let total = results.len();
        Self {
            results,
            valid_count,
            total,
        }
    }

    /// Share of valid sources, rounded to the nearest whole percent. Zero for an empty report.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (100.0 * self.valid_count as f64 / self.total as f64).round() as u32
    }

    /// Split results into (valid, invalid), each keeping input order.
    pub fn partition(&self) -> (Vec<&DomainResult>, Vec<&DomainResult>) {
        self.results.iter().partition(|r| r.is_valid_source)
    }
}
