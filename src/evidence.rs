//! Turning a loaded result page into a verdict.
//!
//! Indicators are evaluated in order and the first definitive answer wins;
//! later indicators are not consulted. Order matters because an indicator may
//! read page state the next one relies on. When every indicator is
//! inconclusive, the page is treated as [`Evidence::NoMatch`]: no positive
//! evidence was found.

use crate::error::CheckError;
use crate::page::Page;
use std::fmt;

/// Banner text the aggregator shows when a search has no results.
pub const NO_RESULTS_SENTINEL: &str = "There are no items to show.";

/// Locator of the "no results" region of the search page.
pub const NO_RESULTS_LOCATOR: &str = "main c-wiz div.UW0SDc";

/// Locator, inside the "no results" region, of the element naming the source
/// of the top result.
pub const RESULT_DOMAIN_LOCATOR: &str = "div.vr1PYe";

/// Outcome of a single indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    Match,
    NoMatch,
    Inconclusive,
}

/// A single rule that inspects a page for evidence about `domain`.
pub trait Indicator: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, page: &dyn Page, domain: &str) -> Result<Evidence, CheckError>;
}

/// Final verdict for one page, with the indicator that settled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub matched: bool,
    /// `None` when no indicator was conclusive.
    pub indicator: Option<String>,
}

/// Run `indicators` in order against `page` and stop at the first definitive answer.
pub fn extract(
    indicators: &[Box<dyn Indicator>],
    page: &dyn Page,
    domain: &str,
) -> Result<Verdict, CheckError> {
    for indicator in indicators {
        match indicator.evaluate(page, domain)? {
            Evidence::Inconclusive => {
                tracing::debug!(indicator = indicator.name(), "Indicator inconclusive");
            }
            evidence => {
                return Ok(Verdict {
                    matched: evidence == Evidence::Match,
                    indicator: Some(indicator.name().to_string()),
                });
            }
        }
    }
    Ok(Verdict {
        matched: false,
        indicator: None,
    })
}

/// Reads the aggregator's "no results" banner.
///
/// - banner absent: results exist, [`Evidence::Match`]
/// - banner text starts with the sentinel: [`Evidence::NoMatch`]
/// - otherwise the nested result-domain element decides, compared to the
///   queried domain ignoring case; if it is missing, [`Evidence::NoMatch`]
#[derive(Debug, Clone)]
pub struct NoResultsBanner {
    pub banner_locator: String,
    pub domain_locator: String,
    pub sentinel: String,
}

impl Default for NoResultsBanner {
    fn default() -> Self {
        Self {
            banner_locator: NO_RESULTS_LOCATOR.to_string(),
            domain_locator: RESULT_DOMAIN_LOCATOR.to_string(),
            sentinel: NO_RESULTS_SENTINEL.to_string(),
        }
    }
}

impl Indicator for NoResultsBanner {
    fn name(&self) -> &str {
        "no-results-banner"
    }

    fn evaluate(&self, page: &dyn Page, domain: &str) -> Result<Evidence, CheckError> {
        let Some(banner) = page.find_element(&self.banner_locator)? else {
            return Ok(Evidence::Match);
        };

        let text = page.text_content(&banner)?;
        if text.trim_start().starts_with(&self.sentinel) {
            return Ok(Evidence::NoMatch);
        }

        match page.find_within(&banner, &self.domain_locator)? {
            Some(source) => {
                let shown = page.text_content(&source)?;
                if shown.trim().eq_ignore_ascii_case(domain.trim()) {
                    Ok(Evidence::Match)
                } else {
                    Ok(Evidence::NoMatch)
                }
            }
            None => Ok(Evidence::NoMatch),
        }
    }
}

/// The indicator set used when none is configured.
pub fn default_indicators() -> Vec<Box<dyn Indicator>> {
    vec![Box::new(NoResultsBanner::default())]
}
