//! URL templates for the Google News search and publication pages.

use crate::models::Region;
use urlencoding::encode;

const SEARCH_BASE: &str = "https://news.google.com/search";
const PUBLICATION_BASE: &str = "https://news.google.com/publications";

fn region_params(region: &Region) -> String {
    format!(
        "hl={}&gl={}&ceid={}",
        encode(region.locale),
        encode(region.country),
        encode(region.edition)
    )
}

/// Search-results URL for an already percent-encoded `query`.
pub fn build_search_url(region: &Region, query: &str) -> String {
    format!("{SEARCH_BASE}?q={query}&{}", region_params(region))
}

/// Guess at the source's publication page.
///
/// The aggregator keys publication pages by an opaque id, so this is only a
/// placeholder for humans reading the report. It is never fetched and plays
/// no part in the verdict.
pub fn build_publication_url(domain: &str, region: &Region) -> String {
    format!(
        "{PUBLICATION_BASE}/{}?{}",
        encode(domain),
        region_params(region)
    )
}
