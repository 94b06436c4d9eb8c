//! CSV report output: one row per domain, attempts omitted.

use crate::models::BatchReport;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "Domain")]
    domain: &'a str,
    #[serde(rename = "IsValidSource")]
    is_valid_source: bool,
    #[serde(rename = "ValidationUrl")]
    validation_url: Option<&'a str>,
}

/// Render `report` as CSV with a `Domain,IsValidSource,ValidationUrl` header.
/// A missing URL is written as an empty field.
pub fn to_csv(report: &BatchReport) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(vec![]);
    if report.results.is_empty() {
        writer.write_record(["Domain", "IsValidSource", "ValidationUrl"])?;
    }
    for result in &report.results {
        writer.serialize(Row {
            domain: &result.domain,
            is_valid_source: result.is_valid_source,
            validation_url: result.validation_url.as_deref(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
