//! Report writers.
//!
//! The output path picks the format:
//!
//! | Extension | Module | Content |
//! |-----------|--------|---------|
//! | `.csv` | [`csv_report`] | `Domain,IsValidSource,ValidationUrl`, one row per domain |
//! | anything else | [`json`] | the full [`BatchReport`], pretty-printed |
//!
//! Missing parent directories are created first.

pub mod csv_report;
pub mod json;

use crate::error::CheckError;
use crate::models::BatchReport;
use crate::utils::ensure_parent_dir;
use tracing::{info, instrument};

/// Formats a report can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    pub fn for_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".csv") {
            ReportFormat::Csv
        } else {
            ReportFormat::Json
        }
    }
}

/// Serialize `report` and write it to `path`.
///
/// The format follows the extension (see [`ReportFormat::for_path`]), and a
/// missing parent directory is created first.
///
/// # Arguments
///
/// * `report` - The finished batch
/// * `path` - Destination file; `.csv` selects CSV, anything else JSON
///
/// # Returns
///
/// `Ok(())` once the file is written, or [`CheckError::Output`] naming `path`.
#[instrument(level = "info", skip(report), fields(total = report.total))]
pub async fn write_report(report: &BatchReport, path: &str) -> Result<(), CheckError> {
    let format = ReportFormat::for_path(path);
    let body = match format {
        ReportFormat::Csv => csv_report::to_csv(report).map_err(|e| CheckError::output(path, e))?,
        ReportFormat::Json => json::to_json(report).map_err(|e| CheckError::output(path, e))?,
    };

    ensure_parent_dir(path)
        .await
        .map_err(|e| CheckError::output(path, e))?;
    tokio::fs::write(path, body)
        .await
        .map_err(|e| CheckError::output(path, e))?;
    info!(path, ?format, "Wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DomainResult;

    fn report() -> BatchReport {
        let mut valid = DomainResult::new("example.com");
        valid.is_valid_source = true;
        valid.validation_url = Some("https://news.google.com/search?q=site%3Aexample.com".into());
        BatchReport::from_results(vec![valid, DomainResult::new("other.org")])
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(ReportFormat::for_path("out.csv"), ReportFormat::Csv);
        assert_eq!(ReportFormat::for_path("OUT.CSV"), ReportFormat::Csv);
        assert_eq!(ReportFormat::for_path("out.json"), ReportFormat::Json);
        assert_eq!(ReportFormat::for_path("results"), ReportFormat::Json);
    }

    #[tokio::test]
    async fn test_write_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/results.json");
        let path = path.to_str().unwrap();
        write_report(&report(), path).await.unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        let parsed: BatchReport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, report());
    }

    #[tokio::test]
    async fn test_write_csv_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let path = path.to_str().unwrap();
        write_report(&report(), path).await.unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("Domain,IsValidSource,ValidationUrl\n"));
        assert_eq!(written.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_unwritable_path_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file.
        let err = write_report(&report(), dir.path().to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Output { .. }));
    }
}
