//! JSON report output.
//!
//! The document mirrors [`BatchReport`] with two-space indentation:
//!
//! ```text
//! {
//!   "results": [
//!     {
//!       "domain": "example.com",
//!       "isValidSource": true,
//!       "validationUrl": "https://news.google.com/search?q=site%3Aexample.com&...",
//!       "attempts": [ ... ]
//!     }
//!   ],
//!   "validCount": 1,
//!   "total": 1
//! }
//! ```

use crate::models::BatchReport;

pub fn to_json(report: &BatchReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DomainResult;

    #[test]
    fn test_two_space_indent() {
        let report = BatchReport::from_results(vec![DomainResult::new("example.com")]);
        let json = to_json(&report).unwrap();
        assert!(json.starts_with("{\n  \"results\": [\n    {\n      \"domain\": \"example.com\""));
        assert!(json.contains("\n  \"validCount\": 0,\n  \"total\": 1\n}"));
    }

    #[test]
    fn test_missing_url_is_null() {
        let report = BatchReport::from_results(vec![DomainResult::new("example.com")]);
        let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert!(value["results"][0]["validationUrl"].is_null());
    }
}
