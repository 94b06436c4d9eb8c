//! Loading and normalizing the list of domains to check.
//!
//! Input files are newline-delimited. Blank lines and lines starting with `#`
//! are ignored. Each remaining line may be a bare domain or a full URL; it is
//! reduced to a lowercase hostname without scheme, `www.` prefix, port, path
//! or trailing dot. Lines that still do not look like a hostname are skipped
//! with a warning, and repeated domains are kept once.

use crate::error::CheckError;
use crate::utils::truncate_for_log;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, instrument, warn};
use url::Url;

/// Checked when no input file is given.
pub const DEFAULT_DOMAINS: [&str; 6] = [
    "cnn.com",
    "npr.org",
    "apnews.com",
    "aljazeera.com",
    "bbc.com",
    "nytimes.com",
];

static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z][a-z0-9-]{1,62}$")
        .expect("hostname pattern is valid")
});

/// Reduce one input line to a bare hostname, or `None` if it is not one.
pub fn normalize_domain(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let with_scheme = if line.contains("://") {
        line.to_string()
    } else {
        format!("http://{line}")
    };
    let parsed = Url::parse(&with_scheme).ok()?;
    let host = parsed.host_str()?.trim_end_matches('.');
    let host = host.strip_prefix("www.").unwrap_or(host).to_ascii_lowercase();
    HOSTNAME.is_match(&host).then_some(host)
}

/// Domains from file contents, in order of first appearance.
pub fn parse_domains(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let domain = normalize_domain(line);
            if domain.is_none() {
                warn!(line = %truncate_for_log(line, 80), "Skipping line that is not a domain");
            }
            domain
        })
        .unique()
        .collect()
}

/// Read domains from `path`.
///
/// # Arguments
///
/// * `path` - Newline-delimited file of domains or URLs
///
/// # Returns
///
/// The normalized domains in order of first appearance. A missing or
/// unreadable file, or one without a single usable domain, is a
/// [`CheckError::Input`].
#[instrument(level = "info")]
pub async fn load_domains(path: &str) -> Result<Vec<String>, CheckError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CheckError::Input {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    let domains = parse_domains(&text);
    if domains.is_empty() {
        return Err(CheckError::Input {
            path: path.to_string(),
            reason: "no domains found".to_string(),
        });
    }
    info!(count = domains.len(), "Loaded domains");
    Ok(domains)
}

pub fn default_domains() -> Vec<String> {
    DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_bare_domain() {
        assert_eq!(normalize_domain("Example.COM"), Some("example.com".into()));
        assert_eq!(normalize_domain("  news.example.co.uk "), Some("news.example.co.uk".into()));
    }

    #[test]
    fn test_normalize_strips_url_parts() {
        assert_eq!(
            normalize_domain("https://www.example.com:8443/world/?page=2"),
            Some("example.com".into())
        );
        assert_eq!(normalize_domain("example.com/path"), Some("example.com".into()));
        assert_eq!(normalize_domain("example.com."), Some("example.com".into()));
    }

    #[test]
    fn test_normalize_rejects_non_domains() {
        assert_eq!(normalize_domain("localhost"), None);
        assert_eq!(normalize_domain("192.168.0.1"), None);
        assert_eq!(normalize_domain("not a domain"), None);
        assert_eq!(normalize_domain(""), None);
    }

    #[test]
    fn test_parse_skips_comments_blanks_and_duplicates() {
        let text = "# news sites\n\nexample.com\n  \n#other.com\nwww.example.com\nnpr.org\n";
        assert_eq!(parse_domains(text), vec!["example.com", "npr.org"]);
    }

    #[tokio::test]
    async fn test_load_domains_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# list").unwrap();
        writeln!(file, "cnn.com").unwrap();
        writeln!(file, "https://apnews.com/hub/world-news").unwrap();

        let domains = load_domains(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(domains, vec!["cnn.com", "apnews.com"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_domains(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, CheckError::Input { .. }));
    }

    #[tokio::test]
    async fn test_file_without_domains_is_input_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();
        let err = load_domains(file.path().to_str().unwrap()).await.unwrap_err();
        assert!(err.to_string().contains("no domains found"));
    }

    #[test]
    fn test_default_domains() {
        let defaults = default_domains();
        assert_eq!(defaults.len(), DEFAULT_DOMAINS.len());
        assert!(defaults.iter().all(|d| normalize_domain(d).as_deref() == Some(d.as_str())));
    }
}
