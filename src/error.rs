//! Error kinds raised while checking domains.
//!
//! Only [`CheckError::Input`] and [`CheckError::Config`] stop the process. Fetch,
//! timeout and extraction failures are contained at the attempt level by the
//! validator, and output failures are reported after the summary is printed.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// The domain list could not be loaded.
    #[error("cannot load domains from {path}: {reason}")]
    Input { path: String, reason: String },

    /// The settings file or a CLI value could not be turned into a configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The result page could not be loaded.
    #[error("failed to load {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The result page did not settle within the allotted time.
    #[error("timed out after {timeout:?} loading {url}")]
    Timeout { url: String, timeout: Duration },

    /// An indicator could not interpret the loaded page.
    #[error("evidence extraction failed: {0}")]
    Extraction(String),

    /// The report could not be persisted.
    #[error("cannot write report to {path}: {reason}")]
    Output { path: String, reason: String },
}

impl CheckError {
    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        CheckError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn output(path: &str, reason: impl ToString) -> Self {
        CheckError::Output {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}
