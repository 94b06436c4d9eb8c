//! Loaded result pages and the fetchers that produce them.
//!
//! The evidence extractor only ever sees a [`Page`]: element lookup by CSS
//! locator and text extraction. That keeps it independent of how the page was
//! obtained, so the same checks run against:
//!
//! | Fetcher | Module | Notes |
//! |---------|--------|-------|
//! | [`HttpFetcher`] | [`http`] | `reqwest` + `scraper`, the default |
//! | `BrowserFetcher` | `browser` | `headless_chrome`, behind the `browser` feature |
//! | [`HtmlPage::from_html`] | [`http`] | in-memory fixture pages for tests |
//!
//! A page is the per-attempt resource. Dropping it releases whatever backs it
//! (a parsed body, a browser tab), so release happens on every exit path.

#[cfg(feature = "browser")]
pub mod browser;
pub mod http;
#[cfg(test)]
pub mod stub;

use crate::error::CheckError;
use std::time::Duration;

pub use http::{HtmlPage, HttpFetcher};

/// Reference to an element found on a [`Page`].
///
/// Stored as the chain of locators that leads to the element, outermost
/// first, and resolved again by the page when it is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    path: Vec<String>,
}

impl ElementHandle {
    pub fn root(locator: &str) -> Self {
        Self {
            path: vec![locator.to_string()],
        }
    }

    pub fn child(&self, locator: &str) -> Self {
        let mut path = self.path.clone();
        path.push(locator.to_string());
        Self { path }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }
}

/// A loaded, settled result page.
pub trait Page {
    /// First element matching `locator`, if any.
    fn find_element(&self, locator: &str) -> Result<Option<ElementHandle>, CheckError>;

    /// First element matching `locator` inside `parent`, if any.
    fn find_within(
        &self,
        parent: &ElementHandle,
        locator: &str,
    ) -> Result<Option<ElementHandle>, CheckError>;

    /// Concatenated text of the element and its descendants.
    fn text_content(&self, element: &ElementHandle) -> Result<String, CheckError>;
}

/// Loads result pages. Each call hands out a fresh page owned by the caller.
pub trait PageFetcher {
    type Page: Page;

    /// Load `url` and wait until it has settled, giving up after `timeout`.
    async fn load(&self, url: &str, timeout: Duration) -> Result<Self::Page, CheckError>;
}
