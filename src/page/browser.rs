//! Headless Chrome page fetching (`browser` feature).
//!
//! Each load opens a new tab, navigates, and waits until navigation has
//! finished. Lookups run `querySelector` chains inside the tab, so the checks
//! see the page after its scripts have rendered. The tab is closed when the
//! [`BrowserPage`] is dropped.

use super::{ElementHandle, Page, PageFetcher};
use crate::error::CheckError;
use crate::utils::run_blocking;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub struct BrowserFetcher {
    browser: Browser,
}

impl BrowserFetcher {
    /// Launch a browser, headless or with a visible window.
    pub fn launch(headless: bool) -> Result<Self, CheckError> {
        let browser = Browser::new(LaunchOptions {
            headless,
            window_size: Some((1920, 1080)),
            ..Default::default()
        })
        .map_err(|e| CheckError::Config(format!("cannot launch browser: {e}")))?;
        Ok(Self { browser })
    }
}

impl PageFetcher for BrowserFetcher {
    type Page = BrowserPage;

    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn load(&self, url: &str, timeout: Duration) -> Result<BrowserPage, CheckError> {
        let browser = self.browser.clone();
        let target = url.to_string();
        let task = tokio::task::spawn_blocking(move || -> Result<BrowserPage, CheckError> {
            let tab = browser
                .new_tab()
                .map_err(|e| CheckError::fetch(&target, e))?;
            // Owning the tab from here on closes it on every error path below.
            let page = BrowserPage { tab };
            page.tab.set_default_timeout(timeout);
            page.tab
                .navigate_to(&target)
                .and_then(|tab| tab.wait_until_navigated())
                .map_err(|e| CheckError::fetch(&target, e))?;
            Ok(page)
        });

        let page = match tokio::time::timeout(timeout, task).await {
            Ok(Ok(loaded)) => loaded?,
            Ok(Err(join_err)) => return Err(CheckError::fetch(url, join_err)),
            Err(_) => {
                return Err(CheckError::Timeout {
                    url: url.to_string(),
                    timeout,
                });
            }
        };
        debug!("Tab settled");
        Ok(page)
    }
}

/// A rendered page living in its own browser tab.
pub struct BrowserPage {
    tab: Arc<Tab>,
}

impl BrowserPage {
    /// Walk the locator chain in the tab. Returns the element's text when
    /// `with_text` is set, an empty string otherwise, or `None` if any step
    /// matches nothing. The CDP round trip blocks, so it runs off the worker.
    fn query(&self, path: &[String], with_text: bool) -> Result<Option<String>, CheckError> {
        let chain = serde_json::to_string(path)
            .map_err(|e| CheckError::Extraction(format!("cannot encode locators: {e}")))?;
        let script = format!(
            "(() => {{ let el = document; for (const s of {chain}) {{ el = el.querySelector(s); if (!el) return null; }} return {}; }})()",
            if with_text { "el.textContent" } else { "''" }
        );
        let result = run_blocking(|| self.tab.evaluate(&script, false))
            .map_err(|e| CheckError::Extraction(format!("lookup of {path:?} failed: {e}")))?;
        Ok(match result.value {
            Some(serde_json::Value::String(text)) => Some(text),
            _ => None,
        })
    }
}

impl Page for BrowserPage {
    fn find_element(&self, locator: &str) -> Result<Option<ElementHandle>, CheckError> {
        let handle = ElementHandle::root(locator);
        Ok(self.query(handle.path(), false)?.map(|_| handle))
    }

    fn find_within(
        &self,
        parent: &ElementHandle,
        locator: &str,
    ) -> Result<Option<ElementHandle>, CheckError> {
        let handle = parent.child(locator);
        Ok(self.query(handle.path(), false)?.map(|_| handle))
    }

    fn text_content(&self, element: &ElementHandle) -> Result<String, CheckError> {
        self.query(element.path(), true)?.ok_or_else(|| {
            CheckError::Extraction(format!(
                "element {:?} is no longer on the page",
                element.path()
            ))
        })
    }
}

impl Drop for BrowserPage {
    fn drop(&mut self) {
        if let Err(e) = run_blocking(|| self.tab.close(true)) {
            warn!(error = %e, "Failed to close browser tab");
        }
    }
}
