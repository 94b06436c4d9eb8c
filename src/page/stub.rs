//! Deterministic fetcher for tests.

use super::{HtmlPage, PageFetcher};
use crate::error::CheckError;
use std::sync::Mutex;
use std::time::Duration;

/// Search page with results and no "no results" banner.
pub const RESULTS_PAGE: &str =
    r#"<html><body><main><c-wiz><article><a href="./articles/1">Story</a></article></c-wiz></main></body></html>"#;

/// Search page showing the "no results" banner.
pub const NO_RESULTS_PAGE: &str = r#"<html><body><main><c-wiz><div class="UW0SDc">There are no items to show.</div></c-wiz></main></body></html>"#;

type Responder = Box<dyn Fn(&str) -> Result<String, CheckError> + Send + Sync>;

/// Answers each load from a closure over the requested URL and remembers
/// every URL it was asked for.
pub struct StubFetcher {
    respond: Responder,
    loaded: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(respond: impl Fn(&str) -> Result<String, CheckError> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            loaded: Mutex::new(Vec::new()),
        }
    }

    pub fn always(html: &'static str) -> Self {
        Self::new(move |_| Ok(html.to_string()))
    }

    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().unwrap().clone()
    }
}

impl PageFetcher for StubFetcher {
    type Page = HtmlPage;

    async fn load(&self, url: &str, _timeout: Duration) -> Result<HtmlPage, CheckError> {
        self.loaded.lock().unwrap().push(url.to_string());
        (self.respond)(url).map(HtmlPage::from_html)
    }
}
