//! Plain HTTP page fetching.
//!
//! The search page is requested with `reqwest`, read to the end, and parsed
//! with `scraper`. A fully read body is the settled state for this fetcher.

use super::{ElementHandle, Page, PageFetcher};
use crate::error::CheckError;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};

/// A result page held as its raw HTML.
///
/// The body is re-parsed on each lookup, which keeps the page `Send` and is
/// cheap next to the network round trip.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    html: String,
}

impl HtmlPage {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    fn selector(locator: &str) -> Result<Selector, CheckError> {
        Selector::parse(locator)
            .map_err(|e| CheckError::Extraction(format!("invalid locator {locator:?}: {e:?}")))
    }

    fn resolve<'a>(
        document: &'a Html,
        path: &[String],
    ) -> Result<Option<ElementRef<'a>>, CheckError> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(None);
        };
        let mut current = match document.select(&Self::selector(first)?).next() {
            Some(el) => el,
            None => return Ok(None),
        };
        for locator in rest {
            current = match current.select(&Self::selector(locator)?).next() {
                Some(el) => el,
                None => return Ok(None),
            };
        }
        Ok(Some(current))
    }

    fn lookup(&self, handle: ElementHandle) -> Result<Option<ElementHandle>, CheckError> {
        let document = Html::parse_document(&self.html);
        Ok(Self::resolve(&document, handle.path())?.map(|_| handle))
    }
}

impl Page for HtmlPage {
    fn find_element(&self, locator: &str) -> Result<Option<ElementHandle>, CheckError> {
        self.lookup(ElementHandle::root(locator))
    }

    fn find_within(
        &self,
        parent: &ElementHandle,
        locator: &str,
    ) -> Result<Option<ElementHandle>, CheckError> {
        self.lookup(parent.child(locator))
    }

    fn text_content(&self, element: &ElementHandle) -> Result<String, CheckError> {
        let document = Html::parse_document(&self.html);
        match Self::resolve(&document, element.path())? {
            Some(el) => Ok(el.text().collect::<String>()),
            None => Err(CheckError::Extraction(format!(
                "element {:?} is no longer on the page",
                element.path()
            ))),
        }
    }
}

/// Fetches result pages over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, CheckError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| CheckError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn fetch_body(&self, url: &str) -> Result<String, CheckError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CheckError::fetch(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::fetch(url, format!("HTTP status {status}")));
        }
        response.text().await.map_err(|e| CheckError::fetch(url, e))
    }
}

impl PageFetcher for HttpFetcher {
    type Page = HtmlPage;

    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn load(&self, url: &str, timeout: Duration) -> Result<HtmlPage, CheckError> {
        let body = tokio::time::timeout(timeout, self.fetch_body(url))
            .await
            .map_err(|_| CheckError::Timeout {
                url: url.to_string(),
                timeout,
            })??;
        debug!(bytes = body.len(), "Loaded result page");
        Ok(HtmlPage::from_html(body))
    }
}
