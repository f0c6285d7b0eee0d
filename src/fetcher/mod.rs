//! Page fetching
//!
//! This module turns a relative site path into a validated HTML document:
//! - building the HTTP client with the identifying user agent and timeouts
//! - memoizing raw pages in the cache under `url:<absolute-url>`
//! - sending the request session's credential as the `Cookie` header
//! - rejecting the site's generic error page before parsing

mod classify;

pub use classify::{classify, extract_title, SYSTEM_ERROR_TITLE};

use crate::cache::{get_or_compute, CacheStore};
use crate::config::SiteConfig;
use crate::session::{describe_transport_error, RequestSession};
use crate::{FaError, Result};
use reqwest::header::COOKIE;
use reqwest::{redirect::Policy, Client};
use scraper::Html;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Raw page body together with the URL it came from
///
/// The body is kept as text so the value can cross await points; parsing into
/// a document happens synchronously in `parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }

    /// Parses the body and rejects the site's error page
    pub fn document(&self) -> Result<Html> {
        let document = Html::parse_document(&self.body);
        classify(&document, &self.url)?;
        Ok(document)
    }

    /// Parses the body, validates it, then hands the document to `parser`
    pub fn parse<T>(&self, parser: impl FnOnce(&Html, &str) -> Result<T>) -> Result<T> {
        let document = self.document()?;
        parser(&document, &self.url)
    }
}

/// Anything that can produce pages for a site path
///
/// Implemented by `PageFetcher`; the folder crawler is generic over it so it
/// can be driven by canned pages.
pub trait DocumentSource: Send + Sync {
    fn fetch(
        &self,
        path: &str,
        session: &RequestSession,
    ) -> impl Future<Output = Result<FetchedPage>> + Send;
}

/// Cache-backed HTTP page fetcher
pub struct PageFetcher {
    client: Client,
    origin: Url,
    cache: Arc<dyn CacheStore>,
    fetch_ttl: Duration,
}

impl PageFetcher {
    pub fn new(client: Client, origin: Url, cache: Arc<dyn CacheStore>, fetch_ttl: Duration) -> Self {
        Self {
            client,
            origin,
            cache,
            fetch_ttl,
        }
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Absolute URL for a site path
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.origin
            .join(path.trim_start_matches('/'))
            .map_err(|_| FaError::InvalidIdentifier(path.to_string()))
    }

    async fn network_fetch(&self, url: &str, session: &RequestSession) -> Result<String> {
        tracing::debug!("Fetching {}", url);

        let mut request = self.client.get(url);
        if let Some(credential) = session.current_credential() {
            request = request.header(COOKIE, credential.cookie_header());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FaError::UpstreamUnavailable {
                url: url.to_string(),
                reason: describe_transport_error(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Upstream answered HTTP {} for {}", status.as_u16(), url);
            return Err(FaError::UpstreamUnavailable {
                url: url.to_string(),
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FaError::UpstreamUnavailable {
                url: url.to_string(),
                reason: describe_transport_error(&e),
            })
    }
}

impl DocumentSource for PageFetcher {
    async fn fetch(&self, path: &str, session: &RequestSession) -> Result<FetchedPage> {
        let url = self.url_for(path)?.to_string();
        let key = cache_key(&url);

        let body = get_or_compute(self.cache.as_ref(), &key, self.fetch_ttl, || {
            self.network_fetch(&url, session)
        })
        .await?;

        Ok(FetchedPage::new(url, body))
    }
}

/// Cache key for a fetched page
pub fn cache_key(absolute_url: &str) -> String {
    format!("url:{}", absolute_url)
}

/// Parses the configured origin, making sure paths join beneath it
pub fn parse_origin(origin: &str) -> Result<Url> {
    let mut url = Url::parse(origin).map_err(|e| {
        FaError::Config(crate::ConfigError::InvalidUrl(format!(
            "Invalid origin '{}': {}",
            origin, e
        )))
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Builds the HTTP client used for page fetches and the login exchange
///
/// Redirects are not followed: a redirect from a content page means the page
/// is not what was asked for, and the login exchange needs the cookies of the
/// redirect response itself.
pub fn build_http_client(config: &SiteConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}
