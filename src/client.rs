//! Client facade
//!
//! `FaClient` ties the pieces together: the request session picks the
//! credential, the fetcher produces a validated page, and the matching
//! parser or the folder crawler turns it into a record.

use crate::cache::{CacheStore, MemoryCache, SqliteCache};
use crate::config::{AuthConfig, CacheBackend, CacheConfig, Config};
use crate::crawler::FolderCrawler;
use crate::extract::{
    parse_journal, parse_journal_listing, parse_profile, parse_search_results, parse_shouts,
    parse_submission, parse_watch_list, FolderKind, Journal, JournalListing, Profile,
    SearchResultSet, Shout, Submission, WatchDirection, WatchList,
};
use crate::fetcher::{build_http_client, parse_origin, DocumentSource, PageFetcher};
use crate::search::SearchQuery;
use crate::session::{Credential, RequestSession, SessionManager};
use crate::{FaError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use url::Url;

/// Cache key of the credential obtained by logging in at startup
pub const LOGIN_COOKIE_KEY: &str = "login_cookie";

static USER_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9\-_~.\[\]`]|%5[BbDd]|%60)+$").expect("valid regex")
});

/// Entry point for reading FurAffinity data
pub struct FaClient {
    fetcher: PageFetcher,
    sessions: SessionManager,
}

impl FaClient {
    /// Assembles a client from already-built parts
    pub fn new(fetcher: PageFetcher, sessions: SessionManager) -> Self {
        Self { fetcher, sessions }
    }

    /// Builds a client from configuration and resolves the default credential
    ///
    /// The default credential comes from the first of: the configured cookie,
    /// a login cookie cached by an earlier run, a fresh login with the
    /// configured username and password. With none of those the client runs
    /// anonymously.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(FaClient)` - Ready to serve requests
    /// * `Err(FaError)` - Cache could not be opened, or login failed
    pub async fn connect(config: &Config) -> Result<Self> {
        let origin = parse_origin(&config.site.origin)?;
        let client = build_http_client(&config.site)?;
        let cache = open_cache(&config.cache)?;

        let fetcher = PageFetcher::new(
            client.clone(),
            origin.clone(),
            Arc::clone(&cache),
            Duration::from_secs(config.cache.fetch_ttl),
        );
        let sessions = SessionManager::new(client, origin);

        let credential = bootstrap_credential(
            &sessions,
            cache.as_ref(),
            &config.auth,
            Duration::from_secs(config.cache.session_ttl),
        )
        .await?;
        sessions.set_default(credential);

        Ok(Self::new(fetcher, sessions))
    }

    pub fn origin(&self) -> &Url {
        self.fetcher.origin()
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Starts a request scope carrying the current default credential
    pub fn request(&self) -> RequestSession {
        self.sessions.request()
    }

    /// Profile of `name`
    pub async fn user(&self, name: &str, session: &RequestSession) -> Result<Profile> {
        validate_user_name(name)?;
        let page = self.fetcher.fetch(&format!("user/{}/", name), session).await?;
        page.parse(|doc, url| parse_profile(doc, url, name))
    }

    /// Shouts on the profile of `name`
    pub async fn shouts(&self, name: &str, session: &RequestSession) -> Result<Vec<Shout>> {
        validate_user_name(name)?;
        let page = self.fetcher.fetch(&format!("user/{}/", name), session).await?;
        page.parse(parse_shouts)
    }

    pub async fn submission(&self, id: &str, session: &RequestSession) -> Result<Submission> {
        validate_id(id)?;
        let page = self.fetcher.fetch(&format!("view/{}/", id), session).await?;
        let origin = self.fetcher.origin();
        page.parse(|doc, url| parse_submission(doc, url, origin, id))
    }

    pub async fn journal(&self, id: &str, session: &RequestSession) -> Result<Journal> {
        validate_id(id)?;
        let page = self.fetcher.fetch(&format!("journal/{}/", id), session).await?;
        let origin = self.fetcher.origin();
        page.parse(|doc, url| parse_journal(doc, url, origin, id))
    }

    /// Journal ids of `user`, newest first
    pub async fn journals(&self, user: &str, session: &RequestSession) -> Result<JournalListing> {
        validate_user_name(user)?;
        let page = self
            .fetcher
            .fetch(&format!("journals/{}/", user), session)
            .await?;
        page.parse(parse_journal_listing)
    }

    /// Submission ids in one of `user`'s folders, across pages
    pub async fn submissions(
        &self,
        user: &str,
        kind: FolderKind,
        start_page: u32,
        max_pages: u32,
        session: &RequestSession,
    ) -> Result<Vec<String>> {
        validate_user_name(user)?;
        FolderCrawler::new(&self.fetcher)
            .list_folder(user, kind, start_page, max_pages, session)
            .await
    }

    /// One page of the users watching `user`, or watched by `user`
    pub async fn watch_list(
        &self,
        user: &str,
        direction: WatchDirection,
        page: u32,
        session: &RequestSession,
    ) -> Result<WatchList> {
        validate_user_name(user)?;
        let page = self
            .fetcher
            .fetch(&direction.path(user, page.max(1)), session)
            .await?;
        page.parse(parse_watch_list)
    }

    pub async fn search(
        &self,
        query: &SearchQuery,
        session: &RequestSession,
    ) -> Result<SearchResultSet> {
        query.validate()?;
        let page = self.fetcher.fetch(&query.to_path(), session).await?;
        page.parse(parse_search_results)
    }
}

/// Opens the configured cache backend
pub fn open_cache(config: &CacheConfig) -> Result<Arc<dyn CacheStore>> {
    let cache: Arc<dyn CacheStore> = match config.backend {
        CacheBackend::Memory => match config.max_entries {
            Some(max_entries) => Arc::new(MemoryCache::with_capacity(max_entries)),
            None => Arc::new(MemoryCache::new()),
        },
        CacheBackend::Sqlite => {
            tracing::info!("Opening cache database at {}", config.database_path);
            Arc::new(SqliteCache::open(Path::new(&config.database_path))?)
        }
    };
    Ok(cache)
}

/// Resolves the default credential at startup
///
/// A credential obtained by logging in is stored under `LOGIN_COOKIE_KEY` for
/// `session_ttl` so restarts within that window skip the login exchange.
pub async fn bootstrap_credential(
    sessions: &SessionManager,
    cache: &dyn CacheStore,
    auth: &AuthConfig,
    session_ttl: Duration,
) -> Result<Option<Credential>> {
    if let Some(cookie) = &auth.cookie {
        tracing::info!("Using the configured login cookie");
        return Credential::parse(cookie).map(Some);
    }

    match cache.get(LOGIN_COOKIE_KEY) {
        Ok(Some(raw)) => match Credential::parse(&raw) {
            Ok(credential) => {
                tracing::info!("Using the cached login cookie");
                return Ok(Some(credential));
            }
            Err(_) => tracing::warn!("Ignoring malformed cached login cookie"),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!("Could not read cached login cookie: {}", e),
    }

    let (Some(username), Some(password)) = (&auth.username, &auth.password) else {
        tracing::warn!("No login cookie or credentials configured; requests will be anonymous");
        return Ok(None);
    };

    let credential = sessions.obtain_default(username, password).await?;
    if let Err(e) = cache.set(LOGIN_COOKIE_KEY, &credential.to_string(), session_ttl) {
        tracing::warn!("Could not cache login cookie: {}", e);
    }
    Ok(Some(credential))
}

/// Checks a user name before it is placed in a path
///
/// Names made only of dots are refused: URL joining would read them as
/// relative path segments and leave the user's directory.
pub fn validate_user_name(name: &str) -> Result<()> {
    let dots_only = name.bytes().all(|b| b == b'.');
    if !dots_only && USER_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(FaError::InvalidIdentifier(name.to_string()))
    }
}

/// Checks a submission or journal id before it is placed in a path
pub fn validate_id(id: &str) -> Result<()> {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FaError::InvalidIdentifier(id.to_string()))
    }
}
