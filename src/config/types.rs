use serde::Deserialize;

/// Main configuration structure for FAExport
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Upstream site and HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin all page paths are joined onto
    pub origin: String,

    /// User agent sent with every upstream request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout", default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

/// Which cache technology backs the page cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    Sqlite,
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_backend")]
    pub backend: CacheBackend,

    /// Path to the SQLite cache file (sqlite backend only)
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// How long a fetched page is reused (seconds)
    #[serde(rename = "fetch-ttl", default = "default_fetch_ttl")]
    pub fetch_ttl: u64,

    /// How long a login cookie obtained at startup is reused (seconds)
    #[serde(rename = "session-ttl", default = "default_session_ttl")]
    pub session_ttl: u64,

    /// Upper bound on entries held by the memory backend
    #[serde(rename = "max-entries", default)]
    pub max_entries: Option<usize>,
}

/// Credentials for the process-wide session
///
/// Either a ready-made cookie or a username/password pair for the login exchange.
#[derive(Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Folder crawl limits
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of folder pages fetched per listing
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database_path: default_database_path(),
            fetch_ttl: default_fetch_ttl(),
            session_ttl: default_session_ttl(),
            max_entries: None,
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
        }
    }
}

impl SiteConfig {
    /// Site settings for the given origin with every other value defaulted
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

fn default_user_agent() -> String {
    "FAExport".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_backend() -> CacheBackend {
    CacheBackend::Memory
}

fn default_database_path() -> String {
    "./faexport-cache.db".to_string()
}

fn default_fetch_ttl() -> u64 {
    30
}

fn default_session_ttl() -> u64 {
    86_400
}

fn default_max_pages() -> u32 {
    10
}
