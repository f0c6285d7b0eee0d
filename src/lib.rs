//! FAExport: structured data from FurAffinity pages
//!
//! This crate fetches server-rendered pages from FurAffinity on behalf of a
//! logged-in session, validates them, and extracts typed records (profiles,
//! submissions, journals, shouts, folder listings, watch lists and search
//! results). Fetched pages are memoized through a pluggable TTL cache.

pub mod cache;
pub mod client;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod fetcher;
pub mod search;
pub mod session;

use thiserror::Error;

/// Main error type for FAExport operations
#[derive(Debug, Error)]
pub enum FaError {
    #[error("Invalid login cookie, expected 'b=<token>; a=<token>'")]
    InvalidCredentialFormat,

    #[error("Login failed at {url}")]
    LoginFailed { url: String },

    #[error("Upstream unavailable at {url}: {reason}")]
    UpstreamUnavailable { url: String, reason: String },

    #[error("Upstream reported a system error for {url}")]
    UpstreamSystemError { url: String },

    #[error("Unexpected page structure at {url}: missing {anchor}")]
    UnexpectedPageStructure { url: String, anchor: String },

    #[error("Invalid search parameters: {0}")]
    InvalidSearchParameters(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl FaError {
    /// The upstream URL involved in the failure, if the failure reached the network
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::LoginFailed { url }
            | Self::UpstreamUnavailable { url, .. }
            | Self::UpstreamSystemError { url }
            | Self::UnexpectedPageStructure { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Returns true if repeating the same request might succeed
    ///
    /// The crate never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for FAExport operations
pub type Result<T> = std::result::Result<T, FaError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::{CacheStore, MemoryCache, SqliteCache};
pub use client::FaClient;
pub use config::Config;
pub use crawler::FolderCrawler;
pub use extract::{FolderKind, Journal, Profile, Shout, Submission, WatchDirection};
pub use fetcher::{FetchedPage, PageFetcher};
pub use search::SearchQuery;
pub use session::{Credential, RequestSession, SessionManager};
