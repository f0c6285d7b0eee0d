use crate::config::types::{AuthConfig, CacheBackend, CacheConfig, Config, CrawlerConfig, SiteConfig};
use crate::session::Credential;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_cache_config(&config.cache)?;
    validate_auth_config(&config.auth)?;
    validate_crawler_config(&config.crawler)?;
    Ok(())
}

/// Validates upstream site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let origin = Url::parse(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", config.origin, e)))?;

    if origin.scheme() != "http" && origin.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must use http or https",
            config.origin
        )));
    }

    if origin.cannot_be_a_base() || origin.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' has no host",
            config.origin
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout == 0 || config.connect_timeout == 0 {
        return Err(ConfigError::Validation(
            "request_timeout and connect_timeout must be >= 1s".to_string(),
        ));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.fetch_ttl == 0 {
        return Err(ConfigError::Validation(
            "fetch_ttl must be >= 1s".to_string(),
        ));
    }

    if config.backend == CacheBackend::Sqlite && config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty for the sqlite backend".to_string(),
        ));
    }

    if config.max_entries == Some(0) {
        return Err(ConfigError::Validation(
            "max_entries must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates session credentials
fn validate_auth_config(config: &AuthConfig) -> Result<(), ConfigError> {
    if let Some(cookie) = &config.cookie {
        if Credential::parse(cookie).is_err() {
            return Err(ConfigError::Validation(
                "cookie must be in the format 'b=<token>; a=<token>'".to_string(),
            ));
        }
    }

    match (&config.username, &config.password) {
        (Some(_), None) | (None, Some(_)) => Err(ConfigError::Validation(
            "username and password must be given together".to_string(),
        )),
        (Some(username), Some(_)) if username.trim().is_empty() => Err(ConfigError::Validation(
            "username cannot be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Validates folder crawl limits
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }
    Ok(())
}
