//! Login exchange
//!
//! Posts the site's login form and lifts the `b`/`a` session cookies out of
//! the `Set-Cookie` headers of the response.

use crate::session::Credential;
use crate::{FaError, Result};
use reqwest::header::{HeaderMap, ACCEPT, ORIGIN, REFERER, SET_COOKIE};
use reqwest::Client;
use url::Url;

/// Performs the login exchange against `{origin}/login/`
///
/// Redirects are not followed: the site answers a successful login with a
/// redirect carrying the session cookies.
pub async fn login(client: &Client, origin: &Url, username: &str, password: &str) -> Result<Credential> {
    let url = origin
        .join("login/")
        .map_err(|e| FaError::LoginFailed {
            url: format!("{}login/ ({})", origin, e),
        })?;
    let url_str = url.to_string();
    let referer = url_str.clone();
    let origin_header = origin.as_str().trim_end_matches('/').to_string();

    tracing::info!("Logging in to {} as {}", url_str, username);

    let response = client
        .post(url)
        .header(ORIGIN, origin_header)
        .header(REFERER, referer)
        .header(ACCEPT, "*/*")
        .form(&[
            ("action", "login"),
            ("retard_protection", "1"),
            ("name", username),
            ("pass", password),
            ("login", "Login to Furaffinity"),
        ])
        .send()
        .await
        .map_err(|e| FaError::UpstreamUnavailable {
            url: url_str.clone(),
            reason: describe_transport_error(&e),
        })?;

    let credential = credential_from_headers(response.headers()).ok_or_else(|| {
        tracing::warn!(
            "Login response from {} (HTTP {}) carried no session cookies",
            url_str,
            response.status()
        );
        FaError::LoginFailed {
            url: url_str.clone(),
        }
    })?;

    tracing::info!("Login succeeded for {}", username);
    Ok(credential)
}

/// Builds a credential from the `b` and `a` cookies set by a response
///
/// Returns `None` if either cookie is missing or malformed.
pub fn credential_from_headers(headers: &HeaderMap) -> Option<Credential> {
    let mut b = None;
    let mut a = None;

    for value in headers.get_all(SET_COOKIE) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        let pair = value.split(';').next().unwrap_or_default().trim();
        match pair.split_once('=') {
            Some(("b", token)) => b = Some(token.to_string()),
            Some(("a", token)) => a = Some(token.to_string()),
            _ => {}
        }
    }

    Credential::from_tokens(&b?, &a?).ok()
}

/// Short human-readable reason for a failed exchange
pub(crate) fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}
