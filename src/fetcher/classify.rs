//! Upstream error page detection

use crate::{FaError, Result};
use scraper::{Html, Selector};

/// Title the site gives its generic error page
pub const SYSTEM_ERROR_TITLE: &str = "System Error";

/// Rejects the site's generic error page before any parser sees it
///
/// The site answers missing users, deleted submissions and expired sessions
/// with HTTP 200 and a page titled `System Error`.
pub fn classify(document: &Html, url: &str) -> Result<()> {
    if extract_title(document).as_deref() == Some(SYSTEM_ERROR_TITLE) {
        tracing::debug!("Upstream system error page at {}", url);
        return Err(FaError::UpstreamSystemError {
            url: url.to_string(),
        });
    }
    Ok(())
}

/// Extracts the page title from the HTML document
pub fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("head title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
