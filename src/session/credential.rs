//! Session credential value

use crate::{FaError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static CREDENTIAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^b=([a-z0-9\-]+); a=([a-z0-9\-]+)$").expect("valid regex"));

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9\-]+$").expect("valid regex"));

/// The `b`/`a` cookie pair identifying a logged-in session
///
/// Rendered as `b=<token>; a=<token>`, which is both the form accepted from
/// callers and the `Cookie` header sent upstream. A `Credential` can only be
/// built from well-formed tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    b: String,
    a: String,
}

impl Credential {
    /// Parses the textual `b=<token>; a=<token>` form
    ///
    /// Surrounding whitespace is ignored; anything else that does not match
    /// the pattern fails with `InvalidCredentialFormat`.
    pub fn parse(raw: &str) -> Result<Self> {
        let captures = CREDENTIAL_PATTERN
            .captures(raw.trim())
            .ok_or(FaError::InvalidCredentialFormat)?;
        Ok(Self {
            b: captures[1].to_string(),
            a: captures[2].to_string(),
        })
    }

    /// Builds a credential from the two cookie values of a login response
    pub fn from_tokens(b: &str, a: &str) -> Result<Self> {
        if !TOKEN_PATTERN.is_match(b) || !TOKEN_PATTERN.is_match(a) {
            return Err(FaError::InvalidCredentialFormat);
        }
        Ok(Self {
            b: b.to_string(),
            a: a.to_string(),
        })
    }

    /// The value sent as the `Cookie` request header
    pub fn cookie_header(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b={}; a={}", self.b, self.a)
    }
}

// Never print the tokens through `{:?}`; they end up in logs otherwise.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
