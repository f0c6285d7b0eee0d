//! Session handling
//!
//! Two credentials can be in play for any request:
//! - the process-wide default, owned by `SessionManager`, shared and read-mostly
//! - an override presented by the caller, which lives only in the
//!   `RequestSession` value threaded through that one request
//!
//! `RequestSession::current_credential` is the single place the two are
//! resolved: override first, default otherwise.

mod credential;
mod login;

pub use credential::Credential;
pub use login::credential_from_headers;
pub(crate) use login::describe_transport_error;

use crate::Result;
use reqwest::Client;
use std::sync::{PoisonError, RwLock};
use url::Url;

/// Owner of the process-wide default credential
pub struct SessionManager {
    client: Client,
    origin: Url,
    default: RwLock<Option<Credential>>,
}

impl SessionManager {
    /// Creates a manager without a default credential
    pub fn new(client: Client, origin: Url) -> Self {
        Self {
            client,
            origin,
            default: RwLock::new(None),
        }
    }

    /// Returns a copy of the current default credential
    pub fn default_credential(&self) -> Option<Credential> {
        self.default
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the default credential
    ///
    /// Writers are mutually exclusive, so readers never observe a torn value.
    pub fn set_default(&self, credential: Option<Credential>) {
        *self.default.write().unwrap_or_else(PoisonError::into_inner) = credential;
    }

    /// Performs the login exchange and returns the resulting credential
    ///
    /// The credential is not installed as the default; callers decide whether
    /// to keep and store it.
    pub async fn obtain_default(&self, username: &str, password: &str) -> Result<Credential> {
        login::login(&self.client, &self.origin, username, password).await
    }

    /// Starts a request scope holding a snapshot of the default credential
    pub fn request(&self) -> RequestSession {
        RequestSession::new(self.default_credential())
    }
}

/// Credential state for a single logical request
#[derive(Debug, Clone, Default)]
pub struct RequestSession {
    default: Option<Credential>,
    override_credential: Option<Credential>,
}

impl RequestSession {
    pub fn new(default: Option<Credential>) -> Self {
        Self {
            default,
            override_credential: None,
        }
    }

    /// A request that carries no credential at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Installs a caller-supplied credential for this request
    ///
    /// Fails with `InvalidCredentialFormat` and leaves the session untouched if
    /// `raw` is not of the form `b=<token>; a=<token>`.
    pub fn set_override(&mut self, raw: &str) -> Result<()> {
        let credential = Credential::parse(raw)?;
        self.override_credential = Some(credential);
        Ok(())
    }

    /// Drops the override, falling back to the default again
    pub fn clear_override(&mut self) {
        self.override_credential = None;
    }

    pub fn has_override(&self) -> bool {
        self.override_credential.is_some()
    }

    /// The credential to present upstream for this request
    pub fn current_credential(&self) -> Option<&Credential> {
        self.override_credential.as_ref().or(self.default.as_ref())
    }
}
