//! Simulated user configuration

use crate::error::{Error, Result};
use crate::session::{Session, DEFAULT_VERSION};
use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UserConfig {
    /// Webhook endpoint every turn is POSTed to
    pub base_url: Url,
    /// Protocol version sent with every request
    pub version: String,
    /// Passed through verbatim in `session.session_id` when set
    pub session_id: Option<String>,
    /// Per-request transport timeout; `None` leaves it to reqwest
    pub timeout: Option<Duration>,
}

impl UserConfig {
    /// # Errors
    ///
    /// [`Error::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            base_url,
            version: DEFAULT_VERSION.to_string(),
            session_id: None,
            timeout: None,
        })
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Session the first turn is sent with
    #[must_use]
    pub fn initial_session(&self) -> Session {
        let session = Session::initial().with_version(self.version.clone());
        match &self.session_id {
            Some(id) => session.with_session_id(id.clone()),
            None => session,
        }
    }
}
