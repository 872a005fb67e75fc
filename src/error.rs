//! Error types for the simulated user

use crate::protocol::TurnResponse;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a turn can fail with
#[derive(Debug, Error)]
pub enum Error {
    /// Backend reply is missing or has a malformed `response`
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("Предыдущий запрос не вернул ни одной кнопки")]
    NoButtons,

    #[error("Кнопка \"{selector}\" не найдена среди возможных кнопок: {}.", .titles.join(", "))]
    ButtonNotFound {
        selector: String,
        titles: Vec<String>,
    },

    /// The turn's POST failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The turn succeeded but the follow-up GET for the button URL failed.
    /// `response` is the turn response the POST returned.
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        response: Box<TurnResponse>,
        #[source]
        source: TransportError,
    },

    #[error("conversation not entered yet, call enter() first")]
    NotEntered,

    #[error("conversation already entered, enter() is only legal as the first turn")]
    AlreadyEntered,

    #[error("invalid title pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid request patch: {0}")]
    InvalidPatch(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Transport failure with classification
#[derive(Debug, Clone, Error)]
#[error("{kind} for {url}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub url: String,
    pub message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(kind: TransportErrorKind, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, url, message)
    }

    #[must_use]
    pub fn timeout(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, url, message)
    }

    #[must_use]
    pub fn status(status: u16, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Status(status), url, message)
    }

    /// The HTTP client itself could not be set up; no request was made
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Client, "", message)
    }

    /// Same error, attributed to `url`
    #[must_use]
    pub fn with_url(self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self
        }
    }

    #[must_use]
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, url, message)
    }

    /// Classify a reqwest error
    #[must_use]
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(url, err.to_string())
        } else if let Some(status) = err.status() {
            Self::status(status.as_u16(), url, err.to_string())
        } else if err.is_decode() {
            Self::decode(url, err.to_string())
        } else {
            Self::network(url, err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, reset, DNS and the like
    Network,
    Timeout,
    /// Non-2xx status code
    Status(u16),
    /// Body could not be read
    Decode,
    /// HTTP client construction failed
    Client,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network error"),
            Self::Timeout => write!(f, "timeout"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Decode => write!(f, "decode error"),
            Self::Client => write!(f, "client setup error"),
        }
    }
}
