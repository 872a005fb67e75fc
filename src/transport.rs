//! HTTP transport abstraction
//!
//! The user only needs two calls: POST a JSON turn request and GET a
//! navigation target as text. Keeping them behind a trait lets tests run the
//! user against queued mock replies.

#[cfg(test)]
pub(crate) mod testing;

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON and return the reply body as text
    ///
    /// Decoding the reply is left to the caller: a 2xx reply that is not
    /// JSON is a protocol problem, not a transport one.
    async fn post_json(&self, url: &Url, body: &Value) -> Result<String, TransportError>;

    /// GET `url` and return the body as text
    async fn get_text(&self, url: &Url) -> Result<String, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<String, TransportError> {
        (**self).post_json(url, body).await
    }

    async fn get_text(&self, url: &Url) -> Result<String, TransportError> {
        (**self).get_text(url).await
    }
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// [`crate::error::TransportErrorKind::Client`] if the underlying TLS
    /// backend cannot be initialised.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::client(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<String, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url.as_str(), &e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TransportError::status(status.as_u16(), url.as_str(), text));
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::decode(url.as_str(), e.to_string()))
    }

    async fn get_text(&self, url: &Url) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url.as_str(), &e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TransportError::status(status.as_u16(), url.as_str(), text));
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::decode(url.as_str(), e.to_string()))
    }
}

/// Logging wrapper for transports
pub struct LoggingTransport {
    inner: Arc<dyn Transport>,
}

impl LoggingTransport {
    #[must_use]
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Transport for LoggingTransport {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<String, TransportError> {
        let start = Instant::now();
        let result = self.inner.post_json(url, body).await?;
        tracing::debug!(
            method = "POST",
            url = %url,
            duration_ms = %start.elapsed().as_millis(),
            bytes = result.len(),
            "webhook replied"
        );
        Ok(result)
    }

    async fn get_text(&self, url: &Url) -> Result<String, TransportError> {
        let start = Instant::now();
        let result = self.inner.get_text(url).await?;
        tracing::debug!(
            method = "GET",
            url = %url,
            duration_ms = %start.elapsed().as_millis(),
            bytes = result.len(),
            "navigation fetched"
        );
        Ok(result)
    }
}
