//! Outbound request seam
//!
//! The dispatcher only needs to issue a GET and receive a status plus body.
//! [`HttpTransport`] does this with a shared `reqwest::Client`.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;
use url::Url;

use super::outcome::TransportError;
use crate::common::error::DispatchError;

/// What came back from the target, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportResponse {
    /// 2xx response with its full body
    Success {
        /// HTTP status
        status: u16,
        /// Raw response body
        body: Vec<u8>,
    },
    /// Non-2xx response. The body is left unread.
    Failure {
        /// HTTP status
        status: u16,
    },
}

/// Issues one outbound GET on behalf of a slot
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Send a GET to `target` for the given 1-based `slot`.
    async fn get(&self, slot: usize, target: &Url) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with an optional per-request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, DispatchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DispatchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shares its connection pool).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, slot: usize, target: &Url) -> Result<TransportResponse, TransportError> {
        let response = self.client.get(target.clone()).send().await?;
        let status = response.status();
        trace!(slot, status = status.as_u16(), "Response received");

        if !status.is_success() {
            return Ok(TransportResponse::Failure {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(TransportResponse::Success {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
