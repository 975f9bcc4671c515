//! Per-slot request outcomes

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::transport::TransportResponse;

/// Transport-level failure of a single request.
///
/// A 2xx body that is not valid JSON is reported as [`TransportError::Parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "cause", content = "message", rename_all = "snake_case")]
pub enum TransportError {
    /// DNS failure, connection refused or reset
    #[error("connection failed: {0}")]
    Connect(String),

    /// The transport's timeout elapsed
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Any other request failure (redirect loop, invalid request, ...)
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    /// The response body was not valid JSON
    #[error("failed to parse response body: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            Self::Timeout(message)
        } else if err.is_connect() {
            Self::Connect(message)
        } else if err.is_body() || err.is_decode() {
            Self::Body(message)
        } else {
            Self::Request(message)
        }
    }
}

/// Settled result of one slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RequestOutcome {
    /// 2xx response with a JSON body
    Success(Value),
    /// Non-2xx response; the body was not read
    HttpError(u16),
    /// Network failure or unparseable body
    TransportError(TransportError),
}

impl RequestOutcome {
    /// Classify what the transport returned.
    pub fn from_transport(result: Result<TransportResponse, TransportError>) -> Self {
        match result {
            Ok(TransportResponse::Success { body, .. }) => match serde_json::from_slice(&body) {
                Ok(payload) => Self::Success(payload),
                Err(e) => Self::TransportError(TransportError::Parse(e.to_string())),
            },
            Ok(TransportResponse::Failure { status }) => Self::HttpError(status),
            Err(e) => Self::TransportError(e),
        }
    }

    /// Returns true for [`RequestOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The `message` string of a success payload, if there is one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(payload) => payload.get("message").and_then(Value::as_str),
            _ => None,
        }
    }
}
