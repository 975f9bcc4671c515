//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! Per-request failures never surface here: the dispatcher converts them into
//! [`RequestOutcome`](crate::dispatch::RequestOutcome) values. These types cover
//! the conditions that do abort an operation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Fatal dispatcher error
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A slot's task ended without producing an outcome (panic or abort)
    #[error("Slot {slot} was lost during aggregation: {reason}")]
    SlotLost {
        /// 1-based slot index
        slot: usize,
        /// Join failure description
        reason: String,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Server-side error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Insert into the users table failed
    #[error("Failed to insert user: {0}")]
    InsertUser(#[source] sqlx::Error),

    /// Select from the users table failed
    #[error("Failed to fetch users: {0}")]
    FetchUsers(#[source] sqlx::Error),

    /// Database bootstrap or connection failure
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns a safe error message for external clients.
    ///
    /// Full details go to the server log only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::InsertUser(_) => "Error inserting user",
            Self::FetchUsers(_) => "Error fetching users",
            Self::Database(_) => "Database error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (self.status_code(), self.external_message()).into_response()
    }
}

/// Result alias for server operations
pub type AppResult<T> = Result<T, AppError>;
