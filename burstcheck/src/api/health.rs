//! Health check API

use crate::AppState;
use axum::{extract::State, http::header::SET_COOKIE, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// `GET /health` レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"UP"` while the server is serving
    pub status: String,
    /// Listen port
    pub port: u16,
    /// Database the server is backed by
    pub db: String,
}

/// `/health` が付与するCookie（60秒で失効）
pub const HEALTH_COOKIE: &str = "name=express; Max-Age=60; Path=/";

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, HEALTH_COOKIE)],
        Json(HealthResponse {
            status: "UP".to_string(),
            port: state.port,
            db: state.db_label,
        }),
    )
}
