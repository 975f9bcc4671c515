//! REST APIハンドラー
//!
//! `GET /health` と `GET /test` を提供する。

/// ヘルスチェック
pub mod health;
/// users テーブルの挿入・一覧
pub mod users;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// ルーターを構築
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/test", get(users::insert_and_list))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
