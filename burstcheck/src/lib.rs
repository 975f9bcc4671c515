//! burstcheck
//!
//! 同一ヘルスチェックURLへの一斉リクエスト（fan-out）と、その標的となる
//! 軽量HTTPサーバーを提供する。

#![warn(missing_docs)]

/// 共通型定義（エラー型）
pub mod common;

/// Fan-out dispatcher (concurrent health-check batches)
pub mod dispatch;

/// REST APIハンドラー
pub mod api;

/// データベースアクセス
pub mod db;

/// axumサーバー起動・シャットダウン
pub mod server;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// Port reported by `GET /health`
    pub port: u16,
    /// Database label reported by `GET /health`
    pub db_label: String,
}
