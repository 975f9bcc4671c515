//! データベース初期化とusersテーブルの用意

use crate::common::error::AppError;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;

/// `users` テーブル定義
const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    email TEXT
)
"#;

/// SQLiteデータベース接続プールを作成
///
/// データベースファイルが存在しない場合は親ディレクトリごと作成する。
/// `sqlite::memory:` は単一接続に制限する（接続ごとに別DBになるため）。
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    if is_memory(database_url) {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)));
    }

    if let Some(parent) = file_path(database_url).and_then(|p| p.parent().map(|p| p.to_owned())) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(&parent).map_err(|e| {
                AppError::Database(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    SqlitePool::connect_with(options)
        .await
        .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))
}

/// `users` テーブルを作成（存在する場合は何もしない）
pub async fn ensure_users_table(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(CREATE_USERS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;
    Ok(())
}

/// Label shown as `db` in `GET /health`: the file path, or the URL for in-memory databases.
pub fn database_label(database_url: &str) -> String {
    file_path(database_url)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| database_url.to_string())
}

fn is_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn file_path(database_url: &str) -> Option<std::path::PathBuf> {
    if is_memory(database_url) {
        return None;
    }
    let path = database_url.strip_prefix("sqlite:")?;
    let normalized = path.trim_start_matches("//");
    let without_params = normalized.split('?').next().unwrap_or(normalized);
    Some(std::path::PathBuf::from(without_params))
}
