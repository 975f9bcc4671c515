//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// テーブル初期化
pub mod bootstrap;

/// ユーザー管理
pub mod users;
