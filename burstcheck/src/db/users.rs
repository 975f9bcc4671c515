//! usersテーブルのストレージ層

use crate::common::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// usersテーブルの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// 自動採番ID
    pub id: i64,
    /// 名前
    pub name: Option<String>,
    /// メールアドレス
    pub email: Option<String>,
}

/// 新規ユーザー
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    /// 名前
    pub name: &'a str,
    /// メールアドレス
    pub email: &'a str,
}

/// ユーザーストレージ
#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    /// 新しいストレージインスタンスを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// ユーザーを追加し、採番されたIDを返す
    pub async fn insert(&self, user: NewUser<'_>) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(user.name)
            .bind(user.email)
            .execute(&self.pool)
            .await
            .map_err(AppError::InsertUser)?;

        Ok(result.last_insert_rowid())
    }

    /// 全ユーザーをID順に取得
    pub async fn list(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::FetchUsers)
    }
}
