//! Insert-then-select test API

use crate::common::error::AppResult;
use crate::db::users::{NewUser, User, UserStorage};
use crate::AppState;
use axum::{extract::State, Json};

/// Row inserted by every `GET /test` call
const TEST_USER: NewUser<'static> = NewUser {
    name: "John Doe",
    email: "john@example.com",
};

/// GET /test
///
/// 固定ユーザーを1件追加し、usersテーブル全件を返す。
pub async fn insert_and_list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let storage = UserStorage::new(state.db_pool);
    let id = storage.insert(TEST_USER).await?;
    tracing::debug!(user_id = id, "Test user inserted");
    Ok(Json(storage.list().await?))
}
