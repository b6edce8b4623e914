use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::{types::Json as Jsonb, FromRow};
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::repo::Badge, auth::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/leaderboard", get(leaderboard))
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub username: String,
    pub xp: i64,
    pub level: i32,
    pub streak: i32,
    pub badges: Jsonb<Vec<Badge>>,
}

#[instrument(skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let entries = sqlx::query_as::<_, LeaderboardEntry>(
        "SELECT id, username, xp, level, streak, badges
         FROM users
         ORDER BY xp DESC, username ASC
         LIMIT 20",
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(entries))
}
