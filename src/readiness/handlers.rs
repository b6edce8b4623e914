use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    auth::{repo as users, AuthUser},
    error::ApiError,
    state::AppState,
};

use super::repo;
use super::score::{self, ReadinessScore};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/readiness-score", get(readiness_score))
        .route("/analytics", get(analytics))
}

#[instrument(skip(state))]
pub async fn readiness_score(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ReadinessScore>, ApiError> {
    let inputs = repo::gather_inputs(&state.db, user_id).await?;
    Ok(Json(score::compute(&inputs)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_problems: usize,
    pub solved: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub total_study_minutes: i64,
    pub streak: i32,
    pub max_streak: i32,
    pub xp: i64,
    pub level: i32,
}

/// Dashboard aggregates: raw counts only, no scoring policy.
#[instrument(skip(state))]
pub async fn analytics(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Analytics>, ApiError> {
    let problems = repo::problem_rows(&state.db, user_id).await?;
    let total_study_minutes = repo::total_study_minutes(&state.db, user_id).await?;
    let user = users::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    let count_difficulty =
        |d: &str| problems.iter().filter(|p| p.difficulty == d).count();

    Ok(Json(Analytics {
        total_problems: problems.len(),
        solved: problems.iter().filter(|p| p.status == "Solved").count(),
        easy: count_difficulty("Easy"),
        medium: count_difficulty("Medium"),
        hard: count_difficulty("Hard"),
        total_study_minutes,
        streak: user.streak,
        max_streak: user.max_streak,
        xp: user.xp,
        level: user.level,
    }))
}
