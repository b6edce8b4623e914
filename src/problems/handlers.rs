use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use sqlx::types::Json as Jsonb;
use tracing::{info, instrument};

use crate::{auth::AuthUser, error::ApiError, gamification::engine, state::AppState};

use super::dto::{CreateProblemRequest, DIFFICULTIES, PLATFORMS, STATUSES};
use super::repo::{self, NewProblem, Problem};

pub fn routes() -> Router<AppState> {
    Router::new().route("/problems", get(list_problems).post(create_problem))
}

#[instrument(skip(state))]
pub async fn list_problems(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Problem>>, ApiError> {
    let problems = repo::list_by_user(&state.db, user_id).await?;
    Ok(Json(problems))
}

#[instrument(skip(state, payload))]
pub async fn create_problem(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateProblemRequest>,
) -> Result<(StatusCode, Json<Problem>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".into()));
    }
    if !DIFFICULTIES.contains(&payload.difficulty.as_str()) {
        return Err(ApiError::Validation(format!(
            "difficulty must be one of {:?}",
            DIFFICULTIES
        )));
    }
    if !PLATFORMS.contains(&payload.platform.as_str()) {
        return Err(ApiError::Validation(format!(
            "platform must be one of {:?}",
            PLATFORMS
        )));
    }
    if !STATUSES.contains(&payload.status.as_str()) {
        return Err(ApiError::Validation(format!(
            "status must be one of {:?}",
            STATUSES
        )));
    }

    let problem = repo::create(
        &state.db,
        user_id,
        NewProblem {
            title: payload.title.trim(),
            link: payload.link.as_deref(),
            platform: &payload.platform,
            difficulty: &payload.difficulty,
            topic: payload.topic.as_deref(),
            status: &payload.status,
            time_taken: payload.time_taken,
            is_optimal: payload.is_optimal,
            pattern_used: payload.pattern_used.as_deref(),
            notes: payload.notes.as_deref(),
            attempts: Jsonb(payload.attempts),
        },
    )
    .await?;

    engine::on_problem_created(&state.db, user_id).await?;

    info!(user_id = %user_id, problem_id = %problem.id, difficulty = %problem.difficulty, "problem logged");
    Ok((StatusCode::CREATED, Json(problem)))
}
