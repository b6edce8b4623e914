use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{repo as users, AuthUser},
    error::ApiError,
    gamification::engine,
    state::AppState,
};

use super::dto::{
    CreateTopicRequest, ProgressEntry, UpsertProgressRequest, MASTERED, PROGRESS_STATUSES,
};
use super::repo::{self, Topic, TopicProgress};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/topics", get(list_topics).post(create_topic))
        .route("/topics/progress", get(list_progress).post(upsert_progress))
}

#[instrument(skip(state))]
pub async fn list_topics(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<Topic>>, ApiError> {
    let topics = repo::list_topics(&state.db).await?;
    Ok(Json(topics))
}

#[instrument(skip(state, payload))]
pub async fn create_topic(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTopicRequest>,
) -> Result<Json<Topic>, ApiError> {
    let user = users::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    if user.role != "admin" && user.role != "mentor" {
        return Err(ApiError::Forbidden("Only mentors can edit the catalog"));
    }
    if payload.name.trim().is_empty() || payload.category.trim().is_empty() {
        return Err(ApiError::Validation(
            "name and category are required".into(),
        ));
    }

    let topic = repo::create_topic(
        &state.db,
        payload.name.trim(),
        payload.category.trim(),
        payload.subcategory.as_deref(),
        payload.difficulty.as_deref(),
        payload.notes.as_deref(),
    )
    .await?;

    info!(topic_id = %topic.id, name = %topic.name, "topic created");
    Ok(Json(topic))
}

#[instrument(skip(state))]
pub async fn list_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ProgressEntry>>, ApiError> {
    let rows = repo::list_progress(&state.db, user_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn upsert_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpsertProgressRequest>,
) -> Result<Json<TopicProgress>, ApiError> {
    if !PROGRESS_STATUSES.contains(&payload.status.as_str()) {
        return Err(ApiError::Validation(format!(
            "status must be one of {:?}",
            PROGRESS_STATUSES
        )));
    }
    if let Some(score) = payload.confidence_score {
        if !(0..=100).contains(&score) {
            return Err(ApiError::Validation(
                "confidenceScore must be between 0 and 100".into(),
            ));
        }
    }
    if !repo::topic_exists(&state.db, payload.topic_id).await? {
        return Err(ApiError::NotFound("Topic not found"));
    }

    let progress = repo::upsert_progress(
        &state.db,
        user_id,
        payload.topic_id,
        &payload.status,
        payload.confidence_score,
    )
    .await?;

    engine::on_topic_progress(&state.db, user_id, payload.status == MASTERED).await?;

    info!(user_id = %user_id, topic_id = %payload.topic_id, status = %payload.status, "progress updated");
    Ok(Json(progress))
}
