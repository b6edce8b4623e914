use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json as Jsonb, FromRow};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub const SESSION_KINDS: &[&str] = &[
    "Mock Interview",
    "Doubt Clearing",
    "Career Guidance",
    "Project Review",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionFeedback {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MentorSession {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub date: OffsetDateTime,
    pub duration: i32,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub feedback: Jsonb<SessionFeedback>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MentorListing {
    pub id: Uuid,
    pub username: String,
    pub profile: Jsonb<crate::auth::repo::Profile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSessionRequest {
    pub mentor_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default = "default_duration")]
    pub duration: i32,
    pub notes: Option<String>,
}

fn default_duration() -> i32 {
    45
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mentors", get(list_mentors))
        .route(
            "/mentorship/sessions",
            get(list_sessions).post(request_session),
        )
}

const COLUMNS: &str = "id, mentor_id, student_id, kind, status, date, duration, \
     meeting_link, notes, feedback, created_at";

#[instrument(skip(state))]
pub async fn list_mentors(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<MentorListing>>, ApiError> {
    let mentors = sqlx::query_as::<_, MentorListing>(
        "SELECT id, username, profile FROM users WHERE role = 'mentor' ORDER BY username",
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(mentors))
}

/// Sessions where the caller is on either side of the table.
#[instrument(skip(state))]
pub async fn list_sessions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MentorSession>>, ApiError> {
    let rows = sqlx::query_as::<_, MentorSession>(&format!(
        "SELECT {COLUMNS} FROM mentor_sessions
         WHERE mentor_id = $1 OR student_id = $1
         ORDER BY date DESC"
    ))
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn request_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<RequestSessionRequest>,
) -> Result<(StatusCode, Json<MentorSession>), ApiError> {
    if !SESSION_KINDS.contains(&payload.kind.as_str()) {
        return Err(ApiError::Validation(format!(
            "type must be one of {:?}",
            SESSION_KINDS
        )));
    }
    if payload.duration <= 0 {
        return Err(ApiError::Validation("duration must be positive".into()));
    }

    let is_mentor: Option<String> =
        sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
            .bind(payload.mentor_id)
            .fetch_optional(&state.db)
            .await?;
    match is_mentor.as_deref() {
        Some("mentor") | Some("admin") => {}
        Some(_) => {
            return Err(ApiError::Validation(
                "requested user is not a mentor".into(),
            ))
        }
        None => return Err(ApiError::NotFound("Mentor not found")),
    }

    let session = sqlx::query_as::<_, MentorSession>(&format!(
        "INSERT INTO mentor_sessions (mentor_id, student_id, kind, date, duration, notes)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    ))
    .bind(payload.mentor_id)
    .bind(user_id)
    .bind(&payload.kind)
    .bind(payload.date)
    .bind(payload.duration)
    .bind(payload.notes)
    .fetch_one(&state.db)
    .await?;

    info!(session_id = %session.id, mentor_id = %payload.mentor_id, student_id = %user_id, "session requested");
    Ok((StatusCode::CREATED, Json(session)))
}
