use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json as Jsonb, FromRow};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub const STATUSES: &[&str] = &["Idea", "In Progress", "Completed", "Deployed"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewPrep {
    pub architecture_explained: bool,
    pub challenges_documented: bool,
    pub future_scope_defined: bool,
    pub readme_polished: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub status: String,
    pub confidence_score: i32,
    pub interview_prep: Jsonb<InterviewPrep>,
    pub features: Vec<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub confidence_score: Option<i32>,
    #[serde(default)]
    pub interview_prep: InterviewPrep,
    #[serde(default)]
    pub features: Vec<String>,
}

fn default_status() -> String {
    "In Progress".into()
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/projects", get(list_projects).post(create_project))
}

const COLUMNS: &str = "id, user_id, title, description, tech_stack, github_link, live_link, \
     status, confidence_score, interview_prep, features, created_at";

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Project>>, ApiError> {
    let rows = sqlx::query_as::<_, Project>(&format!(
        "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".into()));
    }
    if !STATUSES.contains(&payload.status.as_str()) {
        return Err(ApiError::Validation(format!(
            "status must be one of {:?}",
            STATUSES
        )));
    }

    let project = sqlx::query_as::<_, Project>(&format!(
        "INSERT INTO projects (user_id, title, description, tech_stack, github_link,
                               live_link, status, confidence_score, interview_prep, features)
         VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 50), $9, $10)
         RETURNING {COLUMNS}"
    ))
    .bind(user_id)
    .bind(payload.title.trim())
    .bind(payload.description)
    .bind(&payload.tech_stack)
    .bind(payload.github_link)
    .bind(payload.live_link)
    .bind(&payload.status)
    .bind(payload.confidence_score)
    .bind(Jsonb(payload.interview_prep))
    .bind(&payload.features)
    .fetch_one(&state.db)
    .await?;

    info!(user_id = %user_id, project_id = %project.id, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}
