use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub const CATEGORIES: &[&str] = &[
    "DSA",
    "Web Dev",
    "Core Subjects",
    "Aptitude",
    "Company Specific",
    "System Design",
    "DevOps",
    "Languages",
];
pub const KINDS: &[&str] = &["Video", "Article", "PDF", "Cheatsheet", "Link"];

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub added_by: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_kind() -> String {
    "Link".into()
}

fn default_public() -> bool {
    true
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/resources", get(list_resources).post(create_resource))
}

const COLUMNS: &str =
    "id, title, description, category, kind, url, tags, is_public, added_by, created_at";

/// Shared catalog: public entries plus the caller's private ones.
#[instrument(skip(state))]
pub async fn list_resources(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let rows = sqlx::query_as::<_, Resource>(&format!(
        "SELECT {COLUMNS} FROM resources
         WHERE is_public OR added_by = $1
         ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_resource(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateResourceRequest>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    if payload.title.trim().is_empty() || payload.url.trim().is_empty() {
        return Err(ApiError::Validation("title and url are required".into()));
    }
    if !CATEGORIES.contains(&payload.category.as_str()) {
        return Err(ApiError::Validation(format!(
            "category must be one of {:?}",
            CATEGORIES
        )));
    }
    if !KINDS.contains(&payload.kind.as_str()) {
        return Err(ApiError::Validation(format!(
            "type must be one of {:?}",
            KINDS
        )));
    }

    let resource = sqlx::query_as::<_, Resource>(&format!(
        "INSERT INTO resources (title, description, category, kind, url, tags, is_public, added_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {COLUMNS}"
    ))
    .bind(payload.title.trim())
    .bind(payload.description)
    .bind(&payload.category)
    .bind(&payload.kind)
    .bind(payload.url.trim())
    .bind(&payload.tags)
    .bind(payload.is_public)
    .bind(user_id)
    .fetch_one(&state.db)
    .await?;

    info!(resource_id = %resource.id, category = %resource.category, "resource added");
    Ok((StatusCode::CREATED, Json(resource)))
}
