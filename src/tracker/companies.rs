use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json as Jsonb, FromRow};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub const TIERS: &[&str] = &["Tier 1", "Tier 2", "Tier 3", "Startup", "MNC"];
pub const STATUSES: &[&str] = &[
    "Target",
    "Applied",
    "OA Received",
    "Interview Scheduled",
    "Offer",
    "Rejected",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistItem {
    pub task: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub tier: String,
    pub status: String,
    pub readiness_score: i32,
    pub target_date: Option<OffsetDateTime>,
    pub notes: Option<String>,
    pub checklist: Jsonb<Vec<ChecklistItem>>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub name: String,
    #[serde(default = "default_tier")]
    pub tier: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub target_date: Option<OffsetDateTime>,
    pub notes: Option<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

fn default_tier() -> String {
    "Tier 1".into()
}

fn default_status() -> String {
    "Target".into()
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/companies", get(list_companies).post(create_company))
}

const COLUMNS: &str =
    "id, user_id, name, tier, status, readiness_score, target_date, notes, checklist, created_at";

#[instrument(skip(state))]
pub async fn list_companies(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Company>>, ApiError> {
    let rows = sqlx::query_as::<_, Company>(&format!(
        "SELECT {COLUMNS} FROM companies WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_company(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".into()));
    }
    if !TIERS.contains(&payload.tier.as_str()) {
        return Err(ApiError::Validation(format!(
            "tier must be one of {:?}",
            TIERS
        )));
    }
    if !STATUSES.contains(&payload.status.as_str()) {
        return Err(ApiError::Validation(format!(
            "status must be one of {:?}",
            STATUSES
        )));
    }

    let company = sqlx::query_as::<_, Company>(&format!(
        "INSERT INTO companies (user_id, name, tier, status, target_date, notes, checklist)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {COLUMNS}"
    ))
    .bind(user_id)
    .bind(payload.name.trim())
    .bind(&payload.tier)
    .bind(&payload.status)
    .bind(payload.target_date)
    .bind(payload.notes)
    .bind(Jsonb(payload.checklist))
    .fetch_one(&state.db)
    .await?;

    info!(user_id = %user_id, company_id = %company.id, "company added");
    Ok((StatusCode::CREATED, Json(company)))
}
