use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use sqlx::types::Json as Jsonb;
use tracing::{info, instrument};

use crate::{auth::AuthUser, error::ApiError, state::AppState};

use super::dto::{parse_date, total_minutes, DayLogResponse, SaveDayLogRequest, MOODS};
use super::repo::{self, DayLog, HeatmapEntry};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/daylog", post(save_daylog))
        .route("/daylog/:date", get(get_daylog))
        .route("/daylogs/all", get(list_daylogs))
}

impl From<DayLog> for DayLogResponse {
    fn from(log: DayLog) -> Self {
        Self {
            date: log.date,
            mood: log.mood,
            notes: log.notes,
            activities: log.activities.0,
            metrics: log.metrics.0,
            total_time: log.total_time,
            is_new: false,
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn save_daylog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SaveDayLogRequest>,
) -> Result<Json<DayLogResponse>, ApiError> {
    let raw_date = payload
        .date
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Date is required".into()))?;
    let date = parse_date(raw_date)
        .ok_or_else(|| ApiError::Validation("Date must be YYYY-MM-DD".into()))?;

    if let Some(mood) = payload.mood.as_deref() {
        if !MOODS.contains(&mood) {
            return Err(ApiError::Validation(format!(
                "mood must be one of {:?}",
                MOODS
            )));
        }
    }

    // Derived, never client-settable. Recomputed only when a new
    // activities list arrives; otherwise the stored total stands.
    let total_time = payload.activities.as_deref().map(total_minutes);

    let log = repo::upsert(
        &state.db,
        user_id,
        date,
        payload.mood.as_deref(),
        payload.notes.as_deref(),
        payload.activities.map(Jsonb),
        payload.metrics.map(Jsonb),
        total_time,
    )
    .await?;

    info!(user_id = %user_id, date = %raw_date, total_time = log.total_time, "day log saved");
    Ok(Json(log.into()))
}

#[instrument(skip(state))]
pub async fn get_daylog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(raw_date): Path<String>,
) -> Result<Json<DayLogResponse>, ApiError> {
    let date = parse_date(&raw_date)
        .ok_or_else(|| ApiError::Validation("Date must be YYYY-MM-DD".into()))?;

    // Absent log is not an error; the client initializes from the empty shape
    let response = match repo::find_by_date(&state.db, user_id, date).await? {
        Some(log) => log.into(),
        None => DayLogResponse::empty(date),
    };
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn list_daylogs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<HeatmapEntry>>, ApiError> {
    let rows = repo::list_all(&state.db, user_id).await?;
    Ok(Json(rows))
}
