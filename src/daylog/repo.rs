use serde::Serialize;
use sqlx::{types::Json, FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::{day_fmt, Activity, Metrics};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "day_fmt")]
    pub date: Date,
    pub mood: String,
    pub notes: Option<String>,
    pub activities: Json<Vec<Activity>>,
    pub metrics: Json<Metrics>,
    pub total_time: i32,
    pub updated_at: OffsetDateTime,
}

/// Slim projection for the heatmap view.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapEntry {
    #[serde(with = "day_fmt")]
    pub date: Date,
    pub metrics: Json<Metrics>,
    pub total_time: i32,
}

const DAYLOG_COLUMNS: &str =
    "id, user_id, date, mood, notes, activities, metrics, total_time, updated_at";

/// Merge-save for one (user, date). A single conditional upsert: omitted
/// fields keep their stored value, and total_time is replaced only when a
/// new activities list arrives. The unique key on (user_id, date) is what
/// prevents duplicate per-day rows under concurrent submissions.
pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    mood: Option<&str>,
    notes: Option<&str>,
    activities: Option<Json<Vec<Activity>>>,
    metrics: Option<Json<Metrics>>,
    total_time: Option<i32>,
) -> anyhow::Result<DayLog> {
    let log = sqlx::query_as::<_, DayLog>(&format!(
        "INSERT INTO day_logs (user_id, date, mood, notes, activities, metrics, total_time)
         VALUES ($1, $2, COALESCE($3, 'neutral'), $4,
                 COALESCE($5::jsonb, '[]'::jsonb),
                 COALESCE($6::jsonb, '{{}}'::jsonb),
                 COALESCE($7, 0))
         ON CONFLICT (user_id, date) DO UPDATE SET
             mood = COALESCE($3, day_logs.mood),
             notes = COALESCE($4, day_logs.notes),
             activities = COALESCE($5::jsonb, day_logs.activities),
             metrics = COALESCE($6::jsonb, day_logs.metrics),
             total_time = COALESCE($7, day_logs.total_time),
             updated_at = now()
         RETURNING {DAYLOG_COLUMNS}"
    ))
    .bind(user_id)
    .bind(date)
    .bind(mood)
    .bind(notes)
    .bind(activities)
    .bind(metrics)
    .bind(total_time)
    .fetch_one(db)
    .await?;
    Ok(log)
}

pub async fn find_by_date(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Option<DayLog>> {
    let log = sqlx::query_as::<_, DayLog>(&format!(
        "SELECT {DAYLOG_COLUMNS} FROM day_logs WHERE user_id = $1 AND date = $2"
    ))
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn list_all(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<HeatmapEntry>> {
    let rows = sqlx::query_as::<_, HeatmapEntry>(
        "SELECT date, metrics, total_time
         FROM day_logs
         WHERE user_id = $1
         ORDER BY date ASC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
