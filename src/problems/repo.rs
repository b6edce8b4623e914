use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A retry of a previously logged problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub time_taken: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub link: Option<String>,
    pub platform: String,
    pub difficulty: String,
    pub topic: Option<String>,
    pub status: String,
    pub time_taken: Option<i32>,
    pub is_optimal: bool,
    pub pattern_used: Option<String>,
    pub notes: Option<String>,
    pub solved_at: OffsetDateTime,
    pub next_revision_date: Option<OffsetDateTime>,
    pub attempts: Json<Vec<Attempt>>,
    pub created_at: OffsetDateTime,
}

const PROBLEM_COLUMNS: &str = "id, user_id, title, link, platform, difficulty, topic, status, \
     time_taken, is_optimal, pattern_used, notes, solved_at, next_revision_date, \
     attempts, created_at";

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Problem>> {
    let rows = sqlx::query_as::<_, Problem>(&format!(
        "SELECT {PROBLEM_COLUMNS} FROM problems
         WHERE user_id = $1
         ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub struct NewProblem<'a> {
    pub title: &'a str,
    pub link: Option<&'a str>,
    pub platform: &'a str,
    pub difficulty: &'a str,
    pub topic: Option<&'a str>,
    pub status: &'a str,
    pub time_taken: Option<i32>,
    pub is_optimal: bool,
    pub pattern_used: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub attempts: Json<Vec<Attempt>>,
}

pub async fn create(db: &PgPool, user_id: Uuid, p: NewProblem<'_>) -> anyhow::Result<Problem> {
    let row = sqlx::query_as::<_, Problem>(&format!(
        "INSERT INTO problems (user_id, title, link, platform, difficulty, topic,
                               status, time_taken, is_optimal, pattern_used, notes, attempts)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING {PROBLEM_COLUMNS}"
    ))
    .bind(user_id)
    .bind(p.title)
    .bind(p.link)
    .bind(p.platform)
    .bind(p.difficulty)
    .bind(p.topic)
    .bind(p.status)
    .bind(p.time_taken)
    .bind(p.is_optimal)
    .bind(p.pattern_used)
    .bind(p.notes)
    .bind(p.attempts)
    .fetch_one(db)
    .await?;
    Ok(row)
}
