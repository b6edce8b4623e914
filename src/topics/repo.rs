use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub difficulty: Option<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic_id: Uuid,
    pub status: String,
    pub confidence_score: i32,
    pub accuracy: f32,
    pub avg_time_per_problem: f32,
    pub reattempt_success: f32,
    pub pattern_mastery: f32,
    pub total_problems_solved: i32,
    pub last_practiced: Option<OffsetDateTime>,
    pub notes: Option<String>,
    pub updated_at: OffsetDateTime,
}

/// Progress row joined with its catalog topic, for the progress listing.
#[derive(Debug, Clone, FromRow)]
pub struct ProgressWithTopic {
    #[sqlx(flatten)]
    pub progress: TopicProgress,
    pub topic_name: String,
    pub topic_category: String,
    pub topic_subcategory: Option<String>,
    pub topic_difficulty: Option<String>,
}

pub async fn list_topics(db: &PgPool) -> anyhow::Result<Vec<Topic>> {
    let topics = sqlx::query_as::<_, Topic>(
        "SELECT id, name, category, subcategory, difficulty, notes, created_at
         FROM topics
         ORDER BY category, name",
    )
    .fetch_all(db)
    .await?;
    Ok(topics)
}

pub async fn create_topic(
    db: &PgPool,
    name: &str,
    category: &str,
    subcategory: Option<&str>,
    difficulty: Option<&str>,
    notes: Option<&str>,
) -> anyhow::Result<Topic> {
    let topic = sqlx::query_as::<_, Topic>(
        "INSERT INTO topics (name, category, subcategory, difficulty, notes)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, name, category, subcategory, difficulty, notes, created_at",
    )
    .bind(name)
    .bind(category)
    .bind(subcategory)
    .bind(difficulty)
    .bind(notes)
    .fetch_one(db)
    .await?;
    Ok(topic)
}

pub async fn topic_exists(db: &PgPool, topic_id: Uuid) -> anyhow::Result<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM topics WHERE id = $1)")
            .bind(topic_id)
            .fetch_one(db)
            .await?;
    Ok(exists)
}

pub async fn list_progress(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ProgressWithTopic>> {
    let rows = sqlx::query_as::<_, ProgressWithTopic>(
        "SELECT p.id, p.user_id, p.topic_id, p.status, p.confidence_score,
                p.accuracy, p.avg_time_per_problem, p.reattempt_success,
                p.pattern_mastery, p.total_problems_solved, p.last_practiced,
                p.notes, p.updated_at,
                t.name AS topic_name, t.category AS topic_category,
                t.subcategory AS topic_subcategory, t.difficulty AS topic_difficulty
         FROM topic_progress p
         JOIN topics t ON t.id = p.topic_id
         WHERE p.user_id = $1
         ORDER BY t.category, t.name",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// One row per (user, topic), enforced by the unique index; concurrent
/// submissions land on the same row instead of duplicating it.
pub async fn upsert_progress(
    db: &PgPool,
    user_id: Uuid,
    topic_id: Uuid,
    status: &str,
    confidence_score: Option<i32>,
) -> anyhow::Result<TopicProgress> {
    let progress = sqlx::query_as::<_, TopicProgress>(
        "INSERT INTO topic_progress (user_id, topic_id, status, confidence_score, last_practiced)
         VALUES ($1, $2, $3, COALESCE($4, 0), now())
         ON CONFLICT (user_id, topic_id) DO UPDATE SET
             status = $3,
             confidence_score = COALESCE($4, topic_progress.confidence_score),
             last_practiced = now(),
             updated_at = now()
         RETURNING id, user_id, topic_id, status, confidence_score, accuracy,
                   avg_time_per_problem, reattempt_success, pattern_mastery,
                   total_problems_solved, last_practiced, notes, updated_at",
    )
    .bind(user_id)
    .bind(topic_id)
    .bind(status)
    .bind(confidence_score)
    .fetch_one(db)
    .await?;
    Ok(progress)
}
