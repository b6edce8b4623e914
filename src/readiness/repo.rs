use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::score::{Difficulty, ProblemFacts, ScoreInputs};

#[derive(Debug, FromRow)]
pub struct ProblemRow {
    pub difficulty: String,
    pub status: String,
    pub attempts: i32,
}

pub async fn problem_rows(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ProblemRow>> {
    let rows = sqlx::query_as::<_, ProblemRow>(
        "SELECT difficulty, status, jsonb_array_length(attempts) AS attempts
         FROM problems
         WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

async fn rounds_completed_30d(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let since = (OffsetDateTime::now_utc() - Duration::days(30)).date();
    let count: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(jsonb_array_length(
             COALESCE(metrics->'completedRounds', '[]'::jsonb))), 0)::bigint
         FROM day_logs
         WHERE user_id = $1 AND date >= $2",
    )
    .bind(user_id)
    .bind(since)
    .fetch_one(db)
    .await?;
    Ok(count)
}

async fn mastered_topic_count(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM topic_progress WHERE user_id = $1 AND status = 'Mastered'",
    )
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(count)
}

async fn core_topic_count(db: &PgPool) -> anyhow::Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM topics WHERE category = 'Core Subjects'")
            .fetch_one(db)
            .await?;
    Ok(count)
}

pub fn to_facts(rows: &[ProblemRow]) -> Vec<ProblemFacts> {
    rows.iter()
        .map(|r| ProblemFacts {
            // Difficulty is validated at insert; anything else counts as Easy
            // so the slot still lands in the denominator.
            difficulty: Difficulty::parse(&r.difficulty).unwrap_or(Difficulty::Easy),
            solved: r.status == "Solved",
            attempts: r.attempts.max(0) as usize,
        })
        .collect()
}

pub async fn gather_inputs(db: &PgPool, user_id: Uuid) -> anyhow::Result<ScoreInputs> {
    let problems = problem_rows(db, user_id).await?;
    let rounds = rounds_completed_30d(db, user_id).await?;
    let mastered = mastered_topic_count(db, user_id).await?;
    let core = core_topic_count(db).await?;

    Ok(ScoreInputs {
        problems: to_facts(&problems),
        rounds_completed_30d: rounds.max(0) as u32,
        mastered_topics: mastered.max(0) as u32,
        core_topics: core.max(0) as u32,
    })
}

pub async fn total_study_minutes(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_time), 0)::bigint FROM day_logs WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facts_mapping_keeps_every_slot() {
        let rows = vec![
            ProblemRow {
                difficulty: "Hard".into(),
                status: "Solved".into(),
                attempts: 2,
            },
            ProblemRow {
                difficulty: "Bogus".into(),
                status: "Pending".into(),
                attempts: 0,
            },
        ];
        let facts = to_facts(&rows);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].difficulty, Difficulty::Hard);
        assert!(facts[0].solved);
        assert_eq!(facts[1].difficulty, Difficulty::Easy);
        assert!(!facts[1].solved);
    }
}
