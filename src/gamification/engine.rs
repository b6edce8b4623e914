use serde_json::json;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::rules::{
    qualifying_badges, BadgeRule, XP_BADGE_BONUS, XP_PER_LEVEL, XP_PROBLEM_CREATED,
    XP_TOPIC_MASTERED, XP_TOPIC_PROGRESS,
};

/// Credits XP and re-derives the level in one statement. Returns the new
/// XP total.
pub async fn credit_xp(db: &PgPool, user_id: Uuid, amount: i64) -> anyhow::Result<i64> {
    let xp: i64 = sqlx::query_scalar(
        "UPDATE users
         SET xp = xp + $2,
             level = (1 + (xp + $2) / $3)::int
         WHERE id = $1
         RETURNING xp",
    )
    .bind(user_id)
    .bind(amount)
    .bind(XP_PER_LEVEL)
    .fetch_one(db)
    .await?;
    debug!(user_id = %user_id, amount, xp, "xp credited");
    Ok(xp)
}

/// Appends the badge and credits the bonus only if the name is not already
/// in the list. Single conditional update, so two concurrent requests can
/// never double-grant.
async fn try_grant_badge(db: &PgPool, user_id: Uuid, rule: &BadgeRule) -> anyhow::Result<bool> {
    let badge = json!([{
        "name": rule.name,
        "icon": rule.icon,
        "description": rule.description,
        "earnedDate": OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)?,
    }]);
    let probe = json!([{ "name": rule.name }]);

    let result = sqlx::query(
        "UPDATE users
         SET badges = badges || $2::jsonb,
             xp = xp + $3,
             level = (1 + (xp + $3) / $4)::int
         WHERE id = $1 AND NOT (badges @> $5::jsonb)",
    )
    .bind(user_id)
    .bind(&badge)
    .bind(XP_BADGE_BONUS)
    .bind(XP_PER_LEVEL)
    .bind(&probe)
    .execute(db)
    .await?;

    let granted = result.rows_affected() == 1;
    if granted {
        info!(user_id = %user_id, badge = rule.name, "badge granted");
    }
    Ok(granted)
}

/// Re-evaluates every badge rule against the user's current aggregates.
/// Safe to call repeatedly; grants are at-most-once per name.
pub async fn check_badges(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    let problem_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM problems WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db)
            .await?;
    let xp: i64 = sqlx::query_scalar("SELECT xp FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await?;

    for rule in qualifying_badges(problem_count, xp) {
        try_grant_badge(db, user_id, &rule).await?;
    }
    Ok(())
}

pub async fn on_problem_created(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    credit_xp(db, user_id, XP_PROBLEM_CREATED).await?;
    check_badges(db, user_id).await
}

pub async fn on_topic_progress(db: &PgPool, user_id: Uuid, mastered: bool) -> anyhow::Result<()> {
    let amount = if mastered {
        XP_TOPIC_MASTERED
    } else {
        XP_TOPIC_PROGRESS
    };
    credit_xp(db, user_id, amount).await?;
    check_badges(db, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xp_amounts_match_policy() {
        assert_eq!(XP_PROBLEM_CREATED, 10);
        assert_eq!(XP_TOPIC_MASTERED, 50);
        assert_eq!(XP_TOPIC_PROGRESS, 5);
        assert_eq!(XP_BADGE_BONUS, 50);
    }

    #[test]
    fn ten_easy_problems_scenario_xp() {
        // 10 problems at +10 each, plus two badge bonuses at +50
        let base: i64 = 10 * XP_PROBLEM_CREATED;
        let badges = qualifying_badges(10, base);
        let bonus = badges.len() as i64 * XP_BADGE_BONUS;
        assert_eq!(base + bonus, 200);
    }
}
