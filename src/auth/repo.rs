use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageProficiency {
    pub language: String,
    pub confidence: i32,
    pub problem_solving_comfort: i32,
    pub interview_readiness: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub full_name: Option<String>,
    pub college: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i32>,
    pub github_profile: Option<String>,
    pub linkedin_profile: Option<String>,
    pub portfolio: Option<String>,
    pub target_role: Option<String>,
    pub language_proficiency: Vec<LanguageProficiency>,
}

/// One-time achievement. Grant bookkeeping lives in the gamification engine;
/// this is only the stored shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: String,
    pub icon: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub earned_date: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: String,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".into(),
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub profile: Json<Profile>,
    pub xp: i64,
    pub level: i32,
    pub streak: i32,
    pub max_streak: i32,
    pub badges: Json<Vec<Badge>>,
    pub settings: Json<Settings>,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, username, email, password_hash, role, profile, \
     xp, level, streak, max_streak, badges, settings, created_at";

pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn create(
    db: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password_hash)
         VALUES ($1, $2, $3)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db)
    .await?;
    Ok(user)
}

/// Only profile and settings are reachable through the public update
/// contract; xp, level, streak and badges are derived fields owned by the
/// gamification engine.
pub async fn update_profile(
    db: &PgPool,
    user_id: Uuid,
    profile: Option<Json<Profile>>,
    settings: Option<Json<Settings>>,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users
         SET profile = COALESCE($2, profile),
             settings = COALESCE($3, settings)
         WHERE id = $1
         RETURNING {USER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(profile)
    .bind(settings)
    .fetch_optional(db)
    .await?;
    Ok(user)
}
