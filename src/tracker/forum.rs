use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json as Jsonb, FromRow};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub const CATEGORIES: &[&str] = &[
    "General",
    "DSA",
    "Interview Experience",
    "Placement News",
    "Referrals",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author_id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub upvotes: Vec<Uuid>,
    pub comments: Jsonb<Vec<Comment>>,
    pub is_anonymous: bool,
    pub tags: Vec<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_category() -> String {
    "General".into()
}

#[derive(Debug, Deserialize)]
pub struct PostFilter {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/forum/posts", get(list_posts).post(create_post))
        .route("/forum/posts/:id/upvote", post(toggle_upvote))
        .route("/forum/posts/:id/comments", post(add_comment))
}

const COLUMNS: &str = "id, author_id, title, content, category, upvotes, comments, \
     is_anonymous, tags, created_at";

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(filter): Query<PostFilter>,
) -> Result<Json<Vec<ForumPost>>, ApiError> {
    let rows = sqlx::query_as::<_, ForumPost>(&format!(
        "SELECT {COLUMNS} FROM forum_posts
         WHERE $1::text IS NULL OR category = $1
         ORDER BY created_at DESC"
    ))
    .bind(filter.category)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ForumPost>), ApiError> {
    if payload.title.trim().is_empty() || payload.content.trim().is_empty() {
        return Err(ApiError::Validation("title and content are required".into()));
    }
    if !CATEGORIES.contains(&payload.category.as_str()) {
        return Err(ApiError::Validation(format!(
            "category must be one of {:?}",
            CATEGORIES
        )));
    }

    let post = sqlx::query_as::<_, ForumPost>(&format!(
        "INSERT INTO forum_posts (author_id, title, content, category, is_anonymous, tags)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COLUMNS}"
    ))
    .bind(user_id)
    .bind(payload.title.trim())
    .bind(&payload.content)
    .bind(&payload.category)
    .bind(payload.is_anonymous)
    .bind(&payload.tags)
    .fetch_one(&state.db)
    .await?;

    info!(post_id = %post.id, category = %post.category, "forum post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// One vote per user per post: a second upvote from the same user takes
/// the vote back. Single statement, so concurrent taps cannot
/// double-count.
#[instrument(skip(state))]
pub async fn toggle_upvote(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ForumPost>, ApiError> {
    let post = sqlx::query_as::<_, ForumPost>(&format!(
        "UPDATE forum_posts
         SET upvotes = CASE
             WHEN $2 = ANY(upvotes) THEN array_remove(upvotes, $2)
             ELSE array_append(upvotes, $2)
         END
         WHERE id = $1
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::NotFound("Post not found"))?;
    Ok(Json(post))
}

#[instrument(skip(state, payload))]
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<Json<ForumPost>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::Validation("content is required".into()));
    }

    let comment = Comment {
        author_id: user_id,
        content: payload.content.trim().to_string(),
        created_at: OffsetDateTime::now_utc(),
    };

    let post = sqlx::query_as::<_, ForumPost>(&format!(
        "UPDATE forum_posts
         SET comments = comments || $2::jsonb
         WHERE id = $1
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(Jsonb(vec![comment]))
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::NotFound("Post not found"))?;
    Ok(Json(post))
}
