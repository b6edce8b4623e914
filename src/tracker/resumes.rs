use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json as Jsonb, FromRow};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, state::AppState};

/// Keywords ATS screens commonly look for in an engineering resume.
const ATS_KEYWORDS: &[&str] = &[
    "data structures",
    "algorithms",
    "java",
    "python",
    "c++",
    "javascript",
    "rust",
    "sql",
    "react",
    "node",
    "docker",
    "git",
    "rest",
    "linux",
    "system design",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub formatting_tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    pub skill: String,
    pub match_level: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_url: Option<String>,
    pub content: Option<String>,
    pub ats_score: i32,
    pub analysis: Jsonb<Analysis>,
    pub skill_match: Jsonb<Vec<SkillMatch>>,
    pub last_analyzed: OffsetDateTime,
    pub versions: Jsonb<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub content: String,
    pub resume_url: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resume", get(get_resume))
        .route("/resume/analyze", post(analyze_resume))
}

const COLUMNS: &str = "id, user_id, resume_url, content, ats_score, analysis, skill_match, \
     last_analyzed, versions";

#[instrument(skip(state))]
pub async fn get_resume(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Resume>, ApiError> {
    let resume = sqlx::query_as::<_, Resume>(&format!(
        "SELECT {COLUMNS} FROM resumes WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::NotFound("No resume analyzed yet"))?;
    Ok(Json(resume))
}

#[instrument(skip(state, payload))]
pub async fn analyze_resume(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<Resume>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::Validation("content is required".into()));
    }

    let report = analyze_content(&payload.content);

    let resume = sqlx::query_as::<_, Resume>(&format!(
        "INSERT INTO resumes (user_id, resume_url, content, ats_score, analysis, skill_match, last_analyzed)
         VALUES ($1, $2, $3, $4, $5, $6, now())
         ON CONFLICT (user_id) DO UPDATE SET
             resume_url = COALESCE($2, resumes.resume_url),
             content = $3,
             ats_score = $4,
             analysis = $5,
             skill_match = $6,
             last_analyzed = now()
         RETURNING {COLUMNS}"
    ))
    .bind(user_id)
    .bind(payload.resume_url)
    .bind(&payload.content)
    .bind(report.ats_score)
    .bind(Jsonb(report.analysis))
    .bind(Jsonb(report.skill_match))
    .fetch_one(&state.db)
    .await?;

    info!(user_id = %user_id, ats_score = resume.ats_score, "resume analyzed");
    Ok(Json(resume))
}

pub struct Report {
    pub ats_score: i32,
    pub analysis: Analysis,
    pub skill_match: Vec<SkillMatch>,
}

lazy_static! {
    static ref BULLET_RE: Regex = Regex::new(r"(?m)^\s*[-•*]").unwrap();
    static ref CONTACT_RE: Regex = Regex::new(r"[^@\s]+@[^@\s]+\.[^@\s]+").unwrap();
}

/// Keyword-presence scoring. Deterministic stand-in for a real parser:
/// matched keywords raise the score, structural checks add tips.
pub fn analyze_content(content: &str) -> Report {
    let lower = content.to_lowercase();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for kw in ATS_KEYWORDS {
        if lower.contains(kw) {
            matched.push(*kw);
        } else {
            missing.push(*kw);
        }
    }

    let mut formatting_tips = Vec::new();
    if !BULLET_RE.is_match(content) {
        formatting_tips.push("Use bullet points to list achievements".to_string());
    }
    if !CONTACT_RE.is_match(content) {
        formatting_tips.push("Add a contact email near the top".to_string());
    }
    if content.len() > 8000 {
        formatting_tips.push("Trim the resume to one or two pages".to_string());
    }

    let keyword_score = (matched.len() as i32) * 5;
    let structure_score = 10 - (formatting_tips.len() as i32) * 3;
    let ats_score = (25 + keyword_score + structure_score).clamp(0, 100);

    let strengths = matched
        .iter()
        .map(|kw| format!("Mentions {}", kw))
        .collect();
    let weaknesses = if matched.len() < 5 {
        vec!["Few role-relevant keywords detected".to_string()]
    } else {
        Vec::new()
    };

    let skill_match = matched
        .iter()
        .map(|kw| {
            let occurrences = lower.matches(kw).count() as i32;
            SkillMatch {
                skill: kw.to_string(),
                match_level: (60 + occurrences * 10).min(100),
            }
        })
        .collect();

    Report {
        ats_score,
        analysis: Analysis {
            strengths,
            weaknesses,
            missing_keywords: missing.iter().map(|s| s.to_string()).collect(),
            formatting_tips,
        },
        skill_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_rich_resume_scores_higher() {
        let strong = "jane@doe.dev\n- Built REST services in Rust and SQL\n\
                      - Java, Python, Docker, Git, Linux, React, system design";
        let weak = "I like computers.";
        let strong_report = analyze_content(strong);
        let weak_report = analyze_content(weak);
        assert!(strong_report.ats_score > weak_report.ats_score);
        assert!(strong_report.analysis.missing_keywords.len()
            < weak_report.analysis.missing_keywords.len());
    }

    #[test]
    fn missing_structure_produces_tips() {
        let report = analyze_content("plain text, no bullets, no email");
        assert!(report
            .analysis
            .formatting_tips
            .iter()
            .any(|t| t.contains("bullet")));
        assert!(report
            .analysis
            .formatting_tips
            .iter()
            .any(|t| t.contains("email")));
    }

    #[test]
    fn score_stays_in_range() {
        let report = analyze_content("");
        assert!((0..=100).contains(&report.ats_score));
    }
}
