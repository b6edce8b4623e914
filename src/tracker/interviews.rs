use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json as Jsonb, FromRow};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub const KINDS: &[&str] = &["Technical", "HR", "System Design", "Behavioral"];
pub const QUESTIONS_PER_SESSION: usize = 4;

const TECHNICAL_BANK: &[&str] = &[
    "Explain the difference between a process and a thread.",
    "How does a hash map handle collisions?",
    "When would you pick a linked list over an array?",
    "What happens during a TCP three-way handshake?",
    "Describe how garbage collection works in a managed runtime.",
    "What is database indexing and when does it hurt?",
];

const HR_BANK: &[&str] = &[
    "Tell me about yourself.",
    "Why do you want to join this company?",
    "Describe a conflict you resolved in a team.",
    "Where do you see yourself in five years?",
    "What is your biggest weakness?",
];

const SYSTEM_DESIGN_BANK: &[&str] = &[
    "Design a URL shortener.",
    "How would you scale a chat application to a million users?",
    "Design a rate limiter for a public API.",
    "How would you build a news feed ranking system?",
    "Design a file storage service with sharing.",
];

const BEHAVIORAL_BANK: &[&str] = &[
    "Tell me about a time you missed a deadline.",
    "Describe a project you are most proud of.",
    "How do you handle critical feedback?",
    "Tell me about a time you had to learn something quickly.",
    "Describe a decision you made with incomplete information.",
];

fn bank_for(kind: &str) -> &'static [&'static str] {
    match kind {
        "HR" => HR_BANK,
        "System Design" => SYSTEM_DESIGN_BANK,
        "Behavioral" => BEHAVIORAL_BANK,
        _ => TECHNICAL_BANK,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
    pub question: String,
    pub user_answer: Option<String>,
    pub feedback: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MockInterview {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub company_context: Option<String>,
    pub difficulty: String,
    pub questions: Jsonb<Vec<Question>>,
    pub overall_score: i32,
    pub overall_feedback: Option<String>,
    pub status: String,
    pub date: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    pub company_context: Option<String>,
}

fn default_difficulty() -> String {
    "Medium".into()
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/interviews", get(list_interviews))
        .route("/interviews/start", post(start_interview))
        .route("/interviews/:id/submit", post(submit_interview))
}

const COLUMNS: &str = "id, user_id, kind, company_context, difficulty, questions, \
     overall_score, overall_feedback, status, date";

#[instrument(skip(state))]
pub async fn list_interviews(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MockInterview>>, ApiError> {
    let rows = sqlx::query_as::<_, MockInterview>(&format!(
        "SELECT {COLUMNS} FROM mock_interviews WHERE user_id = $1 ORDER BY date DESC"
    ))
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn start_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<StartRequest>,
) -> Result<(StatusCode, Json<MockInterview>), ApiError> {
    if !KINDS.contains(&payload.kind.as_str()) {
        return Err(ApiError::Validation(format!(
            "type must be one of {:?}",
            KINDS
        )));
    }

    let questions = sample_questions(&payload.kind, QUESTIONS_PER_SESSION);

    let interview = sqlx::query_as::<_, MockInterview>(&format!(
        "INSERT INTO mock_interviews (user_id, kind, company_context, difficulty, questions, status)
         VALUES ($1, $2, $3, $4, $5, 'In Progress')
         RETURNING {COLUMNS}"
    ))
    .bind(user_id)
    .bind(&payload.kind)
    .bind(payload.company_context)
    .bind(&payload.difficulty)
    .bind(Jsonb(questions))
    .fetch_one(&state.db)
    .await?;

    info!(user_id = %user_id, interview_id = %interview.id, kind = %interview.kind, "interview started");
    Ok((StatusCode::CREATED, Json(interview)))
}

#[instrument(skip(state, payload))]
pub async fn submit_interview(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<MockInterview>, ApiError> {
    let interview = sqlx::query_as::<_, MockInterview>(&format!(
        "SELECT {COLUMNS} FROM mock_interviews WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::NotFound("Interview not found"))?;

    let (questions, overall_score, overall_feedback) =
        grade(interview.questions.0, &payload.answers);

    let updated = sqlx::query_as::<_, MockInterview>(&format!(
        "UPDATE mock_interviews
         SET questions = $3, overall_score = $4, overall_feedback = $5, status = 'Completed'
         WHERE id = $1 AND user_id = $2
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .bind(Jsonb(questions))
    .bind(overall_score)
    .bind(&overall_feedback)
    .fetch_one(&state.db)
    .await?;

    info!(user_id = %user_id, interview_id = %id, score = overall_score, "interview submitted");
    Ok(Json(updated))
}

pub fn sample_questions(kind: &str, count: usize) -> Vec<Question> {
    let bank = bank_for(kind);
    let mut rng = rand::thread_rng();
    bank.choose_multiple(&mut rng, count.min(bank.len()))
        .map(|q| Question {
            question: (*q).to_string(),
            ..Default::default()
        })
        .collect()
}

/// Word-count heuristic per answer, averaged into a 0-100 overall score.
pub fn grade(mut questions: Vec<Question>, answers: &[String]) -> (Vec<Question>, i32, String) {
    for (i, q) in questions.iter_mut().enumerate() {
        let answer = answers.get(i).map(|s| s.trim()).unwrap_or("");
        let score = score_answer(answer);
        q.user_answer = if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        };
        q.feedback = Some(feedback_for(score).to_string());
        q.score = Some(score);
    }

    let total: i32 = questions.iter().filter_map(|q| q.score).sum();
    let overall = if questions.is_empty() {
        0
    } else {
        total * 10 / questions.len() as i32
    };
    let overall_feedback = if overall >= 70 {
        "Strong session. Keep refining weak spots.".to_string()
    } else if overall >= 40 {
        "Decent attempt; several answers need more depth.".to_string()
    } else {
        "Answers were too thin. Practice structuring responses aloud.".to_string()
    };
    (questions, overall, overall_feedback)
}

fn score_answer(answer: &str) -> i32 {
    if answer.is_empty() {
        return 0;
    }
    let words = answer.split_whitespace().count() as i32;
    (4 + words / 20).min(10)
}

fn feedback_for(score: i32) -> &'static str {
    match score {
        0 => "No answer given.",
        1..=4 => "Too brief; expand with an example.",
        5..=7 => "Reasonable coverage; add specifics.",
        _ => "Detailed, well-developed answer.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_respects_count_and_bank() {
        let qs = sample_questions("Technical", QUESTIONS_PER_SESSION);
        assert_eq!(qs.len(), QUESTIONS_PER_SESSION);
        for q in &qs {
            assert!(TECHNICAL_BANK.contains(&q.question.as_str()));
            assert!(q.score.is_none());
        }
    }

    #[test]
    fn sampling_never_repeats_a_question() {
        let qs = sample_questions("HR", QUESTIONS_PER_SESSION);
        let mut seen: Vec<&str> = qs.iter().map(|q| q.question.as_str()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), qs.len());
    }

    #[test]
    fn empty_answer_scores_zero() {
        let questions = vec![Question {
            question: "Q?".into(),
            ..Default::default()
        }];
        let (graded, overall, _) = grade(questions, &[String::new()]);
        assert_eq!(graded[0].score, Some(0));
        assert_eq!(overall, 0);
        assert!(graded[0].user_answer.is_none());
    }

    #[test]
    fn longer_answers_score_higher() {
        let questions = vec![
            Question {
                question: "A?".into(),
                ..Default::default()
            },
            Question {
                question: "B?".into(),
                ..Default::default()
            },
        ];
        let short = "yes".to_string();
        let long = "a ".repeat(200).trim().to_string();
        let (graded, overall, _) = grade(questions, &[short, long]);
        assert!(graded[1].score.unwrap() > graded[0].score.unwrap());
        assert!((0..=100).contains(&overall));
    }
}
