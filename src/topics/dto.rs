use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::{ProgressWithTopic, TopicProgress};

pub const PROGRESS_STATUSES: &[&str] = &["Not Started", "In Progress", "Mastered"];

/// Completion state that earns the larger XP award.
pub const MASTERED: &str = "Mastered";

#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub difficulty: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProgressRequest {
    pub topic_id: Uuid,
    pub status: String,
    pub confidence_score: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: Uuid,
    pub topic: TopicSummary,
    pub status: String,
    pub confidence_score: i32,
    pub accuracy: f32,
    pub avg_time_per_problem: f32,
    pub reattempt_success: f32,
    pub pattern_mastery: f32,
    pub total_problems_solved: i32,
    pub last_practiced: Option<OffsetDateTime>,
    pub notes: Option<String>,
}

impl From<ProgressWithTopic> for ProgressEntry {
    fn from(row: ProgressWithTopic) -> Self {
        let TopicProgress {
            id,
            topic_id,
            status,
            confidence_score,
            accuracy,
            avg_time_per_problem,
            reattempt_success,
            pattern_mastery,
            total_problems_solved,
            last_practiced,
            notes,
            ..
        } = row.progress;
        Self {
            id,
            topic: TopicSummary {
                id: topic_id,
                name: row.topic_name,
                category: row.topic_category,
                subcategory: row.topic_subcategory,
                difficulty: row.topic_difficulty,
            },
            status,
            confidence_score,
            accuracy,
            avg_time_per_problem,
            reattempt_success,
            pattern_mastery,
            total_problems_solved,
            last_practiced,
            notes,
        }
    }
}
