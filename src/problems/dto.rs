use serde::Deserialize;

use super::repo::Attempt;

pub const DIFFICULTIES: &[&str] = &["Easy", "Medium", "Hard"];
pub const PLATFORMS: &[&str] = &["LeetCode", "GFG", "CodeStudio", "HackerRank", "Other"];
pub const STATUSES: &[&str] = &["Solved", "Attempted", "Pending", "Revise"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    pub title: String,
    pub link: Option<String>,
    #[serde(default = "default_platform")]
    pub platform: String,
    pub difficulty: String,
    pub topic: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub time_taken: Option<i32>,
    #[serde(default)]
    pub is_optimal: bool,
    pub pattern_used: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
}

fn default_platform() -> String {
    "LeetCode".into()
}

fn default_status() -> String {
    "Solved".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_payload_gets_defaults() {
        let raw = r#"{"title": "Two Sum", "difficulty": "Easy"}"#;
        let parsed: CreateProblemRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.platform, "LeetCode");
        assert_eq!(parsed.status, "Solved");
        assert!(parsed.attempts.is_empty());
        assert!(!parsed.is_optimal);
    }
}
