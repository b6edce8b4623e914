use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description, Date};

pub const MOODS: &[&str] = &["happy", "neutral", "sad", "stressed", "excited"];

/// Calendar dates travel as "YYYY-MM-DD" strings on the wire.
pub static DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(pub day_fmt, Date, "[year]-[month]-[day]");

pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s, DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    pub name: String,
    pub category: Option<String>,
    pub duration: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    pub problems_solved: i32,
    pub topics_covered: i32,
    pub commits: i32,
    pub completed_rounds: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDayLogRequest {
    pub date: Option<String>,
    pub mood: Option<String>,
    pub activities: Option<Vec<Activity>>,
    pub notes: Option<String>,
    pub metrics: Option<Metrics>,
}

/// totalTime is never taken from the client; it is always the sum of the
/// activity durations that end up stored.
pub fn total_minutes(activities: &[Activity]) -> i32 {
    activities.iter().map(|a| a.duration.unwrap_or(0)).sum()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLogResponse {
    #[serde(with = "day_fmt")]
    pub date: Date,
    pub mood: String,
    pub notes: Option<String>,
    pub activities: Vec<Activity>,
    pub metrics: Metrics,
    pub total_time: i32,
    pub is_new: bool,
}

impl DayLogResponse {
    /// Default shape returned when no log exists for the requested date.
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            mood: "neutral".into(),
            notes: None,
            activities: Vec::new(),
            metrics: Metrics::default(),
            total_time: 0,
            is_new: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_durations_and_defaults_missing_to_zero() {
        let activities = vec![
            Activity {
                name: "DSA practice".into(),
                category: Some("DSA".into()),
                duration: Some(90),
            },
            Activity {
                name: "Aptitude".into(),
                category: None,
                duration: None,
            },
            Activity {
                name: "Project work".into(),
                category: Some("Projects".into()),
                duration: Some(45),
            },
        ];
        assert_eq!(total_minutes(&activities), 135);
    }

    #[test]
    fn total_of_empty_list_is_zero() {
        assert_eq!(total_minutes(&[]), 0);
    }

    #[test]
    fn date_parsing() {
        assert!(parse_date("2025-01-31").is_some());
        assert!(parse_date("31/01/2025").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn metrics_defaults_are_empty() {
        let m: Metrics = serde_json::from_str("{}").unwrap();
        assert_eq!(m.problems_solved, 0);
        assert!(m.completed_rounds.is_empty());
    }
}
