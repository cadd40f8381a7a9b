use crate::utils::flexible::deserialize_opt_string_flexible;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `GET /daily`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuiz {
    pub local_date: String,
    pub tz: String,
    pub window: QuizWindow,
    pub drop_at_local: String,
    pub join_window_ends_at_local: String,
    pub template_url: String,
    #[serde(default, deserialize_with = "deserialize_opt_string_flexible")]
    pub template_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Response of `GET /daily/next`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextDrop {
    pub next_drop_time: DateTime<Utc>,
    pub next_drop_time_local: String,
    pub local_date: String,
    pub tz: String,
    pub is_today: bool,
    /// Seconds until the drop, as computed by the server.
    pub time_until_drop: i64,
}

impl NextDrop {
    /// `HH:MM:SS` countdown to the drop.
    pub fn countdown(&self) -> String {
        let total = self.time_until_drop.max(0);
        format!(
            "{:02}:{:02}:{:02}",
            total / 3600,
            (total % 3600) / 60,
            total % 60
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanStartResult {
    pub can_start: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// ISO-8601 time of the next drop, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available_time: Option<String>,
}

impl CanStartResult {
    pub fn allowed() -> Self {
        Self {
            can_start: true,
            reason: None,
            next_available_time: None,
        }
    }

    pub fn blocked(reason: impl Into<String>, next_available_time: Option<String>) -> Self {
        Self {
            can_start: false,
            reason: Some(reason.into()),
            next_available_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn daily_payload_parses() {
        let daily: DailyQuiz = serde_json::from_value(json!({
            "localDate": "2026-10-19",
            "tz": "Europe/Berlin",
            "window": {"start": "2026-10-19T08:00:00Z", "end": "2026-10-19T20:00:00Z"},
            "dropAtLocal": "2026-10-19T10:00:00+02:00",
            "joinWindowEndsAtLocal": "2026-10-19T22:00:00+02:00",
            "templateUrl": "https://cdn.example.com/quiz/2026-10-19.json",
            "templateVersion": 3
        }))
        .unwrap();
        assert_eq!(daily.template_version.as_deref(), Some("3"));
        assert_eq!((daily.window.end - daily.window.start).num_hours(), 12);
    }

    #[test]
    fn countdown_formats_hours() {
        let next: NextDrop = serde_json::from_value(json!({
            "nextDropTime": "2026-10-20T08:00:00Z",
            "nextDropTimeLocal": "2026-10-20T10:00:00+02:00",
            "localDate": "2026-10-20",
            "tz": "Europe/Berlin",
            "isToday": false,
            "timeUntilDrop": 3725
        }))
        .unwrap();
        assert_eq!(next.countdown(), "01:02:05");
    }
}
