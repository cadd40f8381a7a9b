#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{request::Parts, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use chrono::{Duration, Utc};
use daily_quiz_engine::{
    config::Config,
    error::DailyQuizError,
    services::{alert_service::AlertSink, identity_service::StaticTokenProvider},
    QuizServices,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
    pub authorization: Option<String>,
    pub cache_control: Option<String>,
}

pub type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// In-process stand-in for the quiz backend and CDN. Records every request in arrival order.
pub struct MockBackend {
    pub base_url: String,
    calls: CallLog,
}

impl MockBackend {
    pub async fn start<F>(build: F) -> Self
    where
        F: FnOnce(&str) -> Router,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
        let calls: CallLog = Arc::default();

        let app = build(&base_url).layer(middleware::from_fn_with_state(calls.clone(), record_calls));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend crashed");
        });

        Self { base_url, calls }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// `"METHOD /path"` for every request, in order.
    pub fn call_order(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    pub fn config(&self) -> Config {
        Config::new(&self.base_url)
    }
}

async fn record_calls(State(log): State<CallLog>, req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let Ok(bytes) = to_bytes(body, usize::MAX).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    log.lock().unwrap().push(RecordedCall {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        body: serde_json::from_slice(&bytes).ok(),
        authorization: header(&parts, "authorization"),
        cache_control: header(&parts, "cache-control"),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Handler that always answers with `status` and `body`.
pub fn respond(
    status: StatusCode,
    body: Value,
) -> impl Fn() -> std::future::Ready<(StatusCode, Json<Value>)> + Clone + Send + Sync + 'static {
    move || std::future::ready((status, Json(body.clone())))
}

#[derive(Default)]
pub struct RecordingAlerts {
    raised: Mutex<Vec<DailyQuizError>>,
}

impl RecordingAlerts {
    pub fn raised(&self) -> Vec<DailyQuizError> {
        self.raised.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, error: &DailyQuizError) {
        self.raised.lock().unwrap().push(error.clone());
    }
}

pub fn services(config: &Config, alerts: Arc<RecordingAlerts>) -> QuizServices {
    let identity = Arc::new(StaticTokenProvider::new(Some("test-token".into())));
    QuizServices::new(config, identity, alerts).expect("build services")
}

pub fn daily_body(base_url: &str) -> Value {
    json!({
        "localDate": "2026-10-19",
        "tz": "Europe/Berlin",
        "window": {"start": "2026-10-19T08:00:00Z", "end": "2026-10-19T20:00:00Z"},
        "dropAtLocal": "2026-10-19T10:00:00+02:00",
        "joinWindowEndsAtLocal": "2026-10-19T22:00:00+02:00",
        "templateUrl": format!("{}/cdn/quiz.json", base_url),
        "templateVersion": "v2"
    })
}

pub fn next_drop_body() -> Value {
    json!({
        "nextDropTime": "2026-10-20T08:00:00Z",
        "nextDropTimeLocal": "2026-10-20T10:00:00+02:00",
        "localDate": "2026-10-20",
        "tz": "Europe/Berlin",
        "isToday": false,
        "timeUntilDrop": 72000
    })
}

pub fn template_body() -> Value {
    json!({
        "id": "quiz-2026-10-19",
        "version": 2,
        "questions": [
            {
                "id": "q1",
                "type": "album-year-guess",
                "difficulty": "easy",
                "themes": ["albums"],
                "prompt": {"text": "When was Fearless released?"},
                "choices": ["2006", "2008", "2010"],
                "correct": {"choiceIndex": 1}
            },
            {
                "id": "q2",
                "type": "tracklist-order",
                "difficulty": "hard",
                "prompt": {"tracks": ["Welcome to New York", "Blank Space", "Style"]},
                "correct": {"orderedTracks": ["Welcome to New York", "Blank Space", "Style"]}
            }
        ]
    })
}

pub fn start_body(deadline_in_secs: i64) -> Value {
    let now = Utc::now();
    json!({
        "attemptId": "att-1",
        "serverStartAt": now - Duration::seconds(5),
        "deadline": now + Duration::seconds(deadline_in_secs),
        "seed": 4242,
        "templateUrl": "https://cdn.example.com/quiz.json"
    })
}

pub fn finish_body() -> Value {
    json!({
        "score": 870,
        "breakdown": {"base": 500, "accuracyBonus": 120, "speedBonus": 150, "earlyBonus": 100},
        "perQuestion": [
            {"questionId": "q1", "isCorrect": true, "timeSpentMs": 3200, "accuracyPoints": 60},
            {"questionId": "q2", "isCorrect": true, "timeSpentMs": 9100, "accuracyPoints": 60}
        ]
    })
}
