use chrono::{DateTime, Utc};

/// `{attemptId}-{questionId}-{epochMillis}`.
///
/// The timestamp makes every call unique, retries included. Dedup therefore
/// happens on the server per question (latest answer wins), not per request.
pub fn idempotency_key(attempt_id: &str, question_id: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}-{}", attempt_id, question_id, at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn key_embeds_ids_and_millis() {
        let at = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(idempotency_key("att", "q7", at), "att-q7-1760000000123");
        assert_ne!(
            idempotency_key("att", "q7", at),
            idempotency_key("att", "q7", at + Duration::milliseconds(1))
        );
    }
}
