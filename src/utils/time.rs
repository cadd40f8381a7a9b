use chrono::{DateTime, Local, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Calendar date of the device's local clock, `YYYY-MM-DD`.
pub fn local_date(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub fn today_local_date() -> String {
    local_date(Local::now())
}

/// Whole seconds left until `deadline`, rounded up and never negative.
pub fn time_remaining_at(deadline: DateTime<Utc>, at: DateTime<Utc>) -> u64 {
    let millis = (deadline - at).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    ((millis + 999) / 1000) as u64
}

pub fn time_remaining(deadline: DateTime<Utc>) -> u64 {
    time_remaining_at(deadline, now())
}

pub fn is_time_up(deadline: DateTime<Utc>) -> bool {
    time_remaining(deadline) == 0
}

/// `MM:SS`; minutes are not wrapped into hours.
pub fn format_time_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
