use chrono::Utc;

const MINUTE_MS: i64 = 60_000;

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Human label for how long ago `timestamp_ms` was, relative to `now_ms`.
/// Timestamps in the future read as "just now".
pub fn time_ago(timestamp_ms: i64, now_ms: i64) -> String {
    let minutes = now_ms.saturating_sub(timestamp_ms).div_euclid(MINUTE_MS);
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(hours / 24, "day")
}

fn plural(value: i64, unit: &str) -> String {
    if value == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{value} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::time_ago;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn under_a_minute_is_just_now() {
        assert_eq!(time_ago(NOW, NOW), "just now");
        assert_eq!(time_ago(NOW - 59_999, NOW), "just now");
    }

    #[test]
    fn future_timestamp_is_just_now() {
        assert_eq!(time_ago(NOW + 5 * 60_000, NOW), "just now");
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        assert_eq!(
            time_ago(i64::MIN, NOW),
            format!("{} days ago", i64::MAX / 60_000 / 60 / 24)
        );
        assert_eq!(time_ago(i64::MAX, NOW), "just now");
        assert_eq!(time_ago(i64::MAX, i64::MIN), "just now");
    }

    #[test]
    fn minutes() {
        assert_eq!(time_ago(NOW - 60_000, NOW), "1 minute ago");
        assert_eq!(time_ago(NOW - 59 * 60_000, NOW), "59 minutes ago");
    }

    #[test]
    fn hours_and_days() {
        assert_eq!(time_ago(NOW - 60 * 60_000, NOW), "1 hour ago");
        assert_eq!(time_ago(NOW - 23 * 60 * 60_000, NOW), "23 hours ago");
        assert_eq!(time_ago(NOW - 24 * 60 * 60_000, NOW), "1 day ago");
        assert_eq!(time_ago(NOW - 10 * 24 * 60 * 60_000, NOW), "10 days ago");
    }
}
