use chrono::{DateTime, FixedOffset, Utc};

/// Profile pages stamp items with `yyyy-MM-dd'T'HH:mm:ssZ`.
const PAGE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parse a page timestamp, accepting RFC 3339 and the compact offset form.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::<FixedOffset>::parse_from_str(raw, PAGE_TIME_FORMAT))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Numeric view of a timestamp: epoch seconds as written, or derived from a
/// parseable date. Anything else counts as 0.
pub fn numeric_time(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() {
            return value;
        }
    }

    parse_timestamp(trimmed)
        .map(|dt| dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_millis()) / 1000.0)
        .unwrap_or(0.0)
}

/// Render the age of `raw` relative to `now` using a single abbreviated unit.
pub fn format_time_ago(raw: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(raw) else {
        return "Invalid Date".to_string();
    };

    let secs = (now - then).num_seconds().max(0);
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    match secs {
        s if s < MINUTE => format!("{}s", s),
        s if s < HOUR => format!("{}m", s / MINUTE),
        s if s < DAY => format!("{}h", s / HOUR),
        s if s < MONTH => format!("{}d", s / DAY),
        s if s < YEAR => format!("{}mo", s / MONTH),
        s => format!("{}y", s / YEAR),
    }
}
