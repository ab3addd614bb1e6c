//! Display formatting for server timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

fn parse(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `Mar 1, 2025`. Unparseable input is shown as-is.
pub fn display_date(raw: &str) -> String {
    match parse(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// `Mar 1, 2025 14:05`, for comment timestamps.
pub fn display_datetime(raw: &str) -> String {
    match parse(raw) {
        Some(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// `YYYY-MM-DD` for a date input.
pub fn date_input_value(raw: &str) -> String {
    match parse(raw) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => raw.chars().take(10).collect(),
    }
}

/// Optional timestamp, or a dash.
pub fn display_optional_date(raw: Option<&str>) -> String {
    raw.filter(|s| !s.is_empty()).map(display_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2025-03-01T10:20:30Z"), "Mar 1, 2025");
        assert_eq!(display_date("2025-03-01"), "Mar 1, 2025");
        assert_eq!(display_date("2025-12-24T08:00:00.123456"), "Dec 24, 2025");
        assert_eq!(display_date("soon"), "soon");
    }

    #[test]
    fn test_display_datetime() {
        assert_eq!(display_datetime("2025-03-01T14:05:00Z"), "Mar 1, 2025 14:05");
    }

    #[test]
    fn test_date_input_value() {
        assert_eq!(date_input_value("2025-03-01T23:59:00+00:00"), "2025-03-01");
        assert_eq!(date_input_value("2025-03-01"), "2025-03-01");
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(display_optional_date(None), "-");
        assert_eq!(display_optional_date(Some("")), "-");
        assert_eq!(display_optional_date(Some("2025-01-02")), "Jan 2, 2025");
    }
}
