//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Parse an API timestamp.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00Z`, with offset), naive local
/// date-times (`2024-01-15T10:30:00.123`, read in `tz`) and bare dates
/// (`2024-01-15`, read as UTC midnight).
pub fn parse_timestamp(s: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(tz))
}

/// Format date in full format (like "January 5, 2024")
pub fn full_date<T: TimeZone>(date: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Long-form calendar date of an API timestamp.
///
/// Never fails: a missing timestamp renders empty and an unparseable one
/// renders `Invalid Date`.
pub fn format_absolute_date(timestamp: Option<&str>, tz: &Tz) -> String {
    match timestamp.map(str::trim).filter(|s| !s.is_empty()) {
        None => String::new(),
        Some(s) => match parse_timestamp(s, tz) {
            Some(date) => full_date(&date),
            None => "Invalid Date".to_string(),
        },
    }
}

/// Whole days between two instants, rounded up, direction ignored
pub fn elapsed_days<A: TimeZone, B: TimeZone>(date: &DateTime<A>, now: &DateTime<B>) -> i64 {
    let ms = now
        .with_timezone(&Utc)
        .signed_duration_since(date.with_timezone(&Utc))
        .num_milliseconds()
        .abs();
    (ms + DAY_MS - 1) / DAY_MS
}

/// Bucket a day count: `1 day ago`, `n days ago` (< 7),
/// `n weeks ago` (< 30), otherwise `n months ago`
pub fn relative_age_from_days(days: i64) -> String {
    if days == 1 {
        "1 day ago".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", div_ceil(days, 7))
    } else {
        format!("{} months ago", div_ceil(days, 30))
    }
}

/// Relative age of a parsed date against a caller-supplied `now`
pub fn relative_age<A: TimeZone, B: TimeZone>(date: &DateTime<A>, now: &DateTime<B>) -> String {
    relative_age_from_days(elapsed_days(date, now))
}

/// Relative age of an API timestamp; empty when missing or unparseable
pub fn format_relative_age(timestamp: Option<&str>, now: &DateTime<Utc>, tz: &Tz) -> String {
    timestamp
        .and_then(|s| parse_timestamp(s, tz))
        .map(|date| relative_age(&date, now))
        .unwrap_or_default()
}

fn div_ceil(n: i64, d: i64) -> i64 {
    (n + d - 1) / d
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        (now() - d).to_rfc3339()
    }

    #[test]
    fn test_full_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(full_date(&date), "January 5, 2024");
    }

    #[test]
    fn test_format_absolute_date() {
        let tz = chrono_tz::UTC;
        assert_eq!(
            format_absolute_date(Some("2024-01-15T10:30:00"), &tz),
            "January 15, 2024"
        );
        assert_eq!(
            format_absolute_date(Some("2024-01-15T10:30:00.123456"), &tz),
            "January 15, 2024"
        );
        assert_eq!(format_absolute_date(None, &tz), "");
        assert_eq!(format_absolute_date(Some("  "), &tz), "");
        assert_eq!(format_absolute_date(Some("yesterday"), &tz), "Invalid Date");
    }

    #[test]
    fn test_absolute_date_follows_timezone() {
        let tz: Tz = "America/New_York".parse().unwrap();
        // 02:00 UTC is still the previous evening in New York
        assert_eq!(
            format_absolute_date(Some("2024-01-15T02:00:00Z"), &tz),
            "January 14, 2024"
        );
    }

    #[test]
    fn test_parse_bare_date() {
        let tz = chrono_tz::UTC;
        let parsed = parse_timestamp("2024-02-29", &tz).unwrap();
        assert_eq!(full_date(&parsed), "February 29, 2024");
        assert!(parse_timestamp("2023-02-30", &tz).is_none());
    }

    #[test]
    fn test_relative_exactly_one_day() {
        let tz = chrono_tz::UTC;
        let ts = ago(Duration::hours(24));
        assert_eq!(format_relative_age(Some(&ts), &now(), &tz), "1 day ago");
    }

    #[test]
    fn test_relative_partial_day_rounds_up() {
        let tz = chrono_tz::UTC;
        let ts = ago(Duration::hours(25));
        assert_eq!(format_relative_age(Some(&ts), &now(), &tz), "2 days ago");
        let ts = ago(Duration::hours(3));
        assert_eq!(format_relative_age(Some(&ts), &now(), &tz), "1 day ago");
    }

    #[test]
    fn test_relative_boundaries() {
        assert_eq!(relative_age_from_days(0), "0 days ago");
        assert_eq!(relative_age_from_days(6), "6 days ago");
        assert_eq!(relative_age_from_days(7), "1 weeks ago");
        assert_eq!(relative_age_from_days(8), "2 weeks ago");
        assert_eq!(relative_age_from_days(29), "5 weeks ago");
        assert_eq!(relative_age_from_days(30), "1 months ago");
        assert_eq!(relative_age_from_days(31), "2 months ago");
    }

    #[test]
    fn test_relative_exact_week() {
        let tz = chrono_tz::UTC;
        let ts = ago(Duration::days(7));
        assert_eq!(format_relative_age(Some(&ts), &now(), &tz), "1 weeks ago");
    }

    #[test]
    fn test_relative_future_is_absolute() {
        let date = now() + Duration::days(3);
        assert_eq!(relative_age(&date, &now()), "3 days ago");
    }

    #[test]
    fn test_relative_missing() {
        let tz = chrono_tz::UTC;
        assert_eq!(format_relative_age(None, &now(), &tz), "");
        assert_eq!(format_relative_age(Some("garbage"), &now(), &tz), "");
    }
}
