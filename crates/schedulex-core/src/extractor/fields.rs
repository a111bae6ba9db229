//! Extract-or-default helpers for task fields.
//!
//! Every helper is total: a missing or unreadable value turns into the
//! field's documented default instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a date field. Unparseable text is treated as absent.
pub fn date(text: Option<&str>) -> Option<DateTime<Utc>> {
    let text = text?.trim();
    let parsed = parse_date_text(text);
    if parsed.is_none() {
        warn!(value = text, "unreadable date, treating as absent");
    }
    parsed
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Percent complete clamped to 0..=100; unreadable values count as 0.
pub fn percent_complete(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };
    match text.trim().trim_end_matches('%').trim().parse::<f64>() {
        Ok(pct) if pct.is_finite() => pct.clamp(0.0, 100.0),
        _ => {
            warn!(value = text, "unreadable percent complete, treating as 0");
            0.0
        }
    }
}

/// Coerce a flag field (`1`, `true`, `yes`) to a boolean.
pub fn flag(text: Option<&str>) -> bool {
    text.map(|t| {
        matches!(
            t.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "y"
        )
    })
    .unwrap_or(false)
}

pub fn priority(text: Option<&str>) -> Option<i64> {
    text?.trim().parse().ok()
}

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?P(?:\d+(?:[.,]\d+)?[YMWD])*(?:T(?:\d+(?:[.,]\d+)?[HMS])+)?$")
            .expect("duration pattern is valid")
    })
}

/// True when an ISO 8601 duration token has only zero components,
/// e.g. `PT0H0M0S` or `P0D`.
pub fn is_zero_duration(text: Option<&str>) -> bool {
    let Some(text) = text.map(str::trim) else {
        return false;
    };
    if text == "0" {
        return true;
    }
    if !duration_regex().is_match(text) {
        return false;
    }

    let numbers: Vec<f64> = text
        .split(|c: char| c.is_ascii_alphabetic() || c == '-')
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.replace(',', ".").parse::<f64>().ok())
        .collect();
    !numbers.is_empty() && numbers.iter().all(|n| *n == 0.0)
}

/// Constraint type marks "as soon as possible" scheduling. The interchange
/// format encodes it as `0`; exports that spell it out are accepted too.
pub fn is_as_soon_as_possible(text: Option<&str>) -> bool {
    let Some(text) = text else {
        return false;
    };
    let normalized: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    normalized == "0" || normalized == "asap" || normalized.contains("assoonaspossible")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        assert_eq!(date(Some("2025-01-01T08:00:00")), Some(expected));
        assert_eq!(date(Some("2025-01-01 08:00:00")), Some(expected));
        assert_eq!(date(Some("2025-01-01T09:00:00+01:00")), Some(expected));
        assert_eq!(
            date(Some("2025-01-01")),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unreadable_date_is_absent() {
        assert_eq!(date(Some("next tuesday")), None);
        assert_eq!(date(Some("2025-13-45")), None);
        assert_eq!(date(None), None);
    }

    #[test]
    fn test_percent_complete_defaults_and_clamps() {
        assert_eq!(percent_complete(None), 0.0);
        assert_eq!(percent_complete(Some("abc")), 0.0);
        assert_eq!(percent_complete(Some("45")), 45.0);
        assert_eq!(percent_complete(Some("62.5%")), 62.5);
        assert_eq!(percent_complete(Some("130")), 100.0);
        assert_eq!(percent_complete(Some("-4")), 0.0);
    }

    #[test]
    fn test_flag_coercion() {
        assert!(flag(Some("1")));
        assert!(flag(Some("TRUE")));
        assert!(!flag(Some("0")));
        assert!(!flag(Some("false")));
        assert!(!flag(None));
    }

    #[test]
    fn test_zero_duration_tokens() {
        assert!(is_zero_duration(Some("PT0H0M0S")));
        assert!(is_zero_duration(Some("PT0H0M0.0S")));
        assert!(is_zero_duration(Some("P0D")));
        assert!(is_zero_duration(Some("0")));
        assert!(!is_zero_duration(Some("PT8H0M0S")));
        assert!(!is_zero_duration(Some("P")));
        assert!(!is_zero_duration(Some("zero")));
        assert!(!is_zero_duration(None));
    }

    #[test]
    fn test_as_soon_as_possible_markers() {
        assert!(is_as_soon_as_possible(Some("0")));
        assert!(is_as_soon_as_possible(Some("As Soon As Possible")));
        assert!(is_as_soon_as_possible(Some("as-soon-as-possible")));
        assert!(is_as_soon_as_possible(Some("ASAP")));
        assert!(!is_as_soon_as_possible(Some("4")));
        assert!(!is_as_soon_as_possible(None));
    }

    #[test]
    fn test_priority() {
        assert_eq!(priority(Some("1000")), Some(1000));
        assert_eq!(priority(Some("high")), None);
    }
}
