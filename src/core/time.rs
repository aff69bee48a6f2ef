use crate::domain::model::{TimeRange, Timestamp};
use crate::utils::error::{ParkingError, Result};
use chrono::DateTime;
use regex::Regex;
use std::sync::OnceLock;

/// `YYYY-MM-DDTHH:MM:SS[.fff](Z|±HH:MM)`
const TIMESTAMP_PROFILE: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d{1,3})?(?:Z|[+-]\d{2}:\d{2})$";

fn profile() -> &'static Regex {
    static PROFILE: OnceLock<Regex> = OnceLock::new();
    PROFILE.get_or_init(|| Regex::new(TIMESTAMP_PROFILE).expect("timestamp profile regex is valid"))
}

pub struct TimeValidator;

impl TimeValidator {
    /// Parses a timestamp in the fixed profile. Anything else is rejected outright.
    pub fn parse(text: &str) -> Result<Timestamp> {
        if !profile().is_match(text) {
            tracing::debug!("Timestamp '{}' does not match the accepted profile", text);
            return Err(ParkingError::MalformedTimestamp {
                value: text.to_string(),
            });
        }

        // The profile check passed, so this only fails for out-of-range fields (month 13, ...).
        DateTime::parse_from_rfc3339(text).map_err(|e| {
            tracing::debug!("Timestamp '{}' rejected: {}", text, e);
            ParkingError::MalformedTimestamp {
                value: text.to_string(),
            }
        })
    }

    pub fn is_ordered(start: &str, end: &str) -> bool {
        match (Self::parse(start), Self::parse(end)) {
            (Ok(start), Ok(end)) => end > start,
            _ => false,
        }
    }

    pub fn range(start: &str, end: &str) -> Result<TimeRange> {
        let start_ts = Self::parse(start)?;
        let end_ts = Self::parse(end)?;
        TimeRange::new(start_ts, end_ts).ok_or_else(|| ParkingError::InvalidTimeRange {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// Range for a new reservation: ordered, and starting strictly after `now`.
    pub fn future_range(start: &str, end: &str, now: Timestamp) -> Result<TimeRange> {
        let range = Self::range(start, end)?;
        if range.start() <= now {
            return Err(ParkingError::PastStart {
                start: start.to_string(),
            });
        }
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};

    #[test]
    fn test_parse_accepts_profile() {
        let ts = TimeValidator::parse("2025-02-16T12:30:45Z").unwrap();
        assert_eq!(ts.hour(), 12);

        let ts = TimeValidator::parse("2025-02-16T12:30:45.123+01:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 3600);
        assert_eq!(ts.nanosecond(), 123_000_000);

        assert!(TimeValidator::parse("2025-02-16T12:30:45.5-05:30").is_ok());
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        for text in [
            "not a date",
            "2025/02/16 12:30:45",
            "2025-02-16T12:30:45",
            "2025-02-16 12:30:45Z",
            "2025-02-16T12:30:45.1234Z",
            "2025-02-16T12:30:45+0100",
            "2025-13-16T12:30:45Z",
            " 2025-02-16T12:30:45Z",
        ] {
            assert!(
                matches!(
                    TimeValidator::parse(text),
                    Err(ParkingError::MalformedTimestamp { .. })
                ),
                "expected '{}' to be rejected",
                text
            );
        }
    }

    #[test]
    fn test_is_ordered() {
        assert!(TimeValidator::is_ordered(
            "2025-02-16T12:30:45Z",
            "2025-02-16T13:30:45Z"
        ));
        assert!(!TimeValidator::is_ordered(
            "2025-02-16T14:30:45Z",
            "2025-02-16T13:30:45Z"
        ));
        assert!(!TimeValidator::is_ordered(
            "2025-02-16T13:30:45Z",
            "2025-02-16T13:30:45Z"
        ));
        assert!(!TimeValidator::is_ordered("garbage", "2025-02-16T13:30:45Z"));
    }

    #[test]
    fn test_is_ordered_compares_instants_across_offsets() {
        // 12:00+01:00 is 11:00Z, so 11:30Z is later.
        assert!(TimeValidator::is_ordered(
            "2025-02-16T12:00:00+01:00",
            "2025-02-16T11:30:00Z"
        ));
    }

    #[test]
    fn test_future_range_rejects_past_start() {
        let now = TimeValidator::parse("2025-02-16T12:00:00Z").unwrap();

        let err = TimeValidator::future_range("2025-02-16T11:00:00Z", "2025-02-16T13:00:00Z", now)
            .unwrap_err();
        assert!(matches!(err, ParkingError::PastStart { .. }));

        let err = TimeValidator::future_range("2025-02-16T12:00:00Z", "2025-02-16T13:00:00Z", now)
            .unwrap_err();
        assert!(matches!(err, ParkingError::PastStart { .. }));

        let range =
            TimeValidator::future_range("2025-02-16T12:00:01Z", "2025-02-16T13:00:00Z", now)
                .unwrap();
        assert_eq!(range.start(), now + Duration::seconds(1));
    }

    #[test]
    fn test_range_reports_inverted_range() {
        let err = TimeValidator::range("2025-02-16T14:00:00Z", "2025-02-16T13:00:00Z").unwrap_err();
        assert!(matches!(err, ParkingError::InvalidTimeRange { .. }));
    }
}
