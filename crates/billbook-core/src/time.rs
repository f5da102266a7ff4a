//! Timestamp handling.
//!
//! Three representations are involved:
//! - the canonical wire format sent to the backend (RFC 3339, UTC, milliseconds, `Z`),
//! - the form input format (`YYYY-MM-DDTHH:MM` in the local offset),
//! - the display format used in rendered rows (`dd/mm/yyyy, HH:MM:SS`).

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{Error, Result};

/// Form input format, matching an HTML `datetime-local` value.
pub const FORM_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

const LOCAL_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Source of "now" and of the local UTC offset used for input and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    offset: FixedOffset,
    frozen_at: Option<DateTime<Utc>>,
}

impl Clock {
    /// System clock in the machine's current local offset.
    pub fn system() -> Self {
        Self::with_offset(*Local::now().offset())
    }

    /// System clock with an explicit local offset.
    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset,
            frozen_at: None,
        }
    }

    /// Clock that always reports `at` (primarily for tests).
    pub const fn frozen(at: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            offset,
            frozen_at: Some(at),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.frozen_at.unwrap_or_else(Utc::now)
    }

    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// "Now" rendered as a form input value.
    pub fn now_input_value(&self) -> String {
        to_input_value(self.now(), self.offset)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

/// Render an instant in the canonical wire format.
pub fn canonical(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render an instant as a form input value in the given offset.
pub fn to_input_value(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format(FORM_INPUT_FORMAT)
        .to_string()
}

/// Convert a raw form value to the canonical format.
///
/// An empty value means "now". Local values without an offset are read in the
/// clock's offset.
pub fn canonicalize_input(raw: &str, clock: &Clock) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(canonical(clock.now()));
    }

    parse_input(raw, clock.offset()).map(canonical).ok_or_else(|| {
        Error::InvalidInput(format!(
            "unrecognized timestamp '{raw}' (expected YYYY-MM-DDTHH:MM or RFC 3339)"
        ))
    })
}

/// Parse a form value, either RFC 3339 or a local date-time in `offset`.
pub fn parse_input(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .map(|local| local.with_timezone(&Utc))
}

/// Parse a timestamp received from the backend.
///
/// Empty values and the Go zero time (`0001-01-01T00:00:00Z`) mean "not set".
pub fn parse_record_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .filter(|parsed| parsed.year() > 1)
}

/// Render an optional record timestamp for display, `-` when absent.
pub fn display(timestamp: Option<&DateTime<FixedOffset>>, offset: FixedOffset) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |value| value.with_timezone(&offset).format(DISPLAY_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn instant(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn canonical_uses_milliseconds_and_z_suffix() {
        assert_eq!(
            canonical(instant("2024-03-05T14:30:00Z")),
            "2024-03-05T14:30:00.000Z"
        );
    }

    #[test]
    fn canonicalize_input_reads_local_value_in_clock_offset() {
        let clock = Clock::frozen(instant("2024-03-05T12:00:00Z"), brt());
        assert_eq!(
            canonicalize_input("2024-03-05T09:15", &clock).unwrap(),
            "2024-03-05T12:15:00.000Z"
        );
    }

    #[test]
    fn canonicalize_input_accepts_rfc3339() {
        let clock = Clock::frozen(instant("2024-03-05T12:00:00Z"), brt());
        assert_eq!(
            canonicalize_input("2024-01-01T10:00:00+01:00", &clock).unwrap(),
            "2024-01-01T09:00:00.000Z"
        );
    }

    #[test]
    fn canonicalize_input_defaults_to_now() {
        let clock = Clock::frozen(instant("2024-03-05T12:00:00Z"), utc());
        assert_eq!(
            canonicalize_input("   ", &clock).unwrap(),
            "2024-03-05T12:00:00.000Z"
        );
    }

    #[test]
    fn canonicalize_input_rejects_garbage() {
        let clock = Clock::frozen(instant("2024-03-05T12:00:00Z"), utc());
        let error = canonicalize_input("yesterday", &clock).unwrap_err();
        assert!(error.to_string().contains("yesterday"));
    }

    #[test]
    fn input_value_round_trips_through_offset() {
        let clock = Clock::frozen(instant("2024-03-05T12:34:56Z"), brt());
        assert_eq!(clock.now_input_value(), "2024-03-05T09:34");
    }

    #[test]
    fn record_timestamp_treats_go_zero_time_as_unset() {
        assert!(parse_record_timestamp("0001-01-01T00:00:00Z").is_none());
        assert!(parse_record_timestamp("").is_none());
        assert!(parse_record_timestamp("not a date").is_none());
        assert!(parse_record_timestamp("2024-03-05T14:30:00.123Z").is_some());
    }

    #[test]
    fn display_uses_day_first_layout() {
        let parsed = parse_record_timestamp("2024-03-05T14:30:09Z").unwrap();
        assert_eq!(display(Some(&parsed), brt()), "05/03/2024, 11:30:09");
        assert_eq!(display(None, brt()), "-");
    }
}
