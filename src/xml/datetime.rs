//! Multi-format date parsing (§4.3, §8 invariant 5).
//!
//! The registry emits timestamps in four different shapes depending on
//! which response field it appears in, plus the all-zero sentinel for
//! "never happened" fields. `parse` tries each in the fixed order the
//! upstream `parseDate` does, so the same ambiguous-looking string is
//! resolved identically to the source.
//!
//! The renewal format is a direct translation of the Go layout string
//! `"2006-01-03T15:04:05.0Z"`, where `"03"` is Go's reference-time token
//! for the 12-hour-clock hour (1-12) rather than the day of month. Used in
//! the day position, it only matches renewal timestamps whose day happens
//! to fall in 1-12 — a latent upstream bug, preserved here via `chrono`'s
//! equivalent `%I` token rather than corrected to `%d`, so behaviour stays
//! identical to the recorded transcripts this client was built against.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{Error, Result};

const EMPTY_SENTINEL: &str = "0001-01-01T00:00:00";

/// `YYYY-MM-DDTHH:MM:SS.mmm`, used by domain/host create/info timestamps.
const DOMAIN_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// `YYYY-MM-DDTHH:MM:SS`, used by poll-queue timestamps.
const POLL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The renewal format as literally specified by the source. The upstream
/// Go layout string is `"2006-01-03T15:04:05.0Z"`; in Go's reference-time
/// scheme `"03"` is not a literal but the zero-padded 12-hour-clock hour
/// token, accidentally reused in the day position. `%I` is `chrono`'s
/// equivalent 12-hour (01-12) token, so this only matches inputs whose day
/// component happens to fall in 1-12 — exactly the upstream bug, preserved
/// rather than corrected to `%d`.
const RENEWAL_FORMAT: &str = "%Y-%m-%IT%H:%M:%S.0Z";

/// Parses `raw` by trying, in order: the zero-time sentinel, RFC 3339 (with
/// or without fractional seconds), the domain/host millisecond format, the
/// poll-queue second format, then the renewal format. Any other string is
/// an [`Error::DecodeDate`].
pub fn parse(raw: &str) -> Result<DateTime<Utc>> {
    if raw == EMPTY_SENTINEL {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(
            NaiveDateTime::default(),
            Utc,
        ));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, DOMAIN_FORMAT) {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, POLL_FORMAT) {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, RENEWAL_FORMAT) {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    Err(Error::DecodeDate(raw.to_string()))
}

/// A timestamp as the wire carries it: the raw string the server sent,
/// plus the result of parsing it. Response structures throughout
/// `model::*` embed this rather than a bare `DateTime` so a caller that
/// only wants to log or re-display the value doesn't need to reformat it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub raw: String,
    pub value: DateTime<Utc>,
}

impl Timestamp {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Timestamp {
            raw: raw.to_string(),
            value: parse(raw)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn sentinel_maps_to_zero_time_and_never_fails() {
        let parsed = parse(EMPTY_SENTINEL).unwrap();
        assert_eq!(parsed.year(), 1);
        assert_eq!(parsed.month(), 1);
        assert_eq!(parsed.day(), 1);
    }

    #[test]
    fn parses_domain_millisecond_format() {
        let parsed = parse("2022-08-01T16:27:27.743").unwrap();
        assert_eq!(parsed.year(), 2022);
        assert_eq!(parsed.month(), 8);
    }

    #[test]
    fn parses_poll_second_format() {
        let parsed = parse("2020-06-07T02:05:52").unwrap();
        assert_eq!(parsed.year(), 2020);
    }

    #[test]
    fn parses_rfc3339_with_nanoseconds() {
        let parsed = parse("2020-06-07T02:05:52.267123456Z").unwrap();
        assert_eq!(parsed.year(), 2020);
    }

    #[test]
    fn parses_renewal_quirk_format() {
        let parsed = parse("1999-04-03T22:00:00.0Z").unwrap();
        assert_eq!(parsed.year(), 1999);
        assert_eq!(parsed.month(), 4);
        assert_eq!(parsed.day(), 3);
    }

    #[test]
    fn renewal_quirk_format_accepts_day_within_twelve_hour_range() {
        // day-of-month 08 still parses because the upstream layout reads it
        // as a 12-hour-clock hour token (1-12), not a day token (1-31).
        let parsed = parse("2000-04-08T09:00:00.0Z").unwrap();
        assert_eq!(parsed.day(), 8);
    }

    #[test]
    fn rejects_unrecognised_format() {
        assert!(parse("not-a-date").is_err());
        assert!(matches!(parse("not-a-date"), Err(Error::DecodeDate(_))));
    }
}
