//! Fixed-width ISO-8601 literals for Date, Time and Timestamp values (UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use omsconnect_core::{SchemaRef, logical};

use super::lex::is_delimiter;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.3fZ";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const DATE_LEN: usize = 10;
const TIME_LEN: usize = 13;
const TIMESTAMP_LEN: usize = 24;

/// Read `text` as a temporal literal, choosing the pattern by length.
pub(crate) fn parse_exact(text: &str) -> Option<(SchemaRef, DateTime<Utc>)> {
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    match text.len() {
        DATE_LEN => {
            let date = NaiveDate::parse_from_str(text, DATE_FORMAT).ok()?;
            Some((logical::date::schema(), date.and_hms_opt(0, 0, 0)?.and_utc()))
        }
        TIME_LEN => {
            let time = NaiveTime::parse_from_str(text, TIME_FORMAT).ok()?;
            let millis = time.num_seconds_from_midnight() as i64 * 1000
                + (time.nanosecond() / 1_000_000) as i64;
            let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
            Some((logical::time::schema(), instant))
        }
        TIMESTAMP_LEN => {
            let stamp = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()?;
            Some((logical::timestamp::schema(), stamp.and_utc()))
        }
        _ => None,
    }
}

/// Look for a temporal literal at the start of `src`.
///
/// A literal only counts when it is followed by the end of input, whitespace
/// or a delimiter. Returns the literal's byte length with the parsed value.
pub(crate) fn probe(src: &str) -> Option<(usize, SchemaRef, DateTime<Utc>)> {
    for len in [TIMESTAMP_LEN, TIME_LEN, DATE_LEN] {
        let Some(candidate) = src.get(..len) else {
            continue;
        };
        let bounded = src[len..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || is_delimiter(c));
        if !bounded {
            continue;
        }
        if let Some((schema, instant)) = parse_exact(candidate) {
            return Some((len, schema, instant));
        }
    }
    None
}

/// Format an instant with the pattern implied by its value: time-only within
/// the first epoch day, date-only on an exact day boundary, else a full
/// timestamp.
pub(crate) fn format(instant: &DateTime<Utc>) -> String {
    let millis = instant.timestamp_millis();
    let pattern = if (0..logical::MILLIS_PER_DAY).contains(&millis) {
        TIME_FORMAT
    } else if millis % logical::MILLIS_PER_DAY == 0 {
        DATE_FORMAT
    } else {
        TIMESTAMP_FORMAT
    };
    instant.format(pattern).to_string()
}
