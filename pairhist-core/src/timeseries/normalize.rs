use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

use pairhist_types::{DayBoundary, RawTimestamp};

/// Magnitude above which a bare epoch number is read as milliseconds.
///
/// `10^11` seconds is the year 5138; `10^11` milliseconds is March 1973.
const MILLIS_CUTOFF: i64 = 100_000_000_000;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Classify a bare epoch number as seconds or milliseconds by magnitude.
///
/// Connectors that know their unit should build the `RawTimestamp` variant
/// directly; this is for providers whose unit is not documented.
#[must_use]
pub const fn infer_epoch(n: i64) -> RawTimestamp {
    if n.abs() >= MILLIS_CUTOFF {
        RawTimestamp::Millis(n)
    } else {
        RawTimestamp::Seconds(n)
    }
}

/// Convert a provider timestamp to a UTC instant.
///
/// ISO text accepts RFC 3339 (a trailing `Z` is read as `+00:00`), naive
/// date-times (read as UTC) and bare dates (midnight UTC). Returns `None` when
/// the value is out of range or the text does not parse.
#[must_use]
pub fn to_utc(ts: &RawTimestamp) -> Option<DateTime<Utc>> {
    match ts {
        RawTimestamp::Seconds(s) => DateTime::from_timestamp(*s, 0),
        RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        RawTimestamp::Iso(text) => parse_iso(text.trim()),
    }
}

fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    let zoned = text
        .strip_suffix('Z')
        .or_else(|| text.strip_suffix('z'))
        .map_or_else(|| text.to_string(), |t| format!("{t}+00:00"));
    if let Ok(dt) = DateTime::parse_from_rfc3339(&zoned) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Calendar date of `instant` as seen from `boundary`.
#[must_use]
pub fn calendar_date(instant: DateTime<Utc>, boundary: DayBoundary) -> NaiveDate {
    match boundary {
        DayBoundary::Local => instant.with_timezone(&Local).date_naive(),
        DayBoundary::Utc => instant.date_naive(),
        DayBoundary::Zone(tz) => instant.with_timezone(&tz).date_naive(),
    }
}
