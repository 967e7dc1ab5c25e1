use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, NaiveDate, Utc};

use pairhist_types::{CanonicalCandle, DayBoundary, RawCandle};

use super::format::format_price;
use super::normalize::{calendar_date, to_utc};

/// Collapse raw candles into at most one canonical candle per calendar date.
///
/// Behavior:
/// - Each timestamp is normalised to an instant and truncated to a date in
///   `boundary`.
/// - Within a date the candle with the latest instant wins outright; prices are
///   never averaged. On an exact tie the earliest-seen candle is kept.
/// - Candles whose timestamp cannot be parsed are skipped with a warning.
/// - Output is sorted by date.
#[must_use]
pub fn reconcile(raw: &[RawCandle], boundary: DayBoundary) -> Vec<CanonicalCandle> {
    let mut latest: BTreeMap<NaiveDate, (DateTime<Utc>, &RawCandle)> = BTreeMap::new();
    let mut skipped = 0usize;

    for candle in raw {
        let Some(instant) = to_utc(&candle.ts) else {
            skipped += 1;
            tracing::warn!(ts = ?candle.ts, "skipping candle with unparseable timestamp");
            continue;
        };
        match latest.entry(calendar_date(instant, boundary)) {
            Entry::Vacant(v) => {
                v.insert((instant, candle));
            }
            Entry::Occupied(mut o) => {
                if instant > o.get().0 {
                    o.insert((instant, candle));
                }
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, kept = latest.len(), "reconcile dropped candles");
    }

    latest
        .into_iter()
        .map(|(date, (_, c))| CanonicalCandle {
            date: date.format("%Y-%m-%d").to_string(),
            open_price: format_price(&c.open),
            close_price: format_price(&c.close),
            high_price: format_price(&c.high),
            low_price: format_price(&c.low),
        })
        .collect()
}
