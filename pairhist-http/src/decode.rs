//! Structural checks shared by the connector decoders.

use pairhist_core::{PairhistError, RawCandle, RawPrice, RawTimestamp};
use serde_json::Value;

pub(crate) fn string_at(v: &Value, pointer: &str) -> Option<String> {
    match v.pointer(pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn require_string(
    provider: &str,
    v: &Value,
    pointer: &str,
) -> Result<String, PairhistError> {
    string_at(v, pointer).ok_or_else(|| PairhistError::structural(provider, pointer))
}

pub(crate) fn require_array<'a>(
    provider: &str,
    v: &'a Value,
    pointer: &str,
) -> Result<&'a [Value], PairhistError> {
    v.pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| PairhistError::structural(provider, pointer))
}

/// Decode one candle object given its timestamp and the four price field names.
///
/// Returns `None` (and logs) when a price field is missing so a single bad row
/// does not discard the whole series.
pub(crate) fn candle(
    provider: &str,
    item: &Value,
    ts: Option<RawTimestamp>,
    [open, high, low, close]: [&str; 4],
) -> Option<RawCandle> {
    let price = |field: &str| item.get(field).and_then(RawPrice::from_json);
    let built = ts.and_then(|ts| {
        Some(RawCandle {
            ts,
            open: price(open)?,
            high: price(high)?,
            low: price(low)?,
            close: price(close)?,
        })
    });
    if built.is_none() {
        tracing::warn!(provider, item = %item, "dropping malformed candle");
    }
    built
}
