use pairhist_types::RawPrice;

/// Floats at or above this magnitude render without a trailing `.0`.
const PLAIN_INTEGRAL_LIMIT: f64 = 1e16;

/// Render a provider price as a fixed-point decimal string.
///
/// - Floats use the shortest representation that round-trips, never an
///   exponent, so `0.1` becomes `"0.1"` and `1e-7` becomes `"0.0000001"`.
///   Integral floats below `1e16` keep one fractional digit (`1.0 -> "1.0"`).
/// - Integers render as-is.
/// - Text passes through unchanged.
///
/// ```
/// use pairhist_core::{format_price, RawPrice};
///
/// assert_eq!(format_price(&RawPrice::Float(0.1)), "0.1");
/// assert_eq!(format_price(&RawPrice::Int(42)), "42");
/// assert_eq!(format_price(&RawPrice::Text("0.1".into())), "0.1");
/// ```
#[must_use]
pub fn format_price(price: &RawPrice) -> String {
    match price {
        RawPrice::Float(v) => format_float(*v),
        RawPrice::Int(v) => v.to_string(),
        RawPrice::Text(s) => s.clone(),
    }
}

fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < PLAIN_INTEGRAL_LIMIT {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
