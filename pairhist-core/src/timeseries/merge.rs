use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use pairhist_types::CanonicalCandle;

/// Merge reconciled series in priority order (first is highest).
///
/// - Candles are keyed by `date`; the first appearance wins.
/// - The result is sorted by date.
///
/// ```
/// use pairhist_core::{merge_by_priority, CanonicalCandle};
///
/// let c = |date: &str, px: &str| CanonicalCandle {
///     date: date.into(),
///     open_price: px.into(),
///     close_price: px.into(),
///     high_price: px.into(),
///     low_price: px.into(),
/// };
/// let high = vec![c("2024-01-02", "2")];
/// let low = vec![c("2024-01-01", "1"), c("2024-01-02", "9")];
/// let merged = merge_by_priority([high, low]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[1].close_price, "2");
/// ```
pub fn merge_by_priority<I>(series: I) -> Vec<CanonicalCandle>
where
    I: IntoIterator<Item = Vec<CanonicalCandle>>,
{
    let mut by_date: BTreeMap<String, CanonicalCandle> = BTreeMap::new();
    for s in series {
        for c in s {
            if let Entry::Vacant(v) = by_date.entry(c.date.clone()) {
                v.insert(c);
            }
        }
    }
    by_date.into_values().collect()
}
