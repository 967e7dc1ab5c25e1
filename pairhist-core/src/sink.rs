use pairhist_types::{PairhistError, PriceSeries, ProviderKey};

/// Destination for a run's output.
///
/// The driver calls `write_snapshot` once per identity provider (with `null`
/// for providers that produced nothing) and `write_series` exactly once at the
/// end of a run. Implementations overwrite previous contents.
pub trait OutputSink: Send + Sync {
    /// Persist the final price series.
    ///
    /// # Errors
    /// Returns `Io` if the series could not be written.
    fn write_series(&self, series: &PriceSeries) -> Result<(), PairhistError>;

    /// Persist one provider's raw response for diagnostics.
    ///
    /// # Errors
    /// Returns `Io` if the snapshot could not be written.
    fn write_snapshot(
        &self,
        provider: ProviderKey,
        raw: &serde_json::Value,
    ) -> Result<(), PairhistError>;
}
