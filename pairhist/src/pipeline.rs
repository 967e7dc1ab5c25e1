use pairhist_core::{
    DayBoundary, Identity, PairRecord, PriceSeries, Provenance, ProviderKey, Query, SourceTag,
    merge_by_priority, reconcile,
};
use serde::Serialize;

use crate::Pairhist;
use crate::router::candles::{Branch, CandleFetch};

/// Stages of a run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Nothing done yet.
    Start,
    /// A pair identity was resolved.
    IdentityResolved,
    /// No source supplied a pair address; the raw query keys the output.
    IdentityUnresolved,
    /// Raw candles gathered.
    CandlesFetched,
    /// Candles reconciled into the price series.
    Reconciled,
    /// The sink accepted the price series.
    Written,
    /// Run finished.
    Done,
}

/// Summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Query that was run.
    pub query: String,
    /// Final state; always `Done`.
    pub state: RunState,
    /// Resolved identity, if any.
    pub identity: Option<Identity>,
    /// Key of the output record.
    pub pair_key: String,
    /// Candle path taken.
    pub branch: Branch,
    /// Provider that delivered the primary series.
    pub primary_source: Option<ProviderKey>,
    /// Days in the final primary series.
    pub primary_days: usize,
    /// Days in the escalation series, when escalation ran.
    pub secondary_days: Option<usize>,
    /// Whether the sink accepted the price series.
    pub written: bool,
    /// Per-provider lookup outcomes.
    pub provenance: Provenance,
    /// The assembled output.
    pub series: PriceSeries,
}

/// Reconcile a candle fetch into the output series for `query`.
///
/// The primary series is reconciled as delivered. When escalation ran, its
/// reconciled series is stored under `secondary` and also overrides the
/// primary series on every date both share.
#[must_use]
pub fn assemble(query: &Query, fetch: &CandleFetch, boundary: DayBoundary) -> PriceSeries {
    let mut series = PriceSeries::new(query.as_str());
    let record: &mut PairRecord = series.record_mut(&fetch.pair_key);
    record.symbol.clone_from(&fetch.symbol);

    let primary = reconcile(&fetch.primary, boundary);
    match &fetch.secondary {
        Some((_, raw)) => {
            let secondary = reconcile(raw, boundary);
            let merged = merge_by_priority([secondary.clone(), primary]);
            record.price_data.insert(SourceTag::Primary, merged);
            record.price_data.insert(SourceTag::Secondary, secondary);
        }
        None => {
            record.price_data.insert(SourceTag::Primary, primary);
        }
    }
    series
}

struct Machine {
    state: RunState,
}

impl Machine {
    fn advance(&mut self, next: RunState) {
        tracing::info!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }
}

impl Pairhist {
    /// Write an empty price series for input that is not a usable query.
    ///
    /// Returns whether the sink accepted it; a failure is logged, not raised.
    pub fn write_empty(&self, raw: &str) -> bool {
        let series = PriceSeries::new(raw.trim());
        tracing::warn!(input = raw, "no query to resolve; writing empty price series");
        match self.sink.write_series(&series) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "price series not written");
                false
            }
        }
    }

    /// Run the whole pipeline for `query`: resolve, fetch, reconcile, write.
    ///
    /// Never fails: provider errors degrade to missing data and a sink failure
    /// is logged and reported through [`RunReport::written`].
    #[tracing::instrument(name = "pairhist::run", skip_all, fields(query = %query))]
    pub async fn run(&self, query: &Query) -> RunReport {
        let mut m = Machine {
            state: RunState::Start,
        };

        let resolution = self.resolve_detailed(query).await;
        m.advance(if resolution.identity.is_some() {
            RunState::IdentityResolved
        } else {
            RunState::IdentityUnresolved
        });

        let fetch = self.fetch_candles(&resolution).await;
        m.advance(RunState::CandlesFetched);

        let series = assemble(query, &fetch, self.cfg.day_boundary);
        m.advance(RunState::Reconciled);

        if self.cfg.write_snapshots {
            for (key, raw) in &resolution.snapshots {
                let raw = raw.clone().unwrap_or(serde_json::Value::Null);
                if let Err(e) = self.sink.write_snapshot(*key, &raw) {
                    tracing::warn!(provider = key.as_str(), error = %e, "snapshot not written");
                }
            }
        }

        let written = match self.sink.write_series(&series) {
            Ok(()) => {
                m.advance(RunState::Written);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "price series not written");
                false
            }
        };
        m.advance(RunState::Done);

        let primary_days = series
            .candles(&fetch.pair_key, SourceTag::Primary)
            .map_or(0, <[_]>::len);
        let secondary_days = series
            .candles(&fetch.pair_key, SourceTag::Secondary)
            .map(<[_]>::len);

        RunReport {
            query: query.as_str().to_string(),
            state: m.state,
            identity: resolution.identity,
            pair_key: fetch.pair_key,
            branch: fetch.branch,
            primary_source: fetch.primary_source,
            primary_days,
            secondary_days,
            written,
            provenance: resolution.provenance,
            series,
        }
    }
}
