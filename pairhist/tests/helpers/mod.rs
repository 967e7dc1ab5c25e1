#![allow(dead_code)]

use std::sync::Arc;

use pairhist::{DayBoundary, Pairhist, PairhistBuilder, PairhistError};
use pairhist_core::{LaunchToken, PairMatch, PoolInfo, RawCandle};
use pairhist_mock::{MemorySink, MockConnector, fixtures};
use rust_decimal::Decimal;

/// Launch-platform ticker used across tests.
pub const PUMP_QUERY: &str = "BGWms7SStYYj2w7QXMvAmpTWCX4o6ibGBcBW3maGpump";
/// A plain contract address.
pub const CONTRACT: &str = "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm";
/// 2024-03-01T00:00:00Z.
pub const T0: i64 = 1_709_251_200;
pub const DAY: i64 = 86_400;

pub fn usd(n: i64) -> Decimal {
    Decimal::from(n)
}

/// Pair search returning `matches` for every query.
pub fn search_only(name: &'static str, matches: Vec<PairMatch>) -> MockConnector {
    MockConnector::builder(name)
        .search(move |_| Ok(fixtures::hits(matches.clone())))
        .build()
}

/// Pair search that always fails at the transport.
pub fn failing_search(name: &'static str) -> MockConnector {
    MockConnector::builder(name)
        .search(move |_| Err(PairhistError::transport(name, "connection reset")))
        .build()
}

/// Pair search plus daily candles, the way the DexTools connector is wired.
pub fn market(matches: Vec<PairMatch>, candles: Vec<RawCandle>) -> MockConnector {
    MockConnector::builder("dextools")
        .search(move |_| Ok(fixtures::hits(matches.clone())))
        .candles(move |_| Ok(candles.clone()))
        .build()
}

/// Launch platform answering only for `token.hint.address`.
pub fn launch(token: Option<LaunchToken>, candles: Vec<RawCandle>) -> MockConnector {
    MockConnector::builder("pump")
        .launch_token(move |addr| {
            Ok(token
                .clone()
                .filter(|t| t.hint.address == addr))
        })
        .candles(move |_| Ok(candles.clone()))
        .build()
}

/// Pool provider with an optional pool, its candle feed and an empty search probe.
pub fn pools(pool: Option<PoolInfo>, candles: Vec<RawCandle>) -> MockConnector {
    MockConnector::builder("geckoterminal")
        .search(|_| Ok(fixtures::hits(vec![])))
        .pool(move |_, _| Ok(pool.clone()))
        .candles(move |req| {
            // the feed is keyed by pool ids; without them it has nothing
            if req.pool.is_some() {
                Ok(candles.clone())
            } else {
                Ok(vec![])
            }
        })
        .build()
}

/// The full wiring with mocks in every slot.
pub struct Rig {
    pub dextools: MockConnector,
    pub dexscreener: MockConnector,
    pub pump: MockConnector,
    pub gecko: MockConnector,
    pub sink: Arc<MemorySink>,
}

impl Rig {
    pub fn new(
        dextools: MockConnector,
        dexscreener: MockConnector,
        pump: MockConnector,
        gecko: MockConnector,
    ) -> Self {
        Self {
            dextools,
            dexscreener,
            pump,
            gecko,
            sink: Arc::new(MemorySink::default()),
        }
    }

    pub fn builder(&self) -> PairhistBuilder {
        Pairhist::builder()
            .with_identity_source(Arc::new(self.dextools.clone()))
            .with_identity_source(Arc::new(self.dexscreener.clone()))
            .with_diagnostic_source(Arc::new(self.gecko.clone()))
            .launch_platform(Arc::new(self.pump.clone()))
            .market_candles(Arc::new(self.dextools.clone()))
            .pool_metadata(Arc::new(self.gecko.clone()))
            .sink(self.sink.clone())
            .day_boundary(DayBoundary::Utc)
    }

    pub fn build(&self) -> Pairhist {
        self.builder().build().unwrap()
    }
}

/// Close prices of a reconciled series, in date order.
pub fn closes(candles: &[pairhist::CanonicalCandle]) -> Vec<(&str, &str)> {
    candles
        .iter()
        .map(|c| (c.date.as_str(), c.close_price.as_str()))
        .collect()
}
