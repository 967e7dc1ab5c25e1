//! pairhist resolves a token identifier to its trading pair and assembles a
//! reconciled daily OHLC history from several DEX data providers.
//!
//! Overview
//! - The identity stage fans out to pair-search providers and the launch
//!   platform, then merges their answers by registration order.
//! - The candle stage picks a branch: launch-platform tokens (and queries that
//!   resolved no pair) go through pool supersession and market-cap
//!   escalation; resolved pairs read the secondary-market provider.
//! - The reconcile stage collapses each series to one candle per date (latest
//!   sample wins) and applies the escalation override.
//! - The driver writes the series and raw snapshots through an `OutputSink`.
//!
//! Provider failures never abort a run; they degrade to "no data from this
//! source" and are logged with `tracing`.
//!
//! Building an orchestrator:
//! ```rust,ignore
//! use std::sync::Arc;
//! use pairhist::{Pairhist, Query};
//! use pairhist_http::{DefaultConnectors, HttpStack};
//!
//! let http = HttpStack::try_default()?;
//! let c = DefaultConnectors::new(&http, &Default::default(), 100_000);
//! let ph = Pairhist::builder()
//!     .with_identity_source(c.dextools.clone())
//!     .with_identity_source(c.dexscreener.clone())
//!     .with_diagnostic_source(c.geckoterminal.clone())
//!     .launch_platform(c.pump.clone())
//!     .market_candles(c.dextools.clone())
//!     .pool_metadata(c.geckoterminal.clone())
//!     .build()?;
//! let report = ph.run(&Query::new("So11111111111111111111111111111111111111112")?).await;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod pipeline;
mod router;
mod sink;

pub use crate::core::{Pairhist, PairhistBuilder};
pub use pipeline::{RunReport, RunState, assemble};
pub use router::candles::{Branch, CandleFetch};
pub use router::identity::Resolution;
pub use sink::JsonFileSink;

pub use pairhist_core::{
    CanonicalCandle, DayBoundary, Identity, OutputConfig, OutputSink, Outcome, PairRecord,
    PairhistConfig, PairhistConnector, PairhistError, PriceSeries, Provenance, ProviderKey, Query,
    RawCandle, SourceTag, TokenHint,
};
