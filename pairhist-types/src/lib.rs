//! Pairhist-specific data records and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod model;
mod provenance;
mod responses;

pub use config::{
    DEFAULT_LAUNCH_SUFFIX, DEFAULT_MARKET_CAP_THRESHOLD, DayBoundary, Endpoint, OutputConfig,
    PairhistConfig, ProviderEndpoints,
};
pub use connector::ProviderKey;
pub use error::PairhistError;
pub use model::{
    CanonicalCandle, Identity, PairRecord, PriceSeries, Query, RawCandle, RawPrice, RawTimestamp,
    SourceTag, TokenHint,
};
pub use provenance::{Outcome, Provenance};
pub use responses::{CandleRequest, LaunchToken, PairMatch, PoolInfo, SearchHits};
