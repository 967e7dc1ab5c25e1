//! Re-export of foundational types from `pairhist-types`.
// Consolidated re-exports so downstream crates can depend on `pairhist-core` only

pub use pairhist_types::{
    CandleRequest, CanonicalCandle, DEFAULT_LAUNCH_SUFFIX, DEFAULT_MARKET_CAP_THRESHOLD,
    DayBoundary, Endpoint, Identity, LaunchToken, Outcome, OutputConfig, PairMatch, PairRecord,
    PairhistConfig, PairhistError, PoolInfo, PriceSeries, Provenance, ProviderEndpoints,
    ProviderKey, Query, RawCandle, RawPrice, RawTimestamp, SearchHits, SourceTag, TokenHint,
};
