//! Normalised provider responses consumed by the resolver and the candle fetcher.

use chrono::{DateTime, Utc};

use crate::model::TokenHint;

/// One match from a pair-search provider. Every field is optional because
/// providers differ in what they report; the resolver decides precedence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairMatch {
    /// Chain tag.
    pub chain_id: Option<String>,
    /// Exchange pair address.
    pub pair_address: Option<String>,
    /// Base token symbol.
    pub base_symbol: Option<String>,
    /// Quote token symbol.
    pub quote_symbol: Option<String>,
    /// Token display name.
    pub name: Option<String>,
    /// Explicit "redirect to pool" target for tokens listed on several pools.
    pub redirect_to_pool: Option<String>,
}

impl PairMatch {
    /// `"BASE/QUOTE"`, or the base symbol alone when the quote is unknown.
    #[must_use]
    pub fn symbol_pair(&self) -> Option<String> {
        match (&self.base_symbol, &self.quote_symbol) {
            (Some(b), Some(q)) => Some(format!("{b}/{q}")),
            (Some(b), None) => Some(b.clone()),
            _ => None,
        }
    }
}

/// A search response: decoded matches plus the raw payload for snapshots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchHits {
    /// Decoded matches in provider order.
    pub matches: Vec<PairMatch>,
    /// Raw provider payload.
    pub raw: serde_json::Value,
}

impl SearchHits {
    /// True when the provider returned no match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Launch-platform coin lookup result.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchToken {
    /// Decoded token facts.
    pub hint: TokenHint,
    /// Raw provider payload.
    pub raw: serde_json::Value,
}

/// Pool metadata from the pool-metadata provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolInfo {
    /// Provider-internal pool id.
    pub pool_id: String,
    /// Provider-internal id of the pool's trading pair.
    pub pair_id: String,
    /// Pool display name, e.g. `"WIF / SOL"`.
    pub name: String,
    /// Pool creation instant.
    pub created_at: DateTime<Utc>,
}

/// Parameters for a daily candle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleRequest {
    /// Chain tag.
    pub chain_id: String,
    /// Pair (or launch token) address.
    pub pair_address: String,
    /// Pool metadata, required by providers that key candles by pool id.
    pub pool: Option<PoolInfo>,
    /// Inclusive window start; providers choose their own default when unset.
    pub from: Option<DateTime<Utc>>,
    /// Window end.
    pub to: DateTime<Utc>,
}

impl CandleRequest {
    /// Request ending at `to` with no explicit start.
    pub fn new(
        chain_id: impl Into<String>,
        pair_address: impl Into<String>,
        to: DateTime<Utc>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            pair_address: pair_address.into(),
            pool: None,
            from: None,
            to,
        }
    }

    /// Attach pool metadata.
    #[must_use]
    pub fn with_pool(mut self, pool: PoolInfo) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Set the window start.
    #[must_use]
    pub fn starting_at(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }
}
