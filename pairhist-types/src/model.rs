//! Records that flow through the resolve → fetch → reconcile pipeline.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::connector::ProviderKey;
use crate::error::PairhistError;

/// The user-supplied token identifier: a contract address or a launch-platform ticker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Build a query from raw console text, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns `InvalidArg` if nothing but whitespace was supplied.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PairhistError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PairhistError::InvalidArg("query must not be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the query ends with the launch-platform `suffix`.
    #[must_use]
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.0.ends_with(suffix)
    }

    /// The query with `suffix` appended.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{suffix}", self.0))
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved trading-pair identity.
///
/// An `Identity` is either complete or absent: construction rejects an empty
/// pair address, so downstream code never sees a partial identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    chain_id: String,
    pair_address: String,
    symbol_pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    source: ProviderKey,
}

impl Identity {
    /// Build an identity.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `pair_address` is empty.
    pub fn new(
        chain_id: impl Into<String>,
        pair_address: impl Into<String>,
        symbol_pair: impl Into<String>,
        source: ProviderKey,
    ) -> Result<Self, PairhistError> {
        let pair_address = pair_address.into();
        if pair_address.trim().is_empty() {
            return Err(PairhistError::InvalidArg(format!(
                "{source} supplied an empty pair address"
            )));
        }
        Ok(Self {
            chain_id: chain_id.into(),
            pair_address,
            symbol_pair: symbol_pair.into(),
            name: None,
            source,
        })
    }

    /// Attach the token's display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Blockchain network tag, e.g. `"solana"`.
    #[must_use]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Exchange pair identifier.
    #[must_use]
    pub fn pair_address(&self) -> &str {
        &self.pair_address
    }

    /// `"BASE/QUOTE"` display symbol (base only when the quote is unknown).
    #[must_use]
    pub fn symbol_pair(&self) -> &str {
        &self.symbol_pair
    }

    /// Token display name, if a provider reported one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Provider that supplied the pair address.
    #[must_use]
    pub const fn source(&self) -> ProviderKey {
        self.source
    }
}

/// Partial identity reported by the launch platform.
///
/// Carries what the platform knows about a ticker; it never becomes an
/// [`Identity`] because the platform does not know the exchange pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHint {
    /// Launch-platform token address (the mint).
    pub address: String,
    /// Chain the platform lives on.
    pub chain_id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: Option<String>,
    /// Market capitalisation in USD as reported by the platform.
    pub usd_market_cap: Option<Decimal>,
}

/// Provider-native timestamp before normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTimestamp {
    /// Unix seconds.
    Seconds(i64),
    /// Unix milliseconds.
    Millis(i64),
    /// ISO-8601 / RFC 3339 text; a trailing `Z` means UTC.
    Iso(String),
}

/// Provider-native price representation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPrice {
    /// Binary floating point, as decoded from a JSON number with a fraction.
    Float(f64),
    /// Integral JSON number.
    Int(i64),
    /// Price already delivered as text, or an integer too wide for `i64`.
    Text(String),
}

impl RawPrice {
    /// Classify a JSON value; `None` for anything that is not a number or string.
    ///
    /// Only numbers decoded as floats become `Float`; integers outside the
    /// `i64` range keep their exact digits as `Text`.
    #[must_use]
    pub fn from_json(v: &serde_json::Value) -> Option<Self> {
        match v {
            serde_json::Value::Number(n) if n.is_f64() => n.as_f64().map(Self::Float),
            serde_json::Value::Number(n) => Some(
                n.as_i64()
                    .map_or_else(|| Self::Text(n.to_string()), Self::Int),
            ),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

/// One OHLC record as delivered by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandle {
    /// Sample timestamp.
    pub ts: RawTimestamp,
    /// Open price.
    pub open: RawPrice,
    /// High price.
    pub high: RawPrice,
    /// Low price.
    pub low: RawPrice,
    /// Close price.
    pub close: RawPrice,
}

/// One reconciled daily candle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalCandle {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Open price as a fixed-point decimal string.
    pub open_price: String,
    /// Close price as a fixed-point decimal string.
    pub close_price: String,
    /// High price as a fixed-point decimal string.
    pub high_price: String,
    /// Low price as a fixed-point decimal string.
    pub low_price: String,
}

/// Role a candle series played in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    /// The authoritative series (after any override was applied).
    Primary,
    /// The high-fidelity series fetched on escalation, as delivered.
    Secondary,
}

/// Everything recorded for one pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PairRecord {
    /// Display symbol, e.g. `"WIF/SOL"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Candle series keyed by source role.
    #[serde(default)]
    pub price_data: BTreeMap<SourceTag, Vec<CanonicalCandle>>,
}

/// The run's output: per-pair symbol and candle series.
///
/// Serialises as `{"contract_address": <query>, "<pair>": {...}, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    /// The query this series answers.
    #[serde(rename = "contract_address")]
    pub query: String,
    /// Records keyed by pair address (or the raw query when none resolved).
    #[serde(flatten)]
    pub pairs: BTreeMap<String, PairRecord>,
}

impl PriceSeries {
    /// Empty series for `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            pairs: BTreeMap::new(),
        }
    }

    /// Mutable record for `pair`, created on first use.
    pub fn record_mut(&mut self, pair: &str) -> &mut PairRecord {
        self.pairs.entry(pair.to_string()).or_default()
    }

    /// Record for `pair`, if any.
    #[must_use]
    pub fn get(&self, pair: &str) -> Option<&PairRecord> {
        self.pairs.get(pair)
    }

    /// Candles stored for `pair` under `tag`.
    #[must_use]
    pub fn candles(&self, pair: &str, tag: SourceTag) -> Option<&[CanonicalCandle]> {
        self.pairs
            .get(pair)
            .and_then(|r| r.price_data.get(&tag))
            .map(Vec::as_slice)
    }

    /// True when no pair has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
