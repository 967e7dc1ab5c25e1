//! Configuration types shared across the orchestrator, connectors and sinks.

use std::path::PathBuf;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Suffix that marks a launch-platform ticker.
pub const DEFAULT_LAUNCH_SUFFIX: &str = "pump";

/// USD market cap at which a launch-platform token is treated as graduated.
pub const DEFAULT_MARKET_CAP_THRESHOLD: Decimal = Decimal::from_parts(69_000, 0, 0, false, 0);

/// Time zone used to truncate candle timestamps to calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    /// The host's local time zone.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
    /// A fixed IANA zone.
    Zone(Tz),
}

/// One provider endpoint: where it lives and how to talk to it.
///
/// Concrete connectors are thin decoders over a shared client; everything that
/// differs between providers at the HTTP level is expressed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Scheme and host (optionally a path prefix), without a trailing slash.
    pub base_url: String,
    /// Route the request through the anti-bot transport path.
    pub anti_bot: bool,
    /// Extra headers sent with every request to this endpoint.
    pub headers: Vec<(String, String)>,
}

impl Endpoint {
    /// Endpoint with no extra headers on the plain transport path.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anti_bot: false,
            headers: vec![],
        }
    }

    /// Toggle the anti-bot transport path.
    #[must_use]
    pub fn anti_bot(mut self, yes: bool) -> Self {
        self.anti_bot = yes;
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Join `path` (which must start with `/`) onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Endpoint table for every built-in provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    /// DexTools pair search (identity provider A).
    pub dextools_search: Endpoint,
    /// DexTools pool candles (secondary-market candle provider).
    pub dextools_candles: Endpoint,
    /// DexScreener search (identity provider B).
    pub dexscreener: Endpoint,
    /// pump.fun coins and candlesticks (launch platform).
    pub pump: Endpoint,
    /// GeckoTerminal search, pools and candlesticks.
    pub geckoterminal: Endpoint,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            dextools_search: Endpoint::new("https://www.dextools.io")
                .with_header("Accept", "application/json")
                .with_header(
                    "Referer",
                    "https://www.dextools.io/app/en/solana/pair-explorer/",
                ),
            dextools_candles: Endpoint::new("https://core-api.dextools.io")
                .with_header("X-API-VERSION", "1"),
            dexscreener: Endpoint::new("https://api.dexscreener.com"),
            pump: Endpoint::new("https://frontend-api.pump.fun"),
            geckoterminal: Endpoint::new("https://app.geckoterminal.com").anti_bot(true),
        }
    }
}

/// Where the output sink writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving all output files.
    pub dir: PathBuf,
    /// File name of the final price series.
    pub series_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            series_file: "PriceData.json".to_string(),
        }
    }
}

/// Global configuration for the `Pairhist` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairhistConfig {
    /// Launch-platform market cap (USD) at or above which the secondary-market
    /// candle provider is consulted and overrides the launch-platform series.
    pub market_cap_threshold: Decimal,
    /// Time zone used to derive calendar dates.
    pub day_boundary: DayBoundary,
    /// Literal suffix identifying launch-platform tickers.
    pub launch_suffix: String,
    /// `limit` passed to the launch platform's native candlestick endpoint.
    pub native_candle_limit: u32,
    /// Write raw per-provider snapshots next to the price series.
    pub write_snapshots: bool,
}

impl Default for PairhistConfig {
    fn default() -> Self {
        Self {
            market_cap_threshold: DEFAULT_MARKET_CAP_THRESHOLD,
            day_boundary: DayBoundary::Local,
            launch_suffix: DEFAULT_LAUNCH_SUFFIX.to_string(),
            native_candle_limit: 100_000,
            write_snapshots: true,
        }
    }
}
