//! Small constructors for test data.

use chrono::{DateTime, Utc};
use pairhist_core::{
    LaunchToken, PairMatch, PoolInfo, RawCandle, RawPrice, RawTimestamp, SearchHits, TokenHint,
};
use rust_decimal::Decimal;

/// A fully populated search match.
#[must_use]
pub fn pair_match(chain: &str, pair: &str, base: &str, quote: &str) -> PairMatch {
    PairMatch {
        chain_id: Some(chain.to_string()),
        pair_address: Some(pair.to_string()),
        base_symbol: Some(base.to_string()),
        quote_symbol: Some(quote.to_string()),
        name: None,
        redirect_to_pool: None,
    }
}

/// Search hits with a raw payload echoing the match count.
#[must_use]
pub fn hits(matches: Vec<PairMatch>) -> SearchHits {
    let raw = serde_json::json!({ "matches": matches.len() });
    SearchHits { matches, raw }
}

/// A launch-platform token on Solana with `usd_market_cap`.
#[must_use]
pub fn launch_token(address: &str, symbol: &str, usd_market_cap: Decimal) -> LaunchToken {
    LaunchToken {
        hint: TokenHint {
            address: address.to_string(),
            chain_id: "solana".to_string(),
            symbol: symbol.to_string(),
            name: Some(format!("{symbol} token")),
            usd_market_cap: Some(usd_market_cap),
        },
        raw: serde_json::json!({ "mint": address, "symbol": symbol }),
    }
}

/// Pool metadata created at unix second `created`.
#[must_use]
pub fn pool(name: &str, created: i64) -> PoolInfo {
    PoolInfo {
        pool_id: "pool-1".to_string(),
        pair_id: "pair-1".to_string(),
        name: name.to_string(),
        created_at: DateTime::<Utc>::from_timestamp(created, 0).unwrap_or_default(),
    }
}

/// Flat candle (all four prices equal) at unix second `ts`.
#[must_use]
pub fn candle_s(ts: i64, px: f64) -> RawCandle {
    flat(RawTimestamp::Seconds(ts), px)
}

/// Flat candle (all four prices equal) at unix millisecond `ts`.
#[must_use]
pub fn candle_ms(ts: i64, px: f64) -> RawCandle {
    flat(RawTimestamp::Millis(ts), px)
}

fn flat(ts: RawTimestamp, px: f64) -> RawCandle {
    RawCandle {
        ts,
        open: RawPrice::Float(px),
        high: RawPrice::Float(px),
        low: RawPrice::Float(px),
        close: RawPrice::Float(px),
    }
}
