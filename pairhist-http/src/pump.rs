use std::str::FromStr;

use async_trait::async_trait;
use pairhist_core::connector::{CandleProvider, LaunchTokenProvider, PairhistConnector};
use pairhist_core::{
    CandleRequest, Endpoint, LaunchToken, PairhistError, ProviderClient, ProviderEndpoints,
    ProviderKey, RawCandle, TokenHint, infer_epoch,
};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::client::HttpStack;
use crate::decode::{candle, require_string, string_at};

/// Chain every pump.fun token lives on.
pub const PUMP_CHAIN: &str = "solana";

/// pump.fun: launch-platform coin lookup and native candlesticks.
#[derive(Debug, Clone)]
pub struct PumpConnector {
    client: ProviderClient,
    endpoint: Endpoint,
    candle_limit: u32,
}

impl PumpConnector {
    /// Static connector key; also the snapshot file stem.
    pub const KEY: ProviderKey = ProviderKey::new("pump");

    /// Build over a shared HTTP stack with the default candle limit.
    #[must_use]
    pub fn new(http: &HttpStack, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client: http.client(Self::KEY),
            endpoint: endpoints.pump.clone(),
            candle_limit: 100_000,
        }
    }

    /// Override the `limit` sent to the candlestick endpoint.
    #[must_use]
    pub const fn with_candle_limit(mut self, limit: u32) -> Self {
        self.candle_limit = limit;
        self
    }

    fn market_cap(v: &Value) -> Option<Decimal> {
        match v.get("usd_market_cap")? {
            Value::Number(n) => n
                .as_i64()
                .map(Decimal::from)
                .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
            Value::String(s) => Decimal::from_str(s).ok(),
            _ => None,
        }
    }
}

impl PairhistConnector for PumpConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "pump.fun"
    }

    fn as_launch_token_provider(&self) -> Option<&dyn LaunchTokenProvider> {
        Some(self as &dyn LaunchTokenProvider)
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }
}

#[async_trait]
impl LaunchTokenProvider for PumpConnector {
    async fn launch_token(&self, address: &str) -> Result<Option<LaunchToken>, PairhistError> {
        let raw = self
            .client
            .fetch_endpoint(&self.endpoint, &format!("/coins/{address}"), &[])
            .await?;
        // unknown coins come back as a 200 carrying an error object
        if raw.is_null() || raw.get("statusCode").and_then(Value::as_i64) == Some(500) {
            return Ok(None);
        }
        let hint = TokenHint {
            address: string_at(&raw, "/mint").unwrap_or_else(|| address.to_string()),
            chain_id: PUMP_CHAIN.to_string(),
            symbol: require_string(Self::KEY.as_str(), &raw, "/symbol")?,
            name: string_at(&raw, "/name"),
            usd_market_cap: Self::market_cap(&raw),
        };
        Ok(Some(LaunchToken { hint, raw }))
    }
}

#[async_trait]
impl CandleProvider for PumpConnector {
    async fn candles(&self, req: &CandleRequest) -> Result<Vec<RawCandle>, PairhistError> {
        let limit = self.candle_limit.to_string();
        let raw = self
            .client
            .fetch_endpoint(
                &self.endpoint,
                &format!("/candlesticks/{}", req.pair_address),
                &[("offset", "0"), ("limit", limit.as_str())],
            )
            .await?;
        let items = raw
            .as_array()
            .ok_or_else(|| PairhistError::structural(Self::KEY.as_str(), "candlestick array"))?;
        Ok(items
            .iter()
            .filter_map(|item| {
                let ts = item.get("timestamp").and_then(Value::as_i64).map(infer_epoch);
                candle(
                    Self::KEY.as_str(),
                    item,
                    ts,
                    ["open", "high", "low", "close"],
                )
            })
            .collect())
    }
}
