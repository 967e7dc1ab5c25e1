use async_trait::async_trait;
use chrono::TimeDelta;
use pairhist_core::connector::{
    CandleProvider, IdentitySearchProvider, PairhistConnector, PoolProvider,
};
use pairhist_core::{
    CandleRequest, Endpoint, PairMatch, PairhistError, PoolInfo, ProviderClient,
    ProviderEndpoints, ProviderKey, Query, RawCandle, RawTimestamp, SearchHits, to_utc,
};
use serde_json::Value;

use crate::client::HttpStack;
use crate::decode::{candle, require_array, require_string, string_at};

/// GeckoTerminal: search probe, pool metadata and pool-keyed daily candles.
///
/// Every endpoint sits behind anti-bot protection, so the default endpoint is
/// flagged for the browser-profile transport.
#[derive(Debug, Clone)]
pub struct GeckoTerminalConnector {
    client: ProviderClient,
    endpoint: Endpoint,
}

impl GeckoTerminalConnector {
    /// Static connector key; also the snapshot file stem.
    pub const KEY: ProviderKey = ProviderKey::new("geckoterminal");

    /// Build over a shared HTTP stack.
    #[must_use]
    pub fn new(http: &HttpStack, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client: http.client(Self::KEY),
            endpoint: endpoints.geckoterminal.clone(),
        }
    }

    fn decode_pool(raw: &Value) -> Result<PoolInfo, PairhistError> {
        let key = Self::KEY.as_str();
        let created = require_string(key, raw, "/data/attributes/pool_created_at")?;
        let created_at = to_utc(&RawTimestamp::Iso(created))
            .ok_or_else(|| PairhistError::structural(key, "a parseable pool_created_at"))?;
        Ok(PoolInfo {
            pool_id: require_string(key, raw, "/data/id")?,
            pair_id: require_string(key, raw, "/data/relationships/pairs/data/0/id")?,
            name: require_string(key, raw, "/data/attributes/name")?,
            created_at,
        })
    }
}

impl PairhistConnector for GeckoTerminalConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "GeckoTerminal"
    }

    fn as_identity_provider(&self) -> Option<&dyn IdentitySearchProvider> {
        Some(self as &dyn IdentitySearchProvider)
    }

    fn as_pool_provider(&self) -> Option<&dyn PoolProvider> {
        Some(self as &dyn PoolProvider)
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }
}

#[async_trait]
impl IdentitySearchProvider for GeckoTerminalConnector {
    /// One match per entry of any result list (pools, tokens, networks, ...).
    async fn search_pairs(&self, query: &Query) -> Result<SearchHits, PairhistError> {
        let raw = self
            .client
            .fetch_endpoint(&self.endpoint, "/api/p1/search", &[("query", query.as_str())])
            .await?;
        let matches = raw
            .pointer("/data/attributes")
            .and_then(Value::as_object)
            .map(|lists| {
                lists
                    .values()
                    .filter_map(Value::as_array)
                    .flatten()
                    .map(|item| PairMatch {
                        chain_id: string_at(item, "/network/identifier"),
                        pair_address: string_at(item, "/address"),
                        name: string_at(item, "/name"),
                        ..PairMatch::default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(SearchHits { matches, raw })
    }
}

#[async_trait]
impl PoolProvider for GeckoTerminalConnector {
    async fn pool(
        &self,
        chain_id: &str,
        pair_address: &str,
    ) -> Result<Option<PoolInfo>, PairhistError> {
        let path = format!("/api/p1/{chain_id}/pools/{pair_address}");
        let raw = match self.client.fetch_endpoint(&self.endpoint, &path, &[]).await {
            Ok(v) => v,
            Err(PairhistError::HttpStatus { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        if raw.get("errors").is_some_and(|e| !e.is_null()) {
            return Ok(None);
        }
        Self::decode_pool(&raw).map(Some)
    }
}

#[async_trait]
impl CandleProvider for GeckoTerminalConnector {
    /// Requires `req.pool`; the window defaults to one day before pool creation.
    async fn candles(&self, req: &CandleRequest) -> Result<Vec<RawCandle>, PairhistError> {
        let pool = req.pool.as_ref().ok_or_else(|| {
            PairhistError::InvalidArg("geckoterminal candles need pool metadata".into())
        })?;
        let from = req
            .from
            .unwrap_or_else(|| pool.created_at - TimeDelta::days(1));
        let from = from.timestamp().to_string();
        let to = req.to.timestamp().to_string();
        let path = format!("/api/p1/candlesticks/{}/{}", pool.pool_id, pool.pair_id);
        let raw = self
            .client
            .fetch_endpoint(
                &self.endpoint,
                &path,
                &[
                    ("resolution", "1D"),
                    ("from_timestamp", from.as_str()),
                    ("to_timestamp", to.as_str()),
                ],
            )
            .await?;
        let items = require_array(Self::KEY.as_str(), &raw, "/data")?;
        Ok(items
            .iter()
            .filter_map(|item| {
                let ts = item
                    .get("dt")
                    .and_then(Value::as_str)
                    .map(|s| RawTimestamp::Iso(s.to_string()));
                candle(Self::KEY.as_str(), item, ts, ["o", "h", "l", "c"])
            })
            .collect())
    }
}
