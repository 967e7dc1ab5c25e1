use async_trait::async_trait;
use pairhist_core::connector::{CandleProvider, IdentitySearchProvider, PairhistConnector};
use pairhist_core::{
    CandleRequest, Endpoint, PairMatch, PairhistError, ProviderClient, ProviderEndpoints,
    ProviderKey, Query, RawCandle, RawTimestamp, SearchHits,
};

use crate::client::HttpStack;
use crate::decode::{candle, require_array, string_at};

/// DexTools: pair search by contract address and daily pool candles in USD.
#[derive(Debug, Clone)]
pub struct DexToolsConnector {
    client: ProviderClient,
    search: Endpoint,
    candles: Endpoint,
}

impl DexToolsConnector {
    /// Static connector key; also the snapshot file stem.
    pub const KEY: ProviderKey = ProviderKey::new("dextools");

    /// Build over a shared HTTP stack.
    #[must_use]
    pub fn new(http: &HttpStack, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client: http.client(Self::KEY),
            search: endpoints.dextools_search.clone(),
            candles: endpoints.dextools_candles.clone(),
        }
    }

    fn decode_match(item: &serde_json::Value) -> PairMatch {
        PairMatch {
            chain_id: string_at(item, "/id/chain"),
            pair_address: string_at(item, "/id/pair"),
            base_symbol: string_at(item, "/symbol"),
            quote_symbol: string_at(item, "/symbolRef"),
            name: string_at(item, "/name"),
            redirect_to_pool: string_at(item, "/redirectToPool"),
        }
    }
}

impl PairhistConnector for DexToolsConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "DexTools"
    }

    fn as_identity_provider(&self) -> Option<&dyn IdentitySearchProvider> {
        Some(self as &dyn IdentitySearchProvider)
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }
}

#[async_trait]
impl IdentitySearchProvider for DexToolsConnector {
    async fn search_pairs(&self, query: &Query) -> Result<SearchHits, PairhistError> {
        let q = query.as_str().to_lowercase();
        let raw = self
            .client
            .fetch_endpoint(&self.search, "/shared/search/pair", &[("query", q.as_str())])
            .await?;
        let matches = require_array(Self::KEY.as_str(), &raw, "/results")?
            .iter()
            .map(Self::decode_match)
            .collect();
        Ok(SearchHits { matches, raw })
    }

    /// The sole match's pair, else the `redirectToPool` target of the first
    /// match that carries one. Several matches without a redirect are
    /// ambiguous and yield `None`.
    fn preferred_pair(&self, hits: &SearchHits) -> Option<String> {
        match hits.matches.as_slice() {
            [only] => only.pair_address.clone(),
            many => many.iter().find_map(|m| m.redirect_to_pool.clone()),
        }
    }
}

#[async_trait]
impl CandleProvider for DexToolsConnector {
    async fn candles(&self, req: &CandleRequest) -> Result<Vec<RawCandle>, PairhistError> {
        let path = format!(
            "/pool/candles/{}/{}/usd/1d/month",
            req.chain_id, req.pair_address
        );
        let ts = req.to.timestamp().to_string();
        let raw = self
            .client
            .fetch_endpoint(&self.candles, &path, &[("ts", ts.as_str()), ("tz", "0")])
            .await?;
        let items = require_array(Self::KEY.as_str(), &raw, "/data/candles")?;
        Ok(items
            .iter()
            .filter_map(|item| {
                let ts = item
                    .get("ts")
                    .and_then(serde_json::Value::as_i64)
                    .map(RawTimestamp::Millis);
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
