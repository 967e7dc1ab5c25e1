use async_trait::async_trait;
use pairhist_core::connector::{IdentitySearchProvider, PairhistConnector};
use pairhist_core::{
    Endpoint, PairMatch, PairhistError, ProviderClient, ProviderEndpoints, ProviderKey, Query,
    SearchHits,
};
use serde_json::Value;

use crate::client::HttpStack;
use crate::decode::string_at;

/// DexScreener: free-text pair search.
#[derive(Debug, Clone)]
pub struct DexScreenerConnector {
    client: ProviderClient,
    endpoint: Endpoint,
}

impl DexScreenerConnector {
    /// Static connector key; also the snapshot file stem.
    pub const KEY: ProviderKey = ProviderKey::new("dexscreener");

    /// Build over a shared HTTP stack.
    #[must_use]
    pub fn new(http: &HttpStack, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client: http.client(Self::KEY),
            endpoint: endpoints.dexscreener.clone(),
        }
    }
}

impl PairhistConnector for DexScreenerConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "DexScreener"
    }

    fn as_identity_provider(&self) -> Option<&dyn IdentitySearchProvider> {
        Some(self as &dyn IdentitySearchProvider)
    }
}

#[async_trait]
impl IdentitySearchProvider for DexScreenerConnector {
    async fn search_pairs(&self, query: &Query) -> Result<SearchHits, PairhistError> {
        let raw = self
            .client
            .fetch_endpoint(&self.endpoint, "/latest/dex/search", &[("q", query.as_str())])
            .await?;
        // "pairs" is null when nothing matches
        let matches = match raw.get("pairs") {
            Some(Value::Array(pairs)) => pairs
                .iter()
                .map(|p| PairMatch {
                    chain_id: string_at(p, "/chainId"),
                    pair_address: string_at(p, "/pairAddress"),
                    base_symbol: string_at(p, "/baseToken/symbol"),
                    quote_symbol: string_at(p, "/quoteToken/symbol"),
                    name: string_at(p, "/baseToken/name"),
                    redirect_to_pool: None,
                })
                .collect(),
            Some(Value::Null) | None => vec![],
            Some(_) => return Err(PairhistError::structural(Self::KEY.as_str(), "/pairs")),
        };
        Ok(SearchHits { matches, raw })
    }
}
