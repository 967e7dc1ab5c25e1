use async_trait::async_trait;

use pairhist_types::{
    CandleRequest, LaunchToken, PairhistError, PoolInfo, ProviderKey, Query, RawCandle, SearchHits,
};

/// Focused role trait for connectors that search trading pairs by free text.
#[async_trait]
pub trait IdentitySearchProvider: Send + Sync {
    /// Search pairs matching `query`; an empty `SearchHits` means "no match".
    async fn search_pairs(&self, query: &Query) -> Result<SearchHits, PairhistError>;

    /// The pair address this provider vouches for among `hits`.
    ///
    /// Defaults to the first match; providers that list several pools per
    /// token override this with their own disambiguation rule.
    fn preferred_pair(&self, hits: &SearchHits) -> Option<String> {
        hits.matches.first().and_then(|m| m.pair_address.clone())
    }
}

/// Focused role trait for the launch platform's coin lookup.
#[async_trait]
pub trait LaunchTokenProvider: Send + Sync {
    /// Look up a launch-platform token; `Ok(None)` when the platform has no such coin.
    async fn launch_token(&self, address: &str) -> Result<Option<LaunchToken>, PairhistError>;
}

/// Focused role trait for connectors that serve daily candles.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch raw candles for the requested pair and window.
    async fn candles(&self, req: &CandleRequest) -> Result<Vec<RawCandle>, PairhistError>;
}

/// Focused role trait for connectors that publish pool metadata.
#[async_trait]
pub trait PoolProvider: Send + Sync {
    /// Look up a pool; `Ok(None)` when the provider does not know the pair.
    async fn pool(
        &self,
        chain_id: &str,
        pair_address: &str,
    ) -> Result<Option<PoolInfo>, PairhistError>;
}

/// The primary connector interface.
///
/// A connector advertises each role it can play by returning a trait object
/// from the matching `as_*` accessor. The orchestrator checks roles when a
/// connector is registered for a slot, so a missing role is reported at build
/// time rather than mid-run.
pub trait PairhistConnector: Send + Sync {
    /// A stable identifier (e.g. "dextools", "pump"); also names the snapshot file.
    fn name(&self) -> &'static str;

    /// Canonical provider key constructed from the static name.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise pair search by returning a usable trait object reference when supported.
    fn as_identity_provider(&self) -> Option<&dyn IdentitySearchProvider> {
        None
    }

    /// If implemented, returns a trait object for launch-platform coin lookups.
    fn as_launch_token_provider(&self) -> Option<&dyn LaunchTokenProvider> {
        None
    }

    /// If implemented, returns a trait object for daily candles.
    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        None
    }

    /// If implemented, returns a trait object for pool metadata.
    fn as_pool_provider(&self) -> Option<&dyn PoolProvider> {
        None
    }
}
