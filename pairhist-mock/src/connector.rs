use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pairhist_core::connector::{
    CandleProvider, IdentitySearchProvider, LaunchTokenProvider, PairhistConnector, PoolProvider,
};
use pairhist_core::{
    CandleRequest, LaunchToken, PairhistError, PoolInfo, Query, RawCandle, SearchHits,
};

type SearchFn = Arc<dyn Fn(&Query) -> Result<SearchHits, PairhistError> + Send + Sync>;
type LaunchFn = Arc<dyn Fn(&str) -> Result<Option<LaunchToken>, PairhistError> + Send + Sync>;
type CandlesFn = Arc<dyn Fn(&CandleRequest) -> Result<Vec<RawCandle>, PairhistError> + Send + Sync>;
type PoolFn = Arc<dyn Fn(&str, &str) -> Result<Option<PoolInfo>, PairhistError> + Send + Sync>;

/// One recorded call against a [`MockConnector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `search_pairs(query)`.
    Search(String),
    /// `launch_token(address)`.
    LaunchToken(String),
    /// `candles(request)`, recorded as chain and pair.
    Candles {
        /// Requested chain.
        chain_id: String,
        /// Requested pair.
        pair_address: String,
    },
    /// `pool(chain, pair)`.
    Pool {
        /// Requested chain.
        chain_id: String,
        /// Requested pair.
        pair_address: String,
    },
}

/// In-memory connector driven by per-role closures.
///
/// Clones share the call log, so a test can keep a clone after handing the
/// original to an orchestrator.
#[derive(Clone)]
pub struct MockConnector {
    name: &'static str,
    delay: Option<Duration>,
    search_fn: Option<SearchFn>,
    launch_fn: Option<LaunchFn>,
    candles_fn: Option<CandlesFn>,
    pool_fn: Option<PoolFn>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockConnector {
    /// Start a builder for a connector called `name`.
    #[must_use]
    pub fn builder(name: &'static str) -> MockConnectorBuilder {
        MockConnectorBuilder {
            inner: Self {
                name,
                delay: None,
                search_fn: None,
                launch_fn: None,
                candles_fn: None,
                pool_fn: None,
                calls: Arc::default(),
            },
        }
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of `candles` calls made so far.
    #[must_use]
    pub fn candle_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Candles { .. }))
    }

    /// Number of `search_pairs` calls made so far.
    #[must_use]
    pub fn search_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Search(_)))
    }

    /// Addresses passed to `launch_token`, in order.
    #[must_use]
    pub fn launch_lookups(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::LaunchToken(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    async fn record(&self, call: Call) {
        if let Ok(mut log) = self.calls.lock() {
            log.push(call);
        }
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
    }
}

/// Builder for [`MockConnector`].
pub struct MockConnectorBuilder {
    inner: MockConnector,
}

impl MockConnectorBuilder {
    /// Sleep this long inside every call.
    #[must_use]
    pub const fn delay(mut self, d: Duration) -> Self {
        self.inner.delay = Some(d);
        self
    }

    /// Advertise the pair-search role.
    #[must_use]
    pub fn search<F>(mut self, f: F) -> Self
    where
        F: Fn(&Query) -> Result<SearchHits, PairhistError> + Send + Sync + 'static,
    {
        self.inner.search_fn = Some(Arc::new(f));
        self
    }

    /// Advertise the launch-token role.
    #[must_use]
    pub fn launch_token<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Option<LaunchToken>, PairhistError> + Send + Sync + 'static,
    {
        self.inner.launch_fn = Some(Arc::new(f));
        self
    }

    /// Advertise the candle role.
    #[must_use]
    pub fn candles<F>(mut self, f: F) -> Self
    where
        F: Fn(&CandleRequest) -> Result<Vec<RawCandle>, PairhistError> + Send + Sync + 'static,
    {
        self.inner.candles_fn = Some(Arc::new(f));
        self
    }

    /// Advertise the pool-metadata role.
    #[must_use]
    pub fn pool<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Result<Option<PoolInfo>, PairhistError> + Send + Sync + 'static,
    {
        self.inner.pool_fn = Some(Arc::new(f));
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> MockConnector {
        self.inner
    }
}

impl PairhistConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_identity_provider(&self) -> Option<&dyn IdentitySearchProvider> {
        self.search_fn
            .as_ref()
            .map(|_| self as &dyn IdentitySearchProvider)
    }

    fn as_launch_token_provider(&self) -> Option<&dyn LaunchTokenProvider> {
        self.launch_fn
            .as_ref()
            .map(|_| self as &dyn LaunchTokenProvider)
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        self.candles_fn.as_ref().map(|_| self as &dyn CandleProvider)
    }

    fn as_pool_provider(&self) -> Option<&dyn PoolProvider> {
        self.pool_fn.as_ref().map(|_| self as &dyn PoolProvider)
    }
}

#[async_trait]
impl IdentitySearchProvider for MockConnector {
    async fn search_pairs(&self, query: &Query) -> Result<SearchHits, PairhistError> {
        self.record(Call::Search(query.as_str().to_string())).await;
        self.search_fn
            .as_ref()
            .map_or_else(|| Err(PairhistError::unsupported("search")), |f| f(query))
    }
}

#[async_trait]
impl LaunchTokenProvider for MockConnector {
    async fn launch_token(&self, address: &str) -> Result<Option<LaunchToken>, PairhistError> {
        self.record(Call::LaunchToken(address.to_string())).await;
        self.launch_fn
            .as_ref()
            .map_or_else(|| Err(PairhistError::unsupported("launch-token")), |f| f(address))
    }
}

#[async_trait]
impl CandleProvider for MockConnector {
    async fn candles(&self, req: &CandleRequest) -> Result<Vec<RawCandle>, PairhistError> {
        self.record(Call::Candles {
            chain_id: req.chain_id.clone(),
            pair_address: req.pair_address.clone(),
        })
        .await;
        self.candles_fn
            .as_ref()
            .map_or_else(|| Err(PairhistError::unsupported("candles")), |f| f(req))
    }
}

#[async_trait]
impl PoolProvider for MockConnector {
    async fn pool(
        &self,
        chain_id: &str,
        pair_address: &str,
    ) -> Result<Option<PoolInfo>, PairhistError> {
        self.record(Call::Pool {
            chain_id: chain_id.to_string(),
            pair_address: pair_address.to_string(),
        })
        .await;
        self.pool_fn.as_ref().map_or_else(
            || Err(PairhistError::unsupported("pool")),
            |f| f(chain_id, pair_address),
        )
    }
}
