use std::sync::Arc;

use pairhist_core::{
    DayBoundary, OutputConfig, OutputSink, PairhistConfig, PairhistConnector, PairhistError,
};
use rust_decimal::Decimal;

use crate::sink::JsonFileSink;

/// Orchestrator that resolves a query and assembles its daily price history.
///
/// Each provider occupies a slot describing the part it plays in a run:
/// - identity sources, queried in registration order (earlier wins a field);
/// - diagnostic sources, whose searches are recorded but never decide anything;
/// - the launch platform (token lookup and native candles);
/// - the secondary-market candle provider;
/// - the pool-metadata provider, whose own candle feed supersedes the launch
///   platform's once a pool is known.
pub struct Pairhist {
    pub(crate) identity_sources: Vec<Arc<dyn PairhistConnector>>,
    pub(crate) diagnostic_sources: Vec<Arc<dyn PairhistConnector>>,
    pub(crate) launch: Option<Arc<dyn PairhistConnector>>,
    pub(crate) market: Option<Arc<dyn PairhistConnector>>,
    pub(crate) pool: Option<Arc<dyn PairhistConnector>>,
    pub(crate) sink: Arc<dyn OutputSink>,
    pub(crate) cfg: PairhistConfig,
}

/// Builder for constructing a [`Pairhist`] orchestrator.
pub struct PairhistBuilder {
    identity_sources: Vec<Arc<dyn PairhistConnector>>,
    diagnostic_sources: Vec<Arc<dyn PairhistConnector>>,
    launch: Option<Arc<dyn PairhistConnector>>,
    market: Option<Arc<dyn PairhistConnector>>,
    pool: Option<Arc<dyn PairhistConnector>>,
    sink: Option<Arc<dyn OutputSink>>,
    cfg: PairhistConfig,
}

impl Default for PairhistBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PairhistBuilder {
    /// Create a builder with no providers, the default configuration and a
    /// [`JsonFileSink`] writing to the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity_sources: vec![],
            diagnostic_sources: vec![],
            launch: None,
            market: None,
            pool: None,
            sink: None,
            cfg: PairhistConfig::default(),
        }
    }

    /// Register a pair-search provider.
    ///
    /// Registration order is precedence: a field supplied by an earlier
    /// source is never replaced by a later one.
    #[must_use]
    pub fn with_identity_source(mut self, c: Arc<dyn PairhistConnector>) -> Self {
        self.identity_sources.push(c);
        self
    }

    /// Register a pair-search provider whose answers are only recorded in the
    /// provenance and snapshots.
    #[must_use]
    pub fn with_diagnostic_source(mut self, c: Arc<dyn PairhistConnector>) -> Self {
        self.diagnostic_sources.push(c);
        self
    }

    /// Set the launch platform: token lookup plus native candles.
    #[must_use]
    pub fn launch_platform(mut self, c: Arc<dyn PairhistConnector>) -> Self {
        self.launch = Some(c);
        self
    }

    /// Set the secondary-market candle provider.
    ///
    /// It is the primary source for pairs that resolved outside the launch
    /// platform, and the escalation source for graduated launch tokens.
    #[must_use]
    pub fn market_candles(mut self, c: Arc<dyn PairhistConnector>) -> Self {
        self.market = Some(c);
        self
    }

    /// Set the pool-metadata provider.
    #[must_use]
    pub fn pool_metadata(mut self, c: Arc<dyn PairhistConnector>) -> Self {
        self.pool = Some(c);
        self
    }

    /// Replace the output sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Write JSON files under `out` instead of the current directory.
    #[must_use]
    pub fn output(mut self, out: OutputConfig) -> Self {
        self.sink = Some(Arc::new(JsonFileSink::new(out)));
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PairhistConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// USD market cap at or above which the secondary-market provider is
    /// consulted for a launch-platform token.
    #[must_use]
    pub const fn market_cap_threshold(mut self, usd: Decimal) -> Self {
        self.cfg.market_cap_threshold = usd;
        self
    }

    /// Time zone used to derive candle dates.
    #[must_use]
    pub const fn day_boundary(mut self, boundary: DayBoundary) -> Self {
        self.cfg.day_boundary = boundary;
        self
    }

    /// Suffix that routes a query straight to the launch branch.
    #[must_use]
    pub fn launch_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.cfg.launch_suffix = suffix.into();
        self
    }

    /// Toggle writing raw provider snapshots.
    #[must_use]
    pub const fn write_snapshots(mut self, yes: bool) -> Self {
        self.cfg.write_snapshots = yes;
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// - `Unsupported` if a connector lacks a role its slot needs.
    /// - `InvalidArg` if neither an identity source nor a launch platform is
    ///   registered, if the launch suffix is empty, or if the threshold is
    ///   negative.
    pub fn build(self) -> Result<Pairhist, PairhistError> {
        for c in self.identity_sources.iter().chain(&self.diagnostic_sources) {
            require(c.as_identity_provider().is_some(), c.as_ref(), "pair search")?;
        }
        if let Some(c) = &self.launch {
            require(
                c.as_launch_token_provider().is_some(),
                c.as_ref(),
                "launch-token lookup",
            )?;
            require(c.as_candle_provider().is_some(), c.as_ref(), "candles")?;
        }
        if let Some(c) = &self.market {
            require(c.as_candle_provider().is_some(), c.as_ref(), "candles")?;
        }
        if let Some(c) = &self.pool {
            require(c.as_pool_provider().is_some(), c.as_ref(), "pool metadata")?;
            require(c.as_candle_provider().is_some(), c.as_ref(), "candles")?;
        }

        if self.identity_sources.is_empty() && self.launch.is_none() {
            return Err(PairhistError::InvalidArg(
                "no identity source or launch platform registered".to_string(),
            ));
        }
        if self.cfg.launch_suffix.is_empty() {
            return Err(PairhistError::InvalidArg(
                "launch suffix must not be empty".to_string(),
            ));
        }
        if self.cfg.market_cap_threshold.is_sign_negative() {
            return Err(PairhistError::InvalidArg(
                "market cap threshold must not be negative".to_string(),
            ));
        }

        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(JsonFileSink::new(OutputConfig::default())));

        Ok(Pairhist {
            identity_sources: self.identity_sources,
            diagnostic_sources: self.diagnostic_sources,
            launch: self.launch,
            market: self.market,
            pool: self.pool,
            sink,
            cfg: self.cfg,
        })
    }
}

fn require(ok: bool, c: &dyn PairhistConnector, role: &str) -> Result<(), PairhistError> {
    if ok {
        Ok(())
    } else {
        Err(PairhistError::unsupported(format!("{role} on {}", c.name())))
    }
}

impl Pairhist {
    /// Start building a new orchestrator.
    #[must_use]
    pub fn builder() -> PairhistBuilder {
        PairhistBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &PairhistConfig {
        &self.cfg
    }
}
