use std::sync::Arc;

use pairhist_core::{
    Identity, LaunchToken, Outcome, PairhistConnector, PairhistError, Provenance, ProviderKey,
    Query, SearchHits, TokenHint,
};
use serde_json::Value;

use crate::Pairhist;
use crate::router::DEFAULT_CHAIN;

/// Everything the identity stage learned about a query.
///
/// `identity` is present only when some source supplied a pair address. The
/// remaining fields keep what partial sources reported so the candle stage
/// can still act on a launch-platform token.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The query this resolution answers.
    pub query: Query,
    /// Complete pair identity, if any source supplied a pair address.
    pub identity: Option<Identity>,
    /// Launch-platform facts, if the platform knows the token.
    pub token: Option<TokenHint>,
    /// Best-known chain even without a pair.
    pub chain_id: Option<String>,
    /// Best-known display symbol even without a pair.
    pub symbol: Option<String>,
    /// Best-known display name.
    pub name: Option<String>,
    /// Per-provider hit/empty/failed record.
    pub provenance: Provenance,
    /// Raw payload per provider, `None` when the provider produced nothing.
    pub snapshots: Vec<(ProviderKey, Option<Value>)>,
}

#[derive(Default)]
struct Fields {
    chain_id: Option<String>,
    pair: Option<(String, ProviderKey, Option<String>)>,
    symbol: Option<String>,
    name: Option<String>,
}

impl Fields {
    fn fill(slot: &mut Option<String>, value: Option<String>) {
        if slot.is_none() {
            *slot = value.filter(|v| !v.is_empty());
        }
    }
}

impl Pairhist {
    /// Resolve `query` to a trading-pair identity.
    ///
    /// Returns `None` when no source could name a pair address, including when
    /// every provider failed.
    pub async fn resolve(&self, query: &Query) -> Option<Identity> {
        self.resolve_detailed(query).await.identity
    }

    /// Resolve `query` and keep partial facts, provenance and raw snapshots.
    ///
    /// Behavior:
    /// - Every identity source, every diagnostic source and the launch platform
    ///   are queried concurrently; a failure in one never affects another.
    /// - Fields are filled in registration order; the launch platform only
    ///   fills chain, symbol and name when no identity source did, and never
    ///   supplies a pair address.
    /// - Provider failures are logged and recorded as `Failed`.
    #[tracing::instrument(name = "pairhist::router::resolve", skip_all, fields(query = %query))]
    pub async fn resolve_detailed(&self, query: &Query) -> Resolution {
        let searches = futures::future::join_all(
            self.identity_sources
                .iter()
                .map(|c| search(Arc::clone(c), query)),
        );
        let probes = futures::future::join_all(
            self.diagnostic_sources
                .iter()
                .map(|c| search(Arc::clone(c), query)),
        );
        let launch = self.lookup_launch_token(query);
        let (searches, probes, launch) = tokio::join!(searches, probes, launch);

        let mut provenance = Provenance::new(query.as_str().to_string());
        let mut snapshots: Vec<(ProviderKey, Option<Value>)> = vec![];
        let mut fields = Fields::default();

        for (c, result) in self.identity_sources.iter().zip(searches) {
            let key = c.key();
            let hits = record_search(&mut provenance, key, result);
            if let Some(first) = hits.as_ref().and_then(|h| h.matches.first()) {
                Fields::fill(&mut fields.chain_id, first.chain_id.clone());
                Fields::fill(&mut fields.symbol, first.symbol_pair());
                Fields::fill(&mut fields.name, first.name.clone());
            }
            if fields.pair.is_none()
                && let Some(h) = &hits
                && let Some(pair) = c
                    .as_identity_provider()
                    .and_then(|p| p.preferred_pair(h))
                    .filter(|p| !p.is_empty())
            {
                // the pair keeps the chain of the source that named it
                let chain = h.matches.first().and_then(|m| m.chain_id.clone());
                fields.pair = Some((pair, key, chain));
            }
            snapshots.push((key, hits.map(|h| h.raw)));
        }

        let token = match &self.launch {
            Some(c) => {
                let (outcomes, found) = launch;
                for o in outcomes {
                    provenance.push(c.name(), o);
                }
                snapshots.push((c.key(), found.as_ref().map(|t| t.raw.clone())));
                found.map(|t| t.hint)
            }
            None => None,
        };
        if let Some(t) = &token
            && fields.symbol.is_none()
        {
            fields.symbol = Some(t.symbol.clone());
            Fields::fill(&mut fields.name, t.name.clone());
            Fields::fill(&mut fields.chain_id, Some(t.chain_id.clone()));
        }

        for (c, result) in self.diagnostic_sources.iter().zip(probes) {
            let hits = record_search(&mut provenance, c.key(), result);
            snapshots.push((c.key(), hits.map(|h| h.raw)));
        }

        let identity = fields.pair.and_then(|(pair, source, pair_chain)| {
            let chain = pair_chain
                .or_else(|| fields.chain_id.clone())
                .unwrap_or_else(|| DEFAULT_CHAIN.to_string());
            let symbol = fields.symbol.clone().unwrap_or_default();
            let built = Identity::new(chain, pair, symbol, source).map(|id| match &fields.name {
                Some(n) => id.with_name(n.clone()),
                None => id,
            });
            match built {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding invalid identity");
                    None
                }
            }
        });

        match &identity {
            Some(id) => tracing::info!(
                chain = id.chain_id(),
                pair = id.pair_address(),
                symbol = id.symbol_pair(),
                source = %id.source(),
                "identity resolved"
            ),
            None => tracing::info!(
                launch_token = token.is_some(),
                "no pair address from any source"
            ),
        }

        Resolution {
            query: query.clone(),
            identity,
            token,
            chain_id: fields.chain_id,
            symbol: fields.symbol,
            name: fields.name,
            provenance,
            snapshots,
        }
    }

    /// Launch-platform lookup with the suffix retry.
    ///
    /// A query that already carries the suffix is looked up once; any other
    /// query is looked up raw and, when that yields nothing, again with the
    /// suffix appended.
    async fn lookup_launch_token(&self, query: &Query) -> (Vec<Outcome>, Option<LaunchToken>) {
        let Some(c) = &self.launch else {
            return (vec![], None);
        };
        let suffix = self.cfg.launch_suffix.as_str();
        let mut outcomes = vec![];

        let first = launch_token(c.as_ref(), query.as_str()).await;
        outcomes.push(first.0);
        if first.1.is_some() || query.has_suffix(suffix) {
            return (outcomes, first.1);
        }

        let retry = query.with_suffix(suffix);
        tracing::debug!(address = retry.as_str(), "retrying launch lookup with suffix");
        let second = launch_token(c.as_ref(), retry.as_str()).await;
        outcomes.push(second.0);
        (outcomes, second.1)
    }
}

async fn search(c: Arc<dyn PairhistConnector>, query: &Query) -> Result<SearchHits, PairhistError> {
    match c.as_identity_provider() {
        Some(p) => p.search_pairs(query).await,
        None => Err(PairhistError::unsupported("pair search")),
    }
}

/// Log a search result and reduce it to non-empty hits.
fn record_search(
    provenance: &mut Provenance,
    key: ProviderKey,
    result: Result<SearchHits, PairhistError>,
) -> Option<SearchHits> {
    match result {
        Ok(h) if !h.is_empty() => {
            provenance.push(key.as_str(), Outcome::Hit);
            Some(h)
        }
        Ok(_) => {
            tracing::debug!(provider = key.as_str(), "search returned no match");
            provenance.push(key.as_str(), Outcome::Empty);
            None
        }
        Err(e) => {
            tracing::warn!(provider = key.as_str(), error = %e, "search failed");
            provenance.push(key.as_str(), Outcome::Failed);
            None
        }
    }
}

async fn launch_token(
    c: &dyn PairhistConnector,
    address: &str,
) -> (Outcome, Option<LaunchToken>) {
    let Some(p) = c.as_launch_token_provider() else {
        return (Outcome::Failed, None);
    };
    match p.launch_token(address).await {
        Ok(Some(t)) => (Outcome::Hit, Some(t)),
        Ok(None) => (Outcome::Empty, None),
        Err(e) => {
            tracing::warn!(provider = c.name(), address, error = %e, "launch lookup failed");
            (Outcome::Failed, None)
        }
    }
}
