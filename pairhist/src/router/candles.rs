use chrono::{DateTime, TimeDelta, Utc};
use pairhist_core::{
    CandleRequest, PairhistConnector, PoolInfo, ProviderKey, RawCandle, TokenHint,
};
use serde::Serialize;

use crate::Pairhist;
use crate::router::DEFAULT_CHAIN;
use crate::router::identity::Resolution;

/// Quote asset of every launch-platform pair.
const LAUNCH_QUOTE: &str = "SOL";

/// Which candle path a run took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// Launch-platform ticker or unresolved pair: launch platform, pool
    /// supersession and market-cap escalation.
    Launch,
    /// Resolved pair: the secondary-market provider is the primary source.
    General,
}

/// Raw candles gathered for one run, before reconciliation.
#[derive(Debug, Clone)]
pub struct CandleFetch {
    /// Key of the output record: the pair address, or the raw query when no
    /// pair was resolved.
    pub pair_key: String,
    /// Chain the candles were requested on.
    pub chain_id: String,
    /// Display symbol for the record.
    pub symbol: Option<String>,
    /// Path taken.
    pub branch: Branch,
    /// Provider that delivered `primary`, if any did.
    pub primary_source: Option<ProviderKey>,
    /// Primary series as delivered.
    pub primary: Vec<RawCandle>,
    /// Escalation series, present only when escalation ran.
    pub secondary: Option<(ProviderKey, Vec<RawCandle>)>,
}

impl Pairhist {
    /// Gather raw candles for a resolution.
    ///
    /// The launch branch is taken when the query carries the launch suffix or
    /// no pair address was resolved; otherwise the general branch. Provider
    /// failures leave the affected series empty.
    #[tracing::instrument(
        name = "pairhist::router::candles",
        skip(self, res),
        fields(query = %res.query),
    )]
    pub async fn fetch_candles(&self, res: &Resolution) -> CandleFetch {
        let now = Utc::now();
        match &res.identity {
            Some(id) if !res.query.has_suffix(&self.cfg.launch_suffix) => {
                tracing::info!(branch = "general", pair = id.pair_address(), "fetching candles");
                let req = CandleRequest::new(id.chain_id(), id.pair_address(), now);
                let (primary_source, primary) = match &self.market {
                    Some(c) => (Some(c.key()), candles(c.as_ref(), &req).await),
                    None => {
                        tracing::warn!("no secondary-market candle provider registered");
                        (None, vec![])
                    }
                };
                CandleFetch {
                    pair_key: id.pair_address().to_string(),
                    chain_id: id.chain_id().to_string(),
                    symbol: Some(id.symbol_pair().to_string()).filter(|s| !s.is_empty()),
                    branch: Branch::General,
                    primary_source,
                    primary,
                    secondary: None,
                }
            }
            _ => self.fetch_launch(res, now).await,
        }
    }

    async fn fetch_launch(&self, res: &Resolution, now: DateTime<Utc>) -> CandleFetch {
        let token = res.token.as_ref();
        let launch_address = token.map_or_else(|| res.query.as_str(), |t| t.address.as_str());
        let pair_key = res
            .identity
            .as_ref()
            .map_or_else(|| res.query.as_str(), |id| id.pair_address())
            .to_string();
        let chain_id = res
            .identity
            .as_ref()
            .map(|id| id.chain_id().to_string())
            .or_else(|| token.map(|t| t.chain_id.clone()))
            .unwrap_or_else(|| DEFAULT_CHAIN.to_string());
        let escalate = self.should_escalate(token);
        tracing::info!(
            branch = "launch",
            pair = pair_key.as_str(),
            launch_address,
            escalate,
            "fetching candles"
        );

        let primary = self.launch_primary(&chain_id, &pair_key, launch_address, now);
        let secondary = async {
            match (&self.market, escalate) {
                (Some(c), true) => {
                    let req = CandleRequest::new(chain_id.as_str(), pair_key.as_str(), now);
                    Some((c.key(), candles(c.as_ref(), &req).await))
                }
                (None, true) => {
                    tracing::warn!("escalation wanted but no secondary-market provider registered");
                    None
                }
                _ => None,
            }
        };
        let ((pool_name, primary_source, primary), secondary) = tokio::join!(primary, secondary);

        let symbol = pool_name
            .map(|n| n.replace(' ', ""))
            .or_else(|| token.map(|t| format!("{}/{LAUNCH_QUOTE}", t.symbol)))
            .or_else(|| res.symbol.clone());

        CandleFetch {
            pair_key,
            chain_id,
            symbol,
            branch: Branch::Launch,
            primary_source,
            primary,
            secondary,
        }
    }

    /// Pool feed first; native launch-platform candles only when the pool path
    /// yields nothing. Returns the pool name when the pool provider knew the pair.
    async fn launch_primary(
        &self,
        chain_id: &str,
        pair_key: &str,
        launch_address: &str,
        now: DateTime<Utc>,
    ) -> (Option<String>, Option<ProviderKey>, Vec<RawCandle>) {
        let mut pool_name = None;
        if let Some(c) = &self.pool
            && let Some(info) = pool(c.as_ref(), chain_id, pair_key).await
        {
            pool_name = Some(info.name.clone());
            let from = info.created_at - TimeDelta::days(1);
            let req = CandleRequest::new(chain_id, pair_key, now)
                .with_pool(info)
                .starting_at(from);
            let got = candles(c.as_ref(), &req).await;
            if !got.is_empty() {
                tracing::debug!(
                    provider = c.name(),
                    n = got.len(),
                    "pool feed supersedes native candles"
                );
                return (pool_name, Some(c.key()), got);
            }
        }

        match &self.launch {
            Some(c) => {
                let req = CandleRequest::new(chain_id, launch_address, now);
                (pool_name, Some(c.key()), candles(c.as_ref(), &req).await)
            }
            None => (pool_name, None, vec![]),
        }
    }

    fn should_escalate(&self, token: Option<&TokenHint>) -> bool {
        token
            .and_then(|t| t.usd_market_cap)
            .is_some_and(|cap| cap >= self.cfg.market_cap_threshold)
    }
}

async fn candles(c: &dyn PairhistConnector, req: &CandleRequest) -> Vec<RawCandle> {
    let Some(p) = c.as_candle_provider() else {
        return vec![];
    };
    match p.candles(req).await {
        Ok(v) => {
            if v.is_empty() {
                tracing::debug!(
                    provider = c.name(),
                    pair = req.pair_address.as_str(),
                    "no candles"
                );
            }
            v
        }
        Err(e) => {
            tracing::warn!(
                provider = c.name(),
                pair = req.pair_address.as_str(),
                error = %e,
                "candle fetch failed"
            );
            vec![]
        }
    }
}

async fn pool(c: &dyn PairhistConnector, chain_id: &str, pair: &str) -> Option<PoolInfo> {
    let p = c.as_pool_provider()?;
    match p.pool(chain_id, pair).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(provider = c.name(), pair, error = %e, "pool lookup failed");
            None
        }
    }
}
