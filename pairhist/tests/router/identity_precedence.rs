use pairhist::{Outcome, Query};
use pairhist_mock::fixtures;

use crate::helpers::{
    CONTRACT, PUMP_QUERY, Rig, failing_search, launch, market, pools, search_only, usd,
};

#[tokio::test]
async fn first_registered_source_supplies_the_pair() {
    let rig = Rig::new(
        market(
            vec![fixtures::pair_match("solana", "PAIR_DT", "WIF", "SOL")],
            vec![],
        ),
        search_only(
            "dexscreener",
            vec![fixtures::pair_match("ethereum", "PAIR_DS", "WIF", "WETH")],
        ),
        launch(None, vec![]),
        pools(None, vec![]),
    );
    let ph = rig.build();

    let id = ph
        .resolve(&Query::new(CONTRACT).unwrap())
        .await
        .expect("identity");
    assert_eq!(id.pair_address(), "PAIR_DT");
    assert_eq!(id.chain_id(), "solana");
    assert_eq!(id.symbol_pair(), "WIF/SOL");
    assert_eq!(id.source().as_str(), "dextools");
}

#[tokio::test]
async fn later_source_fills_the_pair_when_earlier_has_nothing() {
    let rig = Rig::new(
        market(vec![], vec![]),
        search_only(
            "dexscreener",
            vec![fixtures::pair_match("solana", "PAIR_DS", "BONK", "SOL")],
        ),
        launch(None, vec![]),
        pools(None, vec![]),
    );
    let res = rig
        .build()
        .resolve_detailed(&Query::new(CONTRACT).unwrap())
        .await;

    let id = res.identity.expect("identity");
    assert_eq!(id.pair_address(), "PAIR_DS");
    assert_eq!(id.symbol_pair(), "BONK/SOL");
    assert_eq!(id.source().as_str(), "dexscreener");
    assert_eq!(res.provenance.outcome("dextools"), Some(Outcome::Empty));
    assert!(res.provenance.has_data("dexscreener"));
}

#[tokio::test]
async fn failing_source_is_recorded_and_skipped() {
    let rig = Rig::new(
        failing_search("dextools"),
        search_only(
            "dexscreener",
            vec![fixtures::pair_match("solana", "PAIR_DS", "BONK", "SOL")],
        ),
        launch(None, vec![]),
        pools(None, vec![]),
    );
    // the failing mock has no candle role, so it cannot sit in the market slot
    let ph = rig
        .builder()
        .market_candles(std::sync::Arc::new(market(vec![], vec![])))
        .build()
        .unwrap();

    let res = ph.resolve_detailed(&Query::new(CONTRACT).unwrap()).await;
    assert_eq!(res.provenance.outcome("dextools"), Some(Outcome::Failed));
    assert_eq!(
        res.identity.map(|id| id.pair_address().to_string()),
        Some("PAIR_DS".to_string())
    );
}

#[tokio::test]
async fn earlier_symbol_survives_a_later_pair() {
    let mut partial = fixtures::pair_match("solana", "", "POPCAT", "SOL");
    partial.pair_address = None;
    let rig = Rig::new(
        market(vec![partial], vec![]),
        search_only(
            "dexscreener",
            vec![fixtures::pair_match("solana", "PAIR_DS", "CAT", "USDC")],
        ),
        launch(None, vec![]),
        pools(None, vec![]),
    );

    let id = rig
        .build()
        .resolve(&Query::new(CONTRACT).unwrap())
        .await
        .expect("identity");
    assert_eq!(id.pair_address(), "PAIR_DS");
    assert_eq!(id.symbol_pair(), "POPCAT/SOL");
}

#[tokio::test]
async fn launch_token_alone_is_not_an_identity() {
    let rig = Rig::new(
        market(vec![], vec![]),
        search_only("dexscreener", vec![]),
        launch(
            Some(fixtures::launch_token(PUMP_QUERY, "MOON", usd(5_000))),
            vec![],
        ),
        pools(None, vec![]),
    );
    let ph = rig.build();
    let q = Query::new(PUMP_QUERY).unwrap();

    let res = ph.resolve_detailed(&q).await;
    assert!(res.identity.is_none());
    let token = res.token.expect("token hint");
    assert_eq!(token.symbol, "MOON");
    assert_eq!(res.symbol.as_deref(), Some("MOON"));
    assert_eq!(res.chain_id.as_deref(), Some("solana"));
    assert!(ph.resolve(&q).await.is_none());
}

#[tokio::test]
async fn launch_lookup_retries_with_the_suffix() {
    let bare = PUMP_QUERY.trim_end_matches("pump");
    let pump = launch(
        Some(fixtures::launch_token(PUMP_QUERY, "MOON", usd(5_000))),
        vec![],
    );
    let rig = Rig::new(
        market(vec![], vec![]),
        search_only("dexscreener", vec![]),
        pump.clone(),
        pools(None, vec![]),
    );

    let res = rig
        .build()
        .resolve_detailed(&Query::new(bare).unwrap())
        .await;
    assert_eq!(
        pump.launch_lookups(),
        vec![bare.to_string(), PUMP_QUERY.to_string()]
    );
    assert_eq!(res.token.map(|t| t.address), Some(PUMP_QUERY.to_string()));
    assert!(res.provenance.has_data("pump"));
}

#[tokio::test]
async fn suffixed_query_is_looked_up_once() {
    let pump = launch(None, vec![]);
    let rig = Rig::new(
        market(vec![], vec![]),
        search_only("dexscreener", vec![]),
        pump.clone(),
        pools(None, vec![]),
    );

    let res = rig
        .build()
        .resolve_detailed(&Query::new(PUMP_QUERY).unwrap())
        .await;
    assert_eq!(pump.launch_lookups(), vec![PUMP_QUERY.to_string()]);
    assert_eq!(res.provenance.outcome("pump"), Some(Outcome::Empty));
}

#[tokio::test]
async fn diagnostic_hits_never_decide_the_identity() {
    let gecko = pairhist_mock::MockConnector::builder("geckoterminal")
        .search(|_| {
            Ok(fixtures::hits(vec![fixtures::pair_match(
                "solana", "PAIR_GT", "GT", "SOL",
            )]))
        })
        .pool(|_, _| Ok(None))
        .candles(|_| Ok(vec![]))
        .build();
    let rig = Rig::new(
        market(vec![], vec![]),
        search_only("dexscreener", vec![]),
        launch(None, vec![]),
        gecko,
    );

    let res = rig
        .build()
        .resolve_detailed(&Query::new(CONTRACT).unwrap())
        .await;
    assert!(res.identity.is_none());
    assert!(res.provenance.has_data("geckoterminal"));
    let snap = res
        .snapshots
        .iter()
        .find(|(k, _)| k.as_str() == "geckoterminal")
        .and_then(|(_, raw)| raw.clone());
    assert!(snap.is_some());
}

#[tokio::test]
async fn snapshots_follow_source_order() {
    let rig = Rig::new(
        market(vec![], vec![]),
        search_only("dexscreener", vec![]),
        launch(None, vec![]),
        pools(None, vec![]),
    );
    let res = rig
        .build()
        .resolve_detailed(&Query::new(CONTRACT).unwrap())
        .await;

    let order: Vec<&str> = res.snapshots.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(order, ["dextools", "dexscreener", "pump", "geckoterminal"]);
    assert!(res.snapshots.iter().all(|(_, raw)| raw.is_none()));
}
