use pairhist::{Branch, Outcome, Query, RunState, SourceTag};
use pairhist_mock::{MockConnector, fixtures};

use crate::helpers::{CONTRACT, Rig, T0, failing_search, market, pools};

fn failing_launch(candles: Vec<pairhist::RawCandle>) -> MockConnector {
    MockConnector::builder("pump")
        .launch_token(|_| Err(pairhist::PairhistError::http_status("pump", 500)))
        .candles(move |_| Ok(candles.clone()))
        .build()
}

fn all_down() -> Rig {
    Rig::new(
        failing_search("dextools"),
        failing_search("dexscreener"),
        failing_launch(vec![fixtures::candle_s(T0, 0.75)]),
        pools(None, vec![]),
    )
}

#[tokio::test]
async fn every_source_failing_resolves_nothing() {
    let rig = all_down();
    let ph = rig
        .builder()
        .market_candles(std::sync::Arc::new(market(vec![], vec![])))
        .build()
        .unwrap();
    let q = Query::new(CONTRACT).unwrap();

    let res = ph.resolve_detailed(&q).await;
    assert!(res.identity.is_none());
    assert!(res.token.is_none());
    for name in ["dextools", "dexscreener", "pump"] {
        assert_eq!(res.provenance.outcome(name), Some(Outcome::Failed), "{name}");
    }
    assert!(ph.resolve(&q).await.is_none());
}

#[tokio::test]
async fn unresolved_query_keys_the_output() {
    let rig = all_down();
    let ph = rig
        .builder()
        .market_candles(std::sync::Arc::new(market(vec![], vec![])))
        .build()
        .unwrap();

    let report = ph.run(&Query::new(CONTRACT).unwrap()).await;

    assert_eq!(report.state, RunState::Done);
    assert!(report.written);
    assert!(report.identity.is_none());
    assert_eq!(report.branch, Branch::Launch);
    assert_eq!(report.pair_key, CONTRACT);
    // the raw query doubles as the launch address
    assert!(rig.pump.calls().contains(&pairhist_mock::Call::Candles {
        chain_id: "solana".into(),
        pair_address: CONTRACT.into(),
    }));

    let series = rig.sink.series().unwrap();
    assert_eq!(series.query, CONTRACT);
    assert_eq!(series.pairs.keys().collect::<Vec<_>>(), [CONTRACT]);
    assert_eq!(
        series.candles(CONTRACT, SourceTag::Primary).map(<[_]>::len),
        Some(1)
    );
}

#[tokio::test]
async fn failing_candle_provider_yields_an_empty_series() {
    let pump = MockConnector::builder("pump")
        .launch_token(|_| Ok(None))
        .candles(|_| Err(pairhist::PairhistError::decode("pump", "not json")))
        .build();
    let rig = Rig::new(
        market(vec![], vec![]),
        failing_search("dexscreener"),
        pump,
        pools(None, vec![]),
    );

    let report = rig.build().run(&Query::new(CONTRACT).unwrap()).await;

    assert_eq!(report.state, RunState::Done);
    assert_eq!(report.primary_days, 0);
    let series = rig.sink.series().unwrap();
    assert_eq!(
        series.candles(CONTRACT, SourceTag::Primary).map(<[_]>::len),
        Some(0)
    );
}
