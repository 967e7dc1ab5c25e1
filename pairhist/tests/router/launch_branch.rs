use chrono::{DateTime, TimeDelta, Utc};
use pairhist::{Branch, Query, RunState, SourceTag};
use pairhist_mock::{MockConnector, fixtures};

use crate::helpers::{DAY, PUMP_QUERY, Rig, T0, closes, launch, market, pools, search_only, usd};

fn native_candles() -> Vec<pairhist::RawCandle> {
    vec![
        fixtures::candle_s(T0 + 3_600, 1.5),
        fixtures::candle_s(T0 + 7_200, 1.75),
        fixtures::candle_s(T0 + DAY + 60, 2.5),
    ]
}

#[tokio::test]
async fn pump_ticker_below_threshold_uses_native_candles_only() {
    let rig = Rig::new(
        market(vec![], vec![fixtures::candle_s(T0, 9.0)]),
        search_only("dexscreener", vec![]),
        launch(
            Some(fixtures::launch_token(PUMP_QUERY, "MOON", usd(12_000))),
            native_candles(),
        ),
        pools(None, vec![]),
    );

    let report = rig.build().run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(report.branch, Branch::Launch);
    assert_eq!(report.state, RunState::Done);
    assert_eq!(rig.dextools.candle_calls(), 0);
    assert_eq!(report.pair_key, PUMP_QUERY);
    assert_eq!(report.primary_source.map(|k| k.as_str()), Some("pump"));
    assert_eq!(report.secondary_days, None);

    let series = rig.sink.series().expect("series written");
    let record = series.get(PUMP_QUERY).expect("record keyed by query");
    assert_eq!(record.symbol.as_deref(), Some("MOON/SOL"));
    let primary = series.candles(PUMP_QUERY, SourceTag::Primary).unwrap();
    assert_eq!(
        closes(primary),
        [("2024-03-01", "1.75"), ("2024-03-02", "2.5")]
    );
    assert!(series.candles(PUMP_QUERY, SourceTag::Secondary).is_none());
}

#[tokio::test]
async fn pump_ticker_with_resolved_pair_stays_on_launch_branch() {
    let rig = Rig::new(
        market(
            vec![fixtures::pair_match("solana", "PAIR_DT", "MOON", "SOL")],
            vec![fixtures::candle_s(T0, 9.0)],
        ),
        search_only("dexscreener", vec![]),
        launch(
            Some(fixtures::launch_token(PUMP_QUERY, "MOON", usd(100))),
            native_candles(),
        ),
        pools(None, vec![]),
    );

    let report = rig.build().run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(report.branch, Branch::Launch);
    assert_eq!(report.pair_key, "PAIR_DT");
    assert_eq!(rig.dextools.candle_calls(), 0);
    // native candles are keyed by the token, the pool by the pair
    assert!(rig.pump.calls().contains(&pairhist_mock::Call::Candles {
        chain_id: "solana".into(),
        pair_address: PUMP_QUERY.into(),
    }));
    assert!(rig.gecko.calls().contains(&pairhist_mock::Call::Pool {
        chain_id: "solana".into(),
        pair_address: "PAIR_DT".into(),
    }));
    assert_eq!(report.primary_days, 2);
}

#[tokio::test]
async fn known_pool_supersedes_native_candles() {
    let created = T0 + 10 * DAY;
    let expected_from = DateTime::<Utc>::from_timestamp(created, 0).unwrap() - TimeDelta::days(1);
    let gecko = MockConnector::builder("geckoterminal")
        .search(|_| Ok(fixtures::hits(vec![])))
        .pool(move |_, _| Ok(Some(fixtures::pool("MOON / SOL", created))))
        .candles(move |req| {
            assert!(req.pool.is_some(), "pool ids travel with the request");
            assert_eq!(req.from, Some(expected_from));
            Ok(vec![
                fixtures::candle_s(created - DAY, 0.25),
                fixtures::candle_s(created, 0.5),
            ])
        })
        .build();
    let rig = Rig::new(
        market(vec![], vec![]),
        search_only("dexscreener", vec![]),
        launch(
            Some(fixtures::launch_token(PUMP_QUERY, "MOON", usd(100))),
            native_candles(),
        ),
        gecko,
    );

    let report = rig.build().run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(rig.pump.candle_calls(), 0);
    assert_eq!(report.primary_source.map(|k| k.as_str()), Some("geckoterminal"));
    let series = rig.sink.series().unwrap();
    let record = series.get(PUMP_QUERY).unwrap();
    assert_eq!(record.symbol.as_deref(), Some("MOON/SOL"));
    assert_eq!(
        closes(&record.price_data[&SourceTag::Primary]),
        [("2024-03-10", "0.25"), ("2024-03-11", "0.5")]
    );
}

#[tokio::test]
async fn empty_pool_feed_falls_back_to_native_candles() {
    let rig = Rig::new(
        market(vec![], vec![]),
        search_only("dexscreener", vec![]),
        launch(
            Some(fixtures::launch_token(PUMP_QUERY, "MOON", usd(100))),
            native_candles(),
        ),
        pools(Some(fixtures::pool("MOON / SOL", T0)), vec![]),
    );

    let report = rig.build().run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(rig.gecko.candle_calls(), 1);
    assert_eq!(rig.pump.candle_calls(), 1);
    assert_eq!(report.primary_source.map(|k| k.as_str()), Some("pump"));
    assert_eq!(report.primary_days, 2);
    let series = rig.sink.series().unwrap();
    assert_eq!(
        series.get(PUMP_QUERY).and_then(|r| r.symbol.clone()),
        Some("MOON/SOL".to_string())
    );
}
