use pairhist::{Query, SourceTag};
use pairhist_mock::fixtures;
use rust_decimal::Decimal;

use crate::helpers::{DAY, PUMP_QUERY, Rig, T0, closes, launch, market, pools, search_only, usd};

fn rig_with_cap(cap: Option<Decimal>) -> Rig {
    let mut token = fixtures::launch_token(PUMP_QUERY, "MOON", Decimal::ZERO);
    token.hint.usd_market_cap = cap;
    Rig::new(
        market(
            vec![],
            vec![
                fixtures::candle_ms((T0 + DAY + 100) * 1_000, 3.25),
                fixtures::candle_ms((T0 + 2 * DAY) * 1_000, 4.5),
            ],
        ),
        search_only("dexscreener", vec![]),
        launch(
            Some(token),
            vec![
                fixtures::candle_s(T0, 1.5),
                fixtures::candle_s(T0 + DAY, 2.5),
            ],
        ),
        pools(None, vec![]),
    )
}

#[tokio::test]
async fn cap_at_threshold_escalates_and_overrides_shared_dates() {
    let rig = rig_with_cap(Some(usd(69_000)));

    let report = rig.build().run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(rig.dextools.candle_calls(), 1);
    assert_eq!(report.secondary_days, Some(2));
    let series = rig.sink.series().unwrap();
    assert_eq!(
        closes(series.candles(PUMP_QUERY, SourceTag::Primary).unwrap()),
        [
            ("2024-03-01", "1.5"),
            ("2024-03-02", "3.25"),
            ("2024-03-03", "4.5"),
        ]
    );
    assert_eq!(
        closes(series.candles(PUMP_QUERY, SourceTag::Secondary).unwrap()),
        [("2024-03-02", "3.25"), ("2024-03-03", "4.5")]
    );
}

#[tokio::test]
async fn cap_just_below_threshold_never_touches_the_market_provider() {
    let rig = rig_with_cap(Some(Decimal::new(6_899_999, 2)));

    let report = rig.build().run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(rig.dextools.candle_calls(), 0);
    assert_eq!(report.secondary_days, None);
    assert_eq!(report.primary_days, 2);
}

#[tokio::test]
async fn unknown_cap_does_not_escalate() {
    let rig = rig_with_cap(None);

    rig.build().run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(rig.dextools.candle_calls(), 0);
}

#[tokio::test]
async fn threshold_is_configurable() {
    let rig = rig_with_cap(Some(usd(12_000)));
    let ph = rig.builder().market_cap_threshold(usd(10_000)).build().unwrap();

    let report = ph.run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(rig.dextools.candle_calls(), 1);
    assert_eq!(report.secondary_days, Some(2));
}

#[tokio::test]
async fn escalation_runs_alongside_the_primary_fetch() {
    let rig = rig_with_cap(Some(usd(1_000_000)));

    rig.build().run(&Query::new(PUMP_QUERY).unwrap()).await;

    assert_eq!(rig.pump.candle_calls(), 1);
    assert_eq!(
        rig.dextools.calls().last(),
        Some(&pairhist_mock::Call::Candles {
            chain_id: "solana".into(),
            pair_address: PUMP_QUERY.into(),
        })
    );
}
