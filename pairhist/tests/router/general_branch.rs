use pairhist::{Branch, Query, SourceTag};
use pairhist_mock::fixtures;

use crate::helpers::{CONTRACT, DAY, Rig, T0, closes, launch, market, pools, search_only, usd};

#[tokio::test]
async fn resolved_pair_reads_the_market_provider() {
    let rig = Rig::new(
        market(
            vec![fixtures::pair_match("solana", "PAIR_DT", "WIF", "SOL")],
            vec![
                fixtures::candle_ms((T0 + 60) * 1_000, 0.125),
                fixtures::candle_ms((T0 + DAY) * 1_000, 0.25),
            ],
        ),
        search_only("dexscreener", vec![]),
        launch(
            Some(fixtures::launch_token(CONTRACT, "WIF", usd(1_000_000))),
            vec![fixtures::candle_s(T0, 7.0)],
        ),
        pools(Some(fixtures::pool("WIF / SOL", T0)), vec![]),
    );

    let report = rig.build().run(&Query::new(CONTRACT).unwrap()).await;

    assert_eq!(report.branch, Branch::General);
    assert_eq!(report.pair_key, "PAIR_DT");
    assert_eq!(report.primary_source.map(|k| k.as_str()), Some("dextools"));
    assert_eq!(rig.dextools.candle_calls(), 1);
    assert_eq!(rig.pump.candle_calls(), 0);
    assert_eq!(rig.gecko.candle_calls(), 0);
    // no escalation on the general branch, whatever the market cap
    assert_eq!(report.secondary_days, None);

    let series = rig.sink.series().unwrap();
    let record = series.get("PAIR_DT").unwrap();
    assert_eq!(record.symbol.as_deref(), Some("WIF/SOL"));
    assert_eq!(
        closes(&record.price_data[&SourceTag::Primary]),
        [("2024-03-01", "0.125"), ("2024-03-02", "0.25")]
    );
}

#[tokio::test]
async fn market_candles_are_requested_on_the_pair_chain() {
    let rig = Rig::new(
        market(
            vec![fixtures::pair_match("base", "0xPAIR", "DEGEN", "WETH")],
            vec![],
        ),
        search_only("dexscreener", vec![]),
        launch(None, vec![]),
        pools(None, vec![]),
    );

    let report = rig.build().run(&Query::new(CONTRACT).unwrap()).await;

    assert_eq!(
        rig.dextools.calls().last(),
        Some(&pairhist_mock::Call::Candles {
            chain_id: "base".into(),
            pair_address: "0xPAIR".into(),
        })
    );
    assert_eq!(report.primary_days, 0);
    let series = rig.sink.series().unwrap();
    assert_eq!(series.candles("0xPAIR", SourceTag::Primary), Some(&[][..]));
}
