use std::time::{Duration, Instant};

use pairhist::Query;
use pairhist_mock::{MockConnector, fixtures};

use crate::helpers::{PUMP_QUERY, Rig};

const SLOW: Duration = Duration::from_millis(300);

fn slow_search(name: &'static str) -> MockConnector {
    MockConnector::builder(name)
        .delay(SLOW)
        .search(|_| Ok(fixtures::hits(vec![])))
        .build()
}

#[tokio::test]
async fn identity_sources_are_queried_concurrently() {
    let pump = MockConnector::builder("pump")
        .delay(SLOW)
        .launch_token(|_| Ok(None))
        .build();
    let fast = MockConnector::builder("dexscreener")
        .search(|_| {
            Ok(fixtures::hits(vec![fixtures::pair_match(
                "solana", "PAIR_DS", "MOON", "SOL",
            )]))
        })
        .build();
    let rig = Rig::new(slow_search("dextools"), fast, pump, slow_search("geckoterminal"));
    let ph = rig.build();

    let started = Instant::now();
    let res = ph.resolve_detailed(&Query::new(PUMP_QUERY).unwrap()).await;
    let elapsed = started.elapsed();

    // three slow lookups in sequence would take at least 900ms
    assert!(elapsed < SLOW * 2, "took {elapsed:?}");
    assert!(elapsed >= SLOW);
    assert_eq!(
        res.identity.map(|id| id.pair_address().to_string()),
        Some("PAIR_DS".to_string())
    );
    assert_eq!(rig.dextools.search_calls(), 1);
    assert_eq!(rig.gecko.search_calls(), 1);
    assert_eq!(rig.pump.launch_lookups(), vec![PUMP_QUERY.to_string()]);
}
