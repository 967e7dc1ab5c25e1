use pairhist::{OutputConfig, Pairhist, PairhistConfig, Query};
use pairhist_http::{DefaultConnectors, HttpStack, ProviderEndpoints};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG overrides, e.g. RUST_LOG=info,pairhist=debug,pairhist_http=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();

    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Address to search: ").await?;
    stdout.flush().await?;
    let line = BufReader::new(tokio::io::stdin())
        .lines()
        .next_line()
        .await?
        .unwrap_or_default();

    let cfg = PairhistConfig::default();
    let out = OutputConfig::default();
    let http = HttpStack::try_default()?;
    let c = DefaultConnectors::new(&http, &ProviderEndpoints::default(), cfg.native_candle_limit);

    let ph = Pairhist::builder()
        .config(cfg)
        .with_identity_source(c.dextools.clone())
        .with_identity_source(c.dexscreener.clone())
        .with_diagnostic_source(c.geckoterminal.clone())
        .launch_platform(c.pump.clone())
        .market_candles(c.dextools.clone())
        .pool_metadata(c.geckoterminal.clone())
        .output(out.clone())
        .build()?;

    let Ok(query) = Query::new(&line) else {
        let written = ph.write_empty(&line);
        report_written(&out, written);
        return Ok(());
    };
    let report = ph.run(&query).await;

    match &report.identity {
        Some(id) => tracing::info!(
            pair = id.pair_address(),
            chain = id.chain_id(),
            symbol = id.symbol_pair(),
            "pair resolved"
        ),
        None => tracing::info!(query = %query, "no pair found; output keyed by the query"),
    }
    tracing::info!(
        days = report.primary_days,
        source = report.primary_source.map_or("none", |k| k.as_str()),
        overridden = ?report.secondary_days,
        "daily candles assembled"
    );
    report_written(&out, report.written);
    Ok(())
}

fn report_written(out: &OutputConfig, written: bool) {
    if written {
        println!("Written to {}", out.dir.join(&out.series_file).display());
    } else {
        println!("Output could not be written; see the log above");
    }
}
