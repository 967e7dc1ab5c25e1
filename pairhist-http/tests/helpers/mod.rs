#![allow(dead_code)]

use std::sync::Arc;

use pairhist_core::{Endpoint, ProviderEndpoints, UserAgentSource};
use pairhist_http::{DEFAULT_TIMEOUT, HttpStack, ReqwestTransport};

pub const AGENT: &str = "pairhist-test/1.0";

pub struct FixedAgent;

impl UserAgentSource for FixedAgent {
    fn user_agent(&self) -> String {
        AGENT.to_string()
    }
}

pub fn stack() -> HttpStack {
    HttpStack::new(
        Arc::new(ReqwestTransport::new(DEFAULT_TIMEOUT).unwrap()),
        Arc::new(FixedAgent),
    )
}

fn rebase(ep: Endpoint, base: &str) -> Endpoint {
    Endpoint {
        base_url: base.to_string(),
        ..ep
    }
}

/// Default endpoint profiles with every base URL pointed at `base`.
pub fn endpoints(base: &str) -> ProviderEndpoints {
    let d = ProviderEndpoints::default();
    ProviderEndpoints {
        dextools_search: rebase(d.dextools_search, base),
        dextools_candles: rebase(d.dextools_candles, base),
        dexscreener: rebase(d.dexscreener, base),
        pump: rebase(d.pump, base),
        geckoterminal: rebase(d.geckoterminal, base),
    }
}
