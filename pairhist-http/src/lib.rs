//! pairhist-http
//!
//! The default `Transport` and `UserAgentSource`, and one connector per
//! upstream provider. Connectors only decode: every request goes through the
//! shared `ProviderClient`, parameterised by an `Endpoint` from
//! `ProviderEndpoints`.
#![warn(missing_docs)]

/// `reqwest` transport, rotating user agents and the shared HTTP stack.
pub mod client;
mod decode;
/// DexScreener connector.
pub mod dexscreener;
/// DexTools connector.
pub mod dextools;
/// GeckoTerminal connector.
pub mod geckoterminal;
/// pump.fun connector.
pub mod pump;

use std::sync::Arc;

pub use client::{DEFAULT_TIMEOUT, HttpStack, ReqwestTransport, RotatingUserAgents};
pub use dexscreener::DexScreenerConnector;
pub use dextools::DexToolsConnector;
pub use geckoterminal::GeckoTerminalConnector;
pub use pump::{PUMP_CHAIN, PumpConnector};

pub use pairhist_core::{Endpoint, ProviderEndpoints};

/// The built-in connector set, sharing one HTTP stack.
#[derive(Debug, Clone)]
pub struct DefaultConnectors {
    /// Identity provider A and the secondary-market candle provider.
    pub dextools: Arc<DexToolsConnector>,
    /// Identity provider B.
    pub dexscreener: Arc<DexScreenerConnector>,
    /// Launch platform: token lookup and native candles.
    pub pump: Arc<PumpConnector>,
    /// Pool metadata, pool candles and the diagnostics search probe.
    pub geckoterminal: Arc<GeckoTerminalConnector>,
}

impl DefaultConnectors {
    /// Build every connector over `http`.
    #[must_use]
    pub fn new(http: &HttpStack, endpoints: &ProviderEndpoints, candle_limit: u32) -> Self {
        Self {
            dextools: Arc::new(DexToolsConnector::new(http, endpoints)),
            dexscreener: Arc::new(DexScreenerConnector::new(http, endpoints)),
            pump: Arc::new(PumpConnector::new(http, endpoints).with_candle_limit(candle_limit)),
            geckoterminal: Arc::new(GeckoTerminalConnector::new(http, endpoints)),
        }
    }
}
