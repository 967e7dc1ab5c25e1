use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pairhist_core::{
    HttpResponse, PairhistError, ProviderClient, ProviderKey, Transport, TransportError,
    UserAgentSource,
};
use rand::seq::IndexedRandom;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Per-request timeout of the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CHROME_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
];

/// User agents drawn at random from a pool of desktop Chrome strings.
#[derive(Debug, Clone)]
pub struct RotatingUserAgents {
    pool: Vec<String>,
}

impl RotatingUserAgents {
    /// Use a caller-supplied pool.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `pool` is empty.
    pub fn with_pool(pool: Vec<String>) -> Result<Self, PairhistError> {
        if pool.is_empty() {
            return Err(PairhistError::InvalidArg(
                "user-agent pool must not be empty".into(),
            ));
        }
        Ok(Self { pool })
    }
}

impl Default for RotatingUserAgents {
    fn default() -> Self {
        Self {
            pool: CHROME_AGENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl UserAgentSource for RotatingUserAgents {
    fn user_agent(&self) -> String {
        self.pool
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }
}

/// Default transport over two `reqwest` clients.
///
/// The anti-bot client sends the header set a desktop browser sends on a
/// navigation request. It does not change the TLS fingerprint.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    plain: reqwest::Client,
    anti_bot: reqwest::Client,
}

impl ReqwestTransport {
    /// Build both clients with `timeout` per request.
    ///
    /// # Errors
    /// Returns `Transport` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, PairhistError> {
        let build_err = |e: reqwest::Error| PairhistError::transport("http", e.to_string());
        let plain = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(build_err)?;
        let anti_bot = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(browser_headers())
            .build()
            .map_err(build_err)?;
        Ok(Self { plain, anti_bot })
    }

    /// Wrap pre-built clients.
    #[must_use]
    pub const fn from_clients(plain: reqwest::Client, anti_bot: reqwest::Client) -> Self {
        Self { plain, anti_bot }
    }
}

fn browser_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    for (name, value) in [
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"Windows\""),
        ("sec-fetch-dest", "empty"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-site", "same-origin"),
    ] {
        h.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    h
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
        bypass_anti_bot: bool,
    ) -> Result<HttpResponse, TransportError> {
        let client = if bypass_anti_bot {
            &self.anti_bot
        } else {
            &self.plain
        };
        let mut req = client.get(url.clone());
        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }
        let resp = req.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Transport and user-agent source shared by every connector.
#[derive(Clone)]
pub struct HttpStack {
    /// GET collaborator.
    pub transport: Arc<dyn Transport>,
    /// User-agent collaborator.
    pub user_agents: Arc<dyn UserAgentSource>,
}

impl HttpStack {
    /// Bundle custom collaborators.
    pub fn new(transport: Arc<dyn Transport>, user_agents: Arc<dyn UserAgentSource>) -> Self {
        Self {
            transport,
            user_agents,
        }
    }

    /// `ReqwestTransport` with [`DEFAULT_TIMEOUT`] and rotating Chrome agents.
    ///
    /// # Errors
    /// Returns `Transport` if the HTTP clients cannot be built.
    pub fn try_default() -> Result<Self, PairhistError> {
        Ok(Self::new(
            Arc::new(ReqwestTransport::new(DEFAULT_TIMEOUT)?),
            Arc::new(RotatingUserAgents::default()),
        ))
    }

    /// A provider client tagged with `key`.
    #[must_use]
    pub fn client(&self, key: ProviderKey) -> ProviderClient {
        ProviderClient::new(
            key,
            Arc::clone(&self.transport),
            Arc::clone(&self.user_agents),
        )
    }
}

impl std::fmt::Debug for HttpStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStack").finish_non_exhaustive()
    }
}
