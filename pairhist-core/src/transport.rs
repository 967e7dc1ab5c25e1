use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use pairhist_types::{Endpoint, PairhistError, ProviderKey};

/// A raw HTTP answer: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

/// Failure before any response was received (connect, DNS, TLS, timeout).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP GET collaborator.
///
/// `bypass_anti_bot` selects the transport path that presents a browser-like
/// client profile; the plain path sends exactly the supplied headers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one GET request.
    async fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
        bypass_anti_bot: bool,
    ) -> Result<HttpResponse, TransportError>;
}

/// Supplies a realistic browser user agent on demand.
pub trait UserAgentSource: Send + Sync {
    /// A user-agent string for the next request.
    fn user_agent(&self) -> String;
}

/// The single provider client every connector sends its requests through.
///
/// One instance per provider: the provider key tags every error it returns.
/// All four failure kinds come back as `Err`; callers above the connector
/// layer downgrade them to "no data from this source".
#[derive(Clone)]
pub struct ProviderClient {
    key: ProviderKey,
    transport: Arc<dyn Transport>,
    user_agents: Arc<dyn UserAgentSource>,
}

impl ProviderClient {
    /// Build a client for `key` over the given collaborators.
    pub fn new(
        key: ProviderKey,
        transport: Arc<dyn Transport>,
        user_agents: Arc<dyn UserAgentSource>,
    ) -> Self {
        Self {
            key,
            transport,
            user_agents,
        }
    }

    /// Provider this client speaks for.
    #[must_use]
    pub const fn key(&self) -> ProviderKey {
        self.key
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// When `headers` is `None` a single `User-Agent` header is sent; when
    /// headers are supplied without a `User-Agent`, one is added.
    ///
    /// # Errors
    /// - `Transport` if no response was received.
    /// - `HttpStatus` for any non-2xx status.
    /// - `Decode` if the body is not JSON.
    #[tracing::instrument(
        name = "pairhist::provider::fetch",
        skip_all,
        fields(provider = self.key.as_str(), url = %url, anti_bot = bypass_anti_bot),
    )]
    pub async fn fetch(
        &self,
        url: &Url,
        headers: Option<&[(String, String)]>,
        bypass_anti_bot: bool,
    ) -> Result<serde_json::Value, PairhistError> {
        let mut sent: Vec<(String, String)> = headers.map(<[_]>::to_vec).unwrap_or_default();
        if !sent
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
        {
            sent.push(("User-Agent".to_string(), self.user_agents.user_agent()));
        }

        let resp = self
            .transport
            .get(url, &sent, bypass_anti_bot)
            .await
            .map_err(|e| PairhistError::transport(self.key.as_str(), e.0))?;

        if !(200..300).contains(&resp.status) {
            return Err(PairhistError::http_status(self.key.as_str(), resp.status));
        }

        serde_json::from_slice(&resp.body)
            .map_err(|e| PairhistError::decode(self.key.as_str(), e.to_string()))
    }

    /// GET `path` on `endpoint`, appending `query` pairs (percent-encoded) and
    /// sending the endpoint's headers over its transport path.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the endpoint URL does not parse, otherwise the
    /// errors of [`ProviderClient::fetch`].
    pub async fn fetch_endpoint(
        &self,
        endpoint: &Endpoint,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, PairhistError> {
        let mut url = Url::parse(&endpoint.url(path)).map_err(|e| {
            PairhistError::InvalidArg(format!("{} endpoint url: {e}", self.key.as_str()))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        let headers = (!endpoint.headers.is_empty()).then_some(endpoint.headers.as_slice());
        self.fetch(&url, headers, endpoint.anti_bot).await
    }
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
