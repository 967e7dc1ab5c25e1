use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the pairhist workspace.
///
/// The first four variants form the provider-boundary taxonomy: they are
/// produced by a provider client call and are always downgraded to "no data
/// from this source" by the resolver and the candle fetcher. The remaining
/// variants cover builder validation, missing connector roles and sink I/O.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PairhistError {
    /// Connection, DNS or timeout failure before a response was received.
    #[error("{provider} transport failed: {msg}")]
    Transport {
        /// Provider whose request failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The provider answered with a non-2xx status.
    #[error("{provider} returned HTTP {status}")]
    HttpStatus {
        /// Provider that answered.
        provider: String,
        /// Status code received.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("{provider} returned malformed JSON: {msg}")]
    Decode {
        /// Provider that answered.
        provider: String,
        /// Decoder message.
        msg: String,
    },

    /// JSON decoded, but an expected field was absent or had the wrong shape.
    #[error("{provider} response is missing {what}")]
    Structural {
        /// Provider that answered.
        provider: String,
        /// Description of the missing field, e.g. "data.candles".
        what: String,
    },

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The connector does not implement the requested role.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "candles").
        capability: String,
    },

    /// Filesystem or console I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

impl PairhistError {
    /// Helper: build a `Transport` error.
    pub fn transport(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `HttpStatus` error.
    pub fn http_status(provider: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            provider: provider.into(),
            status,
        }
    }

    /// Helper: build a `Decode` error.
    pub fn decode(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Decode {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Structural` error naming the missing field.
    pub fn structural(provider: impl Into<String>, what: impl Into<String>) -> Self {
        Self::Structural {
            provider: provider.into(),
            what: what.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// True for the four provider-boundary kinds, which callers treat as
    /// "provider returned nothing".
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::HttpStatus { .. }
                | Self::Decode { .. }
                | Self::Structural { .. }
        )
    }

    /// Provider name carried by a provider-boundary error, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Transport { provider, .. }
            | Self::HttpStatus { provider, .. }
            | Self::Decode { provider, .. }
            | Self::Structural { provider, .. } => Some(provider),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PairhistError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
