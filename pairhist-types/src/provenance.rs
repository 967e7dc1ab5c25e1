//! Provenance of a resolution: which provider answered what.

use serde::{Deserialize, Serialize};

/// Result of a single provider lookup, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The provider returned at least one usable record.
    Hit,
    /// The provider answered but had nothing for the query.
    Empty,
    /// The call failed at the provider boundary.
    Failed,
}

/// Per-provider outcomes collected while resolving a query.
///
/// Behavior:
/// - Built by the identity resolver in the order lookups complete.
/// - A provider may appear more than once (e.g. the launch-platform retry with
///   the ticker suffix); [`Provenance::outcome`] reports the best one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// Query the provenance refers to.
    pub query: String,
    /// Collected outcomes annotated by provider name.
    pub entries: Vec<(&'static str, Outcome)>,
}

impl Provenance {
    /// Create a new provenance container for a query.
    #[must_use]
    pub const fn new(query: String) -> Self {
        Self {
            query,
            entries: vec![],
        }
    }

    /// Record a provider outcome.
    pub fn push(&mut self, provider: &'static str, outcome: Outcome) {
        self.entries.push((provider, outcome));
    }

    /// Best outcome recorded for `provider` (`Hit` beats `Empty` beats `Failed`).
    #[must_use]
    pub fn outcome(&self, provider: &str) -> Option<Outcome> {
        let rank = |o: Outcome| match o {
            Outcome::Hit => 2,
            Outcome::Empty => 1,
            Outcome::Failed => 0,
        };
        self.entries
            .iter()
            .filter(|(name, _)| *name == provider)
            .map(|(_, o)| *o)
            .max_by_key(|o| rank(*o))
    }

    /// True when `provider` produced data.
    #[must_use]
    pub fn has_data(&self, provider: &str) -> bool {
        self.outcome(provider) == Some(Outcome::Hit)
    }
}
