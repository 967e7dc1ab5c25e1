use std::sync::Mutex;

use pairhist_core::{OutputSink, PairhistError, PriceSeries, ProviderKey};

/// Sink that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    series: Mutex<Option<PriceSeries>>,
    snapshots: Mutex<Vec<(ProviderKey, serde_json::Value)>>,
    fail: bool,
}

impl MemorySink {
    /// A sink whose every write fails with `Io`.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// The last series written, if any.
    #[must_use]
    pub fn series(&self) -> Option<PriceSeries> {
        self.series.lock().ok().and_then(|s| s.clone())
    }

    /// Snapshots written so far, in order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<(ProviderKey, serde_json::Value)> {
        self.snapshots
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Snapshot written for `provider`, if any.
    #[must_use]
    pub fn snapshot(&self, provider: &str) -> Option<serde_json::Value> {
        self.snapshots()
            .into_iter()
            .find(|(k, _)| k.as_str() == provider)
            .map(|(_, v)| v)
    }

    fn check(&self) -> Result<(), PairhistError> {
        if self.fail {
            return Err(PairhistError::Io("memory sink configured to fail".into()));
        }
        Ok(())
    }
}

impl OutputSink for MemorySink {
    fn write_series(&self, series: &PriceSeries) -> Result<(), PairhistError> {
        self.check()?;
        let mut slot = self
            .series
            .lock()
            .map_err(|_| PairhistError::Io("memory sink poisoned".into()))?;
        *slot = Some(series.clone());
        Ok(())
    }

    fn write_snapshot(
        &self,
        provider: ProviderKey,
        raw: &serde_json::Value,
    ) -> Result<(), PairhistError> {
        self.check()?;
        self.snapshots
            .lock()
            .map_err(|_| PairhistError::Io("memory sink poisoned".into()))?
            .push((provider, raw.clone()));
        Ok(())
    }
}
