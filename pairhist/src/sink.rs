use std::fs;
use std::path::{Path, PathBuf};

use pairhist_core::{OutputConfig, OutputSink, PairhistError, PriceSeries, ProviderKey};

/// Sink writing pretty-printed JSON files into one directory.
///
/// The series goes to `OutputConfig::series_file`; each snapshot goes to
/// `<provider>.json`. Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    cfg: OutputConfig,
}

impl JsonFileSink {
    /// Sink for `cfg`.
    #[must_use]
    pub const fn new(cfg: OutputConfig) -> Self {
        Self { cfg }
    }

    /// Full path of the series file.
    #[must_use]
    pub fn series_path(&self) -> PathBuf {
        self.cfg.dir.join(&self.cfg.series_file)
    }

    fn write_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), PairhistError> {
        fs::create_dir_all(&self.cfg.dir)?;
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| PairhistError::Io(format!("serialize {}: {e}", path.display())))?;
        fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), "wrote json");
        Ok(())
    }
}

impl OutputSink for JsonFileSink {
    fn write_series(&self, series: &PriceSeries) -> Result<(), PairhistError> {
        let path = self.series_path();
        self.write_json(&path, series)?;
        tracing::info!(path = %path.display(), pairs = series.pairs.len(), "price series written");
        Ok(())
    }

    fn write_snapshot(
        &self,
        provider: ProviderKey,
        raw: &serde_json::Value,
    ) -> Result<(), PairhistError> {
        let path = self.cfg.dir.join(provider.snapshot_file());
        self.write_json(&path, raw)
    }
}
