//! Development-mode JSON snapshots.
//!
//! When enabled, retrieval writes the raw API payload and the simplified design
//! next to each other so the transform can be inspected. Writing a snapshot
//! never fails the retrieval that produced it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

/// File name for the raw API payload snapshot.
pub const RAW_SNAPSHOT: &str = "figma-raw.json";

/// File name for the simplified design snapshot.
pub const SIMPLIFIED_SNAPSHOT: &str = "figma-simplified.json";

/// Writes named JSON blobs to a logs directory when development mode is on.
#[derive(Debug, Clone)]
pub struct DiagnosticsSink {
    enabled: bool,
    dir: PathBuf,
}

impl DiagnosticsSink {
    /// Creates a sink writing into `dir` when `enabled` is true.
    #[must_use]
    pub fn new(enabled: bool, dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled,
            dir: dir.into(),
        }
    }

    /// Returns whether snapshots are written.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Writes `value` as pretty JSON to `<dir>/<name>`, replacing any previous file.
    ///
    /// Does nothing when disabled. Failures are logged and swallowed.
    pub async fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) {
        if !self.enabled {
            return;
        }
        let path = self.dir.join(name);
        match write_snapshot(&self.dir, &path, value).await {
            Ok(()) => debug!(path = %path.display(), "wrote diagnostics snapshot"),
            Err(error) => warn!(path = %path.display(), error = %error, "Failed to write logs"),
        }
    }
}

async fn write_snapshot<T: Serialize + ?Sized>(
    dir: &Path,
    path: &Path,
    value: &T,
) -> std::io::Result<()> {
    let json = serde_json::to_vec_pretty(value).map_err(std::io::Error::other)?;
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, json).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_disabled_sink_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");
        let sink = DiagnosticsSink::new(false, &dir);

        sink.write(RAW_SNAPSHOT, &json!({"name": "file"})).await;

        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_enabled_sink_creates_dir_and_writes_pretty_json() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");
        let sink = DiagnosticsSink::new(true, &dir);

        sink.write(SIMPLIFIED_SNAPSHOT, &json!({"name": "file", "nodes": []}))
            .await;

        let written = std::fs::read_to_string(dir.join(SIMPLIFIED_SNAPSHOT)).unwrap();
        assert!(written.contains('\n'), "expected pretty JSON: {written}");
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["name"], "file");
    }

    #[tokio::test]
    async fn test_unwritable_dir_is_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file in the way").unwrap();
        let sink = DiagnosticsSink::new(true, &blocker);

        sink.write(RAW_SNAPSHOT, &json!({})).await;

        assert!(blocker.is_file());
    }
}
