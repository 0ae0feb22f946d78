use std::path::Path;

use serde::Deserialize;

use crate::error::SnapshotError;

pub(crate) const SUMMARY_FILE: &str = "_summary.json";

const STATUS_OK: &str = "ok";

/// Per-device outcome recorded by the collector in `_summary.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectorStatus {
    pub device: String,
    #[serde(default)]
    pub host: String,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl CollectorStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_OK)
    }
}

/// Read the collector summary. `Ok(None)` when the collector wrote none.
pub fn read_summary(path: &Path) -> Result<Option<Vec<CollectorStatus>>, SnapshotError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| SnapshotError::Summary {
            path: path.to_path_buf(),
            source,
        })
}

/// Log devices the collector failed to poll. Returns how many failed.
pub fn report_failures(statuses: &[CollectorStatus]) -> usize {
    let mut failed = 0;
    for status in statuses.iter().filter(|s| !s.is_ok()) {
        failed += 1;
        tracing::warn!(
            "Collector reported {} ({}) as {}: {}",
            status.device,
            status.host,
            status.status,
            status.error.as_deref().unwrap_or("no error detail")
        );
    }
    failed
}
