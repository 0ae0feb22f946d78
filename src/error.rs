use std::path::PathBuf;

/// Failures reading a collector snapshot table.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("malformed collector summary {}: {source}", path.display())]
    Summary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures loading or validating a rules file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rules file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown category `{category}` in [[{section}]]")]
    UnknownCategory {
        section: &'static str,
        category: String,
    },

    #[error("duplicate token \"{token}\" for category `{category}` in [[{section}]]")]
    DuplicateToken {
        section: &'static str,
        category: String,
        token: String,
    },

    #[error("empty token for category `{category}` in [[{section}]]")]
    EmptyToken {
        section: &'static str,
        category: String,
    },

    #[error("voice_vlan_marker must not be empty")]
    EmptyVoiceMarker,
}

/// Failures writing the enriched output.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode CSV row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
}
