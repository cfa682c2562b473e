//! Errors for the non-gameplay edges of the engine.
//!
//! Gameplay outcomes (blocked, bypassed, not grounded, ...) are never errors;
//! hooks report them as `false` returns. These variants only cover parsing
//! identifiers, snapshots, configuration and move tables.

#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// A tag identifier did not name any known arena tag kind.
    #[error("unknown arena tag kind '{0}'")]
    UnknownTagKind(String),

    /// Snapshot text could not be parsed or written.
    #[error("invalid arena tag snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Configuration or move table YAML could not be parsed.
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A configuration or data file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
