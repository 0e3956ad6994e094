use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the search index.
///
/// A missing backing file is not an error (it reads as an empty index), and
/// a term that matches nothing returns an empty result. Everything else is
/// returned to the caller as a distinguishable value; the index itself never
/// terminates the process or logs.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The backing file exists but cannot be decoded.
    #[error("corrupt index file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An alias points at a versioned-name record that does not exist.
    #[error("index entry `{key}` references missing record `{target}`")]
    DanglingRef { key: String, target: String },

    /// The in-memory mapping failed to serialize.
    #[error("failed to encode index: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to {action} index file {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
