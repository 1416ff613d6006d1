//! Error types for source loading, merging, and writing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, merging, or writing YAML source documents.
///
/// All of these are fatal for the invocation that hit them; per-field
/// recoverable conditions (conflicting attribute observations, fields
/// missing from a graph) are logged by the graph reader instead of raised.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse field definitions in {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid field definition document")]
    Parse(#[source] serde_yaml::Error),

    #[error("failed to serialize field definitions")]
    Serialize(#[source] serde_yaml::Error),

    #[error("fragment {} declares prefix {found:?}, but an earlier fragment declared {existing:?}", .path.display())]
    PrefixConflict {
        path: PathBuf,
        existing: String,
        found: String,
    },
}
