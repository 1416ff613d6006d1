//! Error types for graph access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening stores or running lookups.
///
/// These abort the invocation. Conditions the reader recovers from
/// (attribute conflicts, missing definitions) are logged instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TriG from {origin}: {detail}")]
    TrigParse { origin: String, detail: String },

    #[error("malformed RDF term: {term}")]
    Term { term: String },

    #[cfg(feature = "endpoint")]
    #[error("SPARQL endpoint request failed")]
    Http {
        #[source]
        source: reqwest::Error,
    },

    #[cfg(feature = "endpoint")]
    #[error("SPARQL endpoint {uri} answered with status {status}")]
    EndpointStatus { uri: String, status: u16 },
}
