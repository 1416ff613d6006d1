//! Graph-store read side for semantic field definitions.
//!
//! Both supported platforms publish field definitions the same way: a
//! field-definition container `ldp:contains` each field, every field lives
//! in its own named graph together with the container statement, and the
//! field's attributes hang off platform-specific predicates (label and
//! comment come from rdfs, query patterns sit behind `sp:text` nodes).
//!
//! Reading is a two-step pipeline:
//! 1. enumerate `(graph, field)` pairs from the container statements
//! 2. fetch attribute binding rows per field and merge them into one
//!    canonical [`semfield_model::Field`]
//!
//! Two stores answer those lookups: [`MemoryStore`] parses TriG files into
//! a statement list, and [`SparqlEndpoint`] (feature `endpoint`, on by
//! default) runs the equivalent SPARQL against a live repository. The
//! merge rules live in [`reader`] and are store-agnostic.

#[cfg(feature = "endpoint")]
pub mod endpoint;
pub mod error;
pub mod memory;
pub mod ns;
pub mod reader;
pub mod term;
pub mod vocab;

#[cfg(feature = "endpoint")]
pub use endpoint::{EndpointConfig, SparqlEndpoint};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use ns::{Namespaces, Platform};
pub use reader::{read_fields, FieldStore};
pub use term::{FieldEntry, Row, Term};
