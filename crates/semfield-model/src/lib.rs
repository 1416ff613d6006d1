//! Canonical model for semantic form-field definitions.
//!
//! A field definition describes how one form field binds to an RDF graph:
//! which classes it applies to (`domain`), what it points at (`range`),
//! its literal datatype and cardinality bounds, and the SPARQL patterns a
//! platform runs to select, insert, delete, validate, or autosuggest
//! values for it.
//!
//! This crate owns the source-of-truth representation:
//! - [`field`]: the record types and their YAML serialization shape
//! - [`normalize`]: scalar-to-sequence normalization of multi-valued attributes
//! - [`source`]: YAML file and fragment-directory loading, plus the
//!   round-trip writer
//!
//! Reading definitions back out of a graph store and rendering them into
//! platform flavors live in sibling crates; both build on these types.

pub mod error;
pub mod field;
pub mod normalize;
pub mod source;

pub use error::ModelError;
pub use field::{Field, FieldDocument, OneOrMany, QueryEntry, QueryKind, Scalar};
