//! Bound terms and lookup result rows.

use std::collections::BTreeMap;

use crate::ns::Namespaces;

/// One bound value in a lookup result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// An IRI-valued binding.
    Uri(String),
    /// A literal binding, reduced to its lexical form.
    Literal(String),
}

impl Term {
    /// The binding as written into a field attribute: URIs are compacted
    /// against the namespace table, literals keep their lexical form.
    pub fn to_attribute(&self, ns: &Namespaces) -> String {
        match self {
            Term::Uri(uri) => ns.compact(uri),
            Term::Literal(lexical) => lexical.clone(),
        }
    }
}

/// One result row: variable name to bound term. Absent means unbound.
pub type Row = BTreeMap<String, Term>;

/// One field announced by a definition container: the named graph holding
/// the definition and the field's URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub graph: String,
    pub field: String,
}
