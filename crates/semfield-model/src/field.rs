//! Field definition records and their YAML shape.
//!
//! The on-disk source is a YAML document with a required `fields` sequence
//! and an optional collection-scoped `prefix`:
//!
//! ```yaml
//! prefix: "http://example.org/fields/"
//! fields:
//! - id: birthplace
//!   label: Birthplace
//!   domain: http://www.cidoc-crm.org/cidoc-crm/E21_Person
//!   range:
//!   - http://www.cidoc-crm.org/cidoc-crm/E53_Place
//!   queries:
//!   - select: "SELECT ?value WHERE { $subject crm:P98i_was_born ?value }"
//! ```
//!
//! Multi-valued attributes (`domain`, `range`, `defaultValue`) accept either
//! a bare scalar or a sequence; see [`OneOrMany`]. Unknown attribute keys
//! are rejected at load time so a typo fails fast instead of vanishing on
//! the next write.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Scalar values
// ============================================================================

/// A YAML scalar preserved as written.
///
/// Cardinality bounds and ordering hints are numbers in some source files
/// and strings (`"unbound"`) in others; keeping the original scalar kind
/// means a read/write cycle does not retype them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

/// Scalar-or-sequence value for the multi-valued field attributes.
///
/// Source files may write `domain: X` or `domain: [X, Y]`. The canonical
/// form produced by normalization is always the sequence form; the graph
/// reader keeps singletons in scalar form so written YAML stays compact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl OneOrMany {
    /// All values in source order, regardless of representation.
    pub fn values(&self) -> &[Scalar] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(vs) => vs,
        }
    }

    /// The sequence representation of this value.
    pub fn into_sequence(self) -> OneOrMany {
        match self {
            OneOrMany::One(v) => OneOrMany::Many(vec![v]),
            many => many,
        }
    }

    /// Append `value` unless an equal value is already present, promoting a
    /// scalar representation to a sequence when a second value arrives.
    pub fn push_distinct(&mut self, value: Scalar) {
        if self.values().contains(&value) {
            return;
        }
        match self {
            OneOrMany::One(first) => {
                let first = first.clone();
                *self = OneOrMany::Many(vec![first, value]);
            }
            OneOrMany::Many(vs) => vs.push(value),
        }
    }
}

// ============================================================================
// Query patterns
// ============================================================================

/// Mapping keys of [`QueryKind`], in emission order.
pub const QUERY_KEYS: &[&str] = &[
    "select",
    "insert",
    "delete",
    "ask",
    "autosuggestion",
    "valueSet",
];

/// The closed set of query pattern types a field may carry.
///
/// The derived ordering is the order entries are emitted into `queries`
/// when a field is assembled from graph observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QueryKind {
    Select,
    Insert,
    Delete,
    Ask,
    Autosuggestion,
    ValueSet,
}

impl QueryKind {
    pub const ALL: [QueryKind; 6] = [
        QueryKind::Select,
        QueryKind::Insert,
        QueryKind::Delete,
        QueryKind::Ask,
        QueryKind::Autosuggestion,
        QueryKind::ValueSet,
    ];

    /// The YAML mapping key for this kind.
    pub fn key(self) -> &'static str {
        match self {
            QueryKind::Select => "select",
            QueryKind::Insert => "insert",
            QueryKind::Delete => "delete",
            QueryKind::Ask => "ask",
            QueryKind::Autosuggestion => "autosuggestion",
            QueryKind::ValueSet => "valueSet",
        }
    }

    pub fn from_key(key: &str) -> Option<QueryKind> {
        match key {
            "select" => Some(QueryKind::Select),
            "insert" => Some(QueryKind::Insert),
            "delete" => Some(QueryKind::Delete),
            "ask" => Some(QueryKind::Ask),
            "autosuggestion" => Some(QueryKind::Autosuggestion),
            "valueSet" => Some(QueryKind::ValueSet),
            _ => None,
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One entry of a field's `queries` sequence.
///
/// Serialized as a single-key mapping (`- select: "…"`), which is the shape
/// both platforms and the YAML sources use. Hand-written serde impls keep
/// that shape; a derived enum would serialize as a YAML tag instead.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEntry {
    pub kind: QueryKind,
    pub text: String,
}

impl QueryEntry {
    pub fn new(kind: QueryKind, text: impl Into<String>) -> Self {
        QueryEntry {
            kind,
            text: text.into(),
        }
    }
}

impl Serialize for QueryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.kind.key(), &self.text)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for QueryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = QueryEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a single-key mapping from a query type to its pattern text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<QueryEntry, A::Error> {
                let (key, text): (String, String) = map
                    .next_entry()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let kind = QueryKind::from_key(&key)
                    .ok_or_else(|| de::Error::custom(format!("unknown query type `{key}`")))?;
                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::custom(
                        "query entry must have exactly one key",
                    ));
                }
                Ok(QueryEntry { kind, text })
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

// ============================================================================
// Fields and documents
// ============================================================================

/// One semantic field definition.
///
/// `id` and `label` are mandatory; their absence makes the source document
/// unloadable. Every other attribute is optional, and absent keys stay
/// absent across a read/write cycle. Struct order here is the order the
/// writer emits keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<OneOrMany>,
    #[serde(
        rename = "defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "minOccurs", default, skip_serializing_if = "Option::is_none")]
    pub min_occurs: Option<Scalar>,
    #[serde(rename = "maxOccurs", default, skip_serializing_if = "Option::is_none")]
    pub max_occurs: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<QueryEntry>,
    #[serde(
        rename = "treePatterns",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tree_patterns: BTreeMap<String, String>,
}

impl Field {
    /// A field with only the mandatory attributes set.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Field {
            id: id.into(),
            label: label.into(),
            description: None,
            domain: None,
            range: None,
            default_value: None,
            datatype: None,
            min_occurs: None,
            max_occurs: None,
            order: None,
            queries: Vec::new(),
            tree_patterns: BTreeMap::new(),
        }
    }

    /// Pattern text for `kind`, if this field carries one.
    pub fn query_text(&self, kind: QueryKind) -> Option<&str> {
        self.queries
            .iter()
            .find(|entry| entry.kind == kind)
            .map(|entry| entry.text.as_str())
    }
}

/// An ordered collection of field definitions plus the optional
/// collection-scoped identifier prefix.
///
/// The prefix is prepended to every field id when definitions are rendered
/// or written out; `fields` order is preserved everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub fields: Vec<Field>,
}

impl FieldDocument {
    pub fn new(fields: Vec<Field>) -> Self {
        FieldDocument {
            prefix: None,
            fields,
        }
    }

    /// The prefix as rendered in front of field ids (empty when unset).
    pub fn prefix_str(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }

    /// External identifier of `field`: collection prefix + field id.
    pub fn external_id(&self, field: &Field) -> String {
        format!("{}{}", self.prefix_str(), field.id)
    }
}

// ============================================================================
// Tests
// ============================================================================
