//! Field assembly from graph observations.
//!
//! The container lookup yields `(graph, field)` entries; the attribute
//! lookup yields rows of optional bindings. Rows merge into one canonical
//! field under two rules, one per attribute cardinality:
//! - single-valued attributes keep the first observation and warn on a
//!   differing re-observation
//! - multi-valued attributes accumulate distinct values in observation
//!   order, staying scalar until a second value arrives
//!
//! Query patterns collect per kind under the single-valued rule and are
//! emitted in the fixed kind order. Nothing in here raises on conflicting
//! data; only store access itself can fail.

use std::collections::BTreeMap;

use semfield_model::field::{Field, OneOrMany, QueryEntry, QueryKind, Scalar};

use crate::error::StoreError;
use crate::ns::Namespaces;
use crate::term::{FieldEntry, Row};

/// Variable names bound by the attribute lookup.
pub mod var {
    use semfield_model::field::QueryKind;

    pub const LABEL: &str = "label";
    pub const DESCRIPTION: &str = "description";
    pub const DOMAIN: &str = "domain";
    pub const RANGE: &str = "range";
    pub const DATATYPE: &str = "datatype";
    pub const MIN_OCCURS: &str = "minOccurs";
    pub const MAX_OCCURS: &str = "maxOccurs";
    pub const ORDER: &str = "order";
    pub const DEFAULT_VALUE: &str = "defaultValue";

    /// Variable carrying the pattern text for a query kind.
    pub fn pattern(kind: QueryKind) -> String {
        format!("{}Pattern", kind.key())
    }
}

/// Source of field definition rows: a parsed TriG store or a live endpoint.
pub trait FieldStore {
    /// Every `(graph, field)` pair announced by a field definition
    /// container, in store order.
    fn field_entries(&self, ns: &Namespaces) -> Result<Vec<FieldEntry>, StoreError>;

    /// Attribute binding rows for one field. Empty means the definition is
    /// missing its required pieces.
    fn field_rows(&self, entry: &FieldEntry, ns: &Namespaces) -> Result<Vec<Row>, StoreError>;
}

// ============================================================================
// Merge rules
// ============================================================================

/// Single-valued attributes: first observation wins.
fn set_once<T>(slot: &mut Option<T>, value: T, field: &str, attribute: &str)
where
    T: PartialEq + std::fmt::Display,
{
    match slot {
        None => *slot = Some(value),
        Some(existing) if *existing != value => {
            tracing::warn!(
                field = %field,
                attribute = %attribute,
                kept = %existing,
                ignored = %value,
                "conflicting attribute observation, keeping the first value"
            );
        }
        Some(_) => {}
    }
}

/// Multi-valued attributes: scalar on first sight, promoted to a list on a
/// second distinct observation; equal repeats are dropped.
fn set_or_append(slot: &mut Option<OneOrMany>, value: Scalar) {
    match slot {
        None => *slot = Some(OneOrMany::One(value)),
        Some(existing) => existing.push_distinct(value),
    }
}

fn set_once_pattern(
    patterns: &mut BTreeMap<QueryKind, String>,
    kind: QueryKind,
    text: String,
    field: &str,
) {
    match patterns.get(&kind) {
        None => {
            patterns.insert(kind, text);
        }
        Some(existing) if *existing != text => {
            tracing::warn!(
                field = %field,
                query = %kind,
                "conflicting query pattern observation, keeping the first text"
            );
        }
        Some(_) => {}
    }
}

/// Merge attribute rows into one canonical field.
///
/// Returns `None` when no row carries a label; such a definition is not
/// renderable and the caller drops it.
pub fn merge_field_rows(id: &str, rows: &[Row], ns: &Namespaces) -> Option<Field> {
    let mut label: Option<String> = None;
    let mut description: Option<String> = None;
    let mut datatype: Option<String> = None;
    let mut min_occurs: Option<Scalar> = None;
    let mut max_occurs: Option<Scalar> = None;
    let mut order: Option<Scalar> = None;
    let mut domain: Option<OneOrMany> = None;
    let mut range: Option<OneOrMany> = None;
    let mut default_value: Option<OneOrMany> = None;
    let mut patterns: BTreeMap<QueryKind, String> = BTreeMap::new();

    for row in rows {
        if let Some(term) = row.get(var::LABEL) {
            set_once(&mut label, term.to_attribute(ns), id, var::LABEL);
        }
        if let Some(term) = row.get(var::DESCRIPTION) {
            set_once(&mut description, term.to_attribute(ns), id, var::DESCRIPTION);
        }
        if let Some(term) = row.get(var::DATATYPE) {
            set_once(&mut datatype, term.to_attribute(ns), id, var::DATATYPE);
        }
        if let Some(term) = row.get(var::MIN_OCCURS) {
            set_once(
                &mut min_occurs,
                Scalar::Str(term.to_attribute(ns)),
                id,
                var::MIN_OCCURS,
            );
        }
        if let Some(term) = row.get(var::MAX_OCCURS) {
            set_once(
                &mut max_occurs,
                Scalar::Str(term.to_attribute(ns)),
                id,
                var::MAX_OCCURS,
            );
        }
        if let Some(term) = row.get(var::ORDER) {
            set_once(&mut order, Scalar::Str(term.to_attribute(ns)), id, var::ORDER);
        }
        if let Some(term) = row.get(var::DOMAIN) {
            set_or_append(&mut domain, Scalar::Str(term.to_attribute(ns)));
        }
        if let Some(term) = row.get(var::RANGE) {
            set_or_append(&mut range, Scalar::Str(term.to_attribute(ns)));
        }
        if let Some(term) = row.get(var::DEFAULT_VALUE) {
            set_or_append(&mut default_value, Scalar::Str(term.to_attribute(ns)));
        }
        for kind in QueryKind::ALL {
            if let Some(term) = row.get(&var::pattern(kind)) {
                set_once_pattern(&mut patterns, kind, term.to_attribute(ns), id);
            }
        }
    }

    let label = label?;

    let mut field = Field::new(id, label);
    field.description = description;
    field.domain = domain;
    field.range = range;
    field.default_value = default_value;
    field.datatype = datatype;
    field.min_occurs = min_occurs;
    field.max_occurs = max_occurs;
    field.order = order;
    field.queries = patterns
        .into_iter()
        .map(|(kind, text)| QueryEntry::new(kind, text))
        .collect();
    Some(field)
}

// ============================================================================
// Read pipeline
// ============================================================================

/// Read every field the store announces, in container order.
///
/// Fields with no attribute rows are logged as errors and dropped; a field
/// announced more than once is logged as a duplicate and its rows are
/// merged. `id_prefix` is stripped from field URIs so stored ids stay
/// prefix-relative.
pub fn read_fields(
    store: &dyn FieldStore,
    ns: &Namespaces,
    id_prefix: Option<&str>,
) -> Result<Vec<Field>, StoreError> {
    let entries = store.field_entries(ns)?;
    tracing::info!(count = entries.len(), platform = %ns.platform().name(), "found field definitions");

    // Group entries by field identity, preserving first-seen order.
    let mut groups: Vec<(String, Vec<FieldEntry>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(field, _)| *field == entry.field) {
            Some((field, group)) => {
                tracing::warn!(field = %field, "duplicate field definition, merging observations");
                group.push(entry);
            }
            None => groups.push((entry.field.clone(), vec![entry])),
        }
    }

    let mut fields = Vec::new();
    for (field_uri, group) in &groups {
        let mut rows = Vec::new();
        for entry in group {
            rows.extend(store.field_rows(entry, ns)?);
        }
        if rows.is_empty() {
            tracing::error!(field = %field_uri, "field definition not found, skipping");
            continue;
        }
        let id = strip_id_prefix(field_uri, id_prefix);
        match merge_field_rows(&id, &rows, ns) {
            Some(field) => {
                tracing::debug!(field = %id, "read field definition");
                fields.push(field);
            }
            None => {
                tracing::error!(field = %field_uri, "field definition has no label, skipping");
            }
        }
    }
    Ok(fields)
}

fn strip_id_prefix(uri: &str, id_prefix: Option<&str>) -> String {
    match id_prefix {
        Some(prefix) if !prefix.is_empty() => {
            uri.strip_prefix(prefix).unwrap_or(uri).to_string()
        }
        _ => uri.to_string(),
    }
}
