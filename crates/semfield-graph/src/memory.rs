//! In-memory statement store parsed from TriG.
//!
//! Platform exports ship field definitions as TriG, one named graph per
//! field. The store keeps a flat statement list in file order and answers
//! the two fixed lookups by direct matching; with a handful of fields per
//! file there is nothing to index.

use std::fs;
use std::path::{Path, PathBuf};

use sophia::api::prelude::*;

use semfield_model::field::QueryKind;

use crate::error::StoreError;
use crate::ns::Namespaces;
use crate::reader::{var, FieldStore};
use crate::term::{FieldEntry, Row, Term};
use crate::vocab;

// ============================================================================
// Statement model
// ============================================================================

/// IRI or blank node (subject and graph positions).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Iri(String),
    Blank(String),
}

/// Object position. Literals are reduced to their lexical form; language
/// tags and datatype annotations carry no meaning for field attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Object {
    Node(Node),
    Literal(String),
}

#[derive(Debug, Clone)]
struct Statement {
    graph: Option<Node>,
    subject: Node,
    predicate: String,
    object: Object,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct TrigSinkError {
    message: String,
}

impl From<StoreError> for TrigSinkError {
    fn from(value: StoreError) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

// ============================================================================
// Term display parsing
// ============================================================================

fn unescape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parse a term from its N-Triples-ish display form: `<iri>`, `_:bnode`,
/// or `"lexical"` with an optional `@lang` / `^^<datatype>` tail.
fn parse_term_display(term: &str) -> Result<Object, StoreError> {
    let s = term.trim();

    if let Some(iri) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(Object::Node(Node::Iri(iri.to_string())));
    }

    if let Some(label) = s.strip_prefix("_:") {
        return Ok(Object::Node(Node::Blank(label.to_string())));
    }

    if s.starts_with('"') {
        let mut end_quote = None;
        let mut prev_was_escape = false;
        for (i, ch) in s.char_indices().skip(1) {
            if ch == '"' && !prev_was_escape {
                end_quote = Some(i);
                break;
            }
            prev_was_escape = ch == '\\' && !prev_was_escape;
        }
        let Some(end) = end_quote else {
            return Err(StoreError::Term {
                term: s.to_string(),
            });
        };
        // The @lang / ^^datatype tail after the closing quote is dropped.
        return Ok(Object::Literal(unescape_literal(&s[1..end])));
    }

    Err(StoreError::Term {
        term: s.to_string(),
    })
}

fn parse_node_display(term: &str) -> Result<Node, StoreError> {
    match parse_term_display(term)? {
        Object::Node(node) => Ok(node),
        Object::Literal(_) => Err(StoreError::Term {
            term: term.to_string(),
        }),
    }
}

fn parse_trig(bytes: &[u8], origin: &str) -> Result<Vec<Statement>, StoreError> {
    let reader = std::io::BufReader::new(std::io::Cursor::new(bytes));
    let mut out: Vec<Statement> = Vec::new();
    let mut parser = sophia::turtle::parser::trig::parse_bufread(reader);
    parser
        .try_for_each_quad(|q| -> std::result::Result<(), TrigSinkError> {
            let subject = parse_node_display(&q.s().to_string()).map_err(TrigSinkError::from)?;
            let predicate =
                match parse_node_display(&q.p().to_string()).map_err(TrigSinkError::from)? {
                    Node::Iri(iri) => iri,
                    Node::Blank(_) => return Ok(()),
                };
            let object = parse_term_display(&q.o().to_string()).map_err(TrigSinkError::from)?;
            let graph = q
                .g()
                .map(|g| parse_node_display(&g.to_string()).map_err(TrigSinkError::from))
                .transpose()?;
            out.push(Statement {
                graph,
                subject,
                predicate,
                object,
            });
            Ok(())
        })
        .map_err(|e| StoreError::TrigParse {
            origin: origin.to_string(),
            detail: e.to_string(),
        })?;
    Ok(out)
}

// ============================================================================
// Store
// ============================================================================

/// A TriG-backed field definition store.
#[derive(Debug)]
pub struct MemoryStore {
    statements: Vec<Statement>,
}

impl MemoryStore {
    /// Parse statements from TriG text.
    pub fn from_trig_str(text: &str) -> Result<Self, StoreError> {
        Ok(MemoryStore {
            statements: parse_trig(text.as_bytes(), "inline text")?,
        })
    }

    /// Load a single `.trig` file.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let bytes = fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let statements = parse_trig(&bytes, &path.display().to_string())?;
        tracing::debug!(
            file = %path.display(),
            statements = statements.len(),
            "parsed TriG file"
        );
        Ok(MemoryStore { statements })
    }

    /// Load every `*.trig` file in `dir`, in sorted file order.
    pub fn from_dir(dir: &Path) -> Result<Self, StoreError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("trig")
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            tracing::warn!(dir = %dir.display(), "no TriG files found");
        }

        let mut statements = Vec::new();
        for path in &paths {
            let bytes = fs::read(path).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            statements.extend(parse_trig(&bytes, &path.display().to_string())?);
        }
        Ok(MemoryStore { statements })
    }

    /// File-or-directory entry point.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_file(path)
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Distinct objects of `(graph, subject, predicate)` in statement order.
    fn objects(&self, graph: &Node, subject: &Node, predicate: &str) -> Vec<&Object> {
        let mut out: Vec<&Object> = Vec::new();
        for st in &self.statements {
            if st.graph.as_ref() == Some(graph)
                && st.subject == *subject
                && st.predicate == predicate
                && !out.iter().any(|o| **o == st.object)
            {
                out.push(&st.object);
            }
        }
        out
    }

    fn term_values(&self, graph: &Node, subject: &Node, predicate: &str) -> Vec<Term> {
        self.objects(graph, subject, predicate)
            .into_iter()
            .map(object_to_term)
            .collect()
    }

    /// Texts reached through `predicate` and then `sp:text`, in statement
    /// order (stored queries are nodes wrapping their SPARQL text).
    fn pattern_texts(&self, graph: &Node, subject: &Node, predicate: &str) -> Vec<Term> {
        let mut out: Vec<Term> = Vec::new();
        for object in self.objects(graph, subject, predicate) {
            let Object::Node(query_node) = object else {
                continue;
            };
            for text in self.objects(graph, query_node, vocab::sp::TEXT) {
                if let Object::Literal(lexical) = text {
                    let term = Term::Literal(lexical.clone());
                    if !out.contains(&term) {
                        out.push(term);
                    }
                }
            }
        }
        out
    }
}

fn object_to_term(object: &Object) -> Term {
    match object {
        Object::Node(Node::Iri(iri)) => Term::Uri(iri.clone()),
        Object::Node(Node::Blank(label)) => Term::Literal(label.clone()),
        Object::Literal(lexical) => Term::Literal(lexical.clone()),
    }
}

impl FieldStore for MemoryStore {
    fn field_entries(&self, ns: &Namespaces) -> Result<Vec<FieldEntry>, StoreError> {
        let container = Node::Iri(ns.fieldcon("fieldDefinitionContainer"));
        let field_type = Object::Node(Node::Iri(ns.fielddef("Field")));

        let mut entries: Vec<FieldEntry> = Vec::new();
        for st in &self.statements {
            if st.predicate != vocab::ldp::CONTAINS || st.subject != container {
                continue;
            }
            let Some(graph) = st.graph.as_ref() else {
                continue;
            };
            let Node::Iri(graph_iri) = graph else {
                continue;
            };
            let Object::Node(Node::Iri(field_iri)) = &st.object else {
                continue;
            };
            let typed = self.statements.iter().any(|t| {
                matches!(&t.subject, Node::Iri(s) if s == field_iri)
                    && t.predicate == vocab::rdf::TYPE
                    && t.graph.as_ref() == Some(graph)
                    && t.object == field_type
            });
            if !typed {
                continue;
            }
            let entry = FieldEntry {
                graph: graph_iri.clone(),
                field: field_iri.clone(),
            };
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn field_rows(&self, entry: &FieldEntry, ns: &Namespaces) -> Result<Vec<Row>, StoreError> {
        let graph = Node::Iri(entry.graph.clone());
        let field = Node::Iri(entry.field.clone());

        let labels = self.term_values(&graph, &field, vocab::rdfs::LABEL);
        if labels.is_empty() {
            // label is the one required binding; without it there are no rows
            return Ok(Vec::new());
        }

        let mut columns: Vec<(String, Vec<Term>)> = vec![
            (var::LABEL.to_string(), labels),
            (
                var::DESCRIPTION.to_string(),
                self.term_values(&graph, &field, vocab::rdfs::COMMENT),
            ),
            (
                var::DOMAIN.to_string(),
                self.term_values(&graph, &field, &ns.fielddef("domain")),
            ),
            (
                var::RANGE.to_string(),
                self.term_values(&graph, &field, &ns.fielddef("range")),
            ),
            (
                var::DATATYPE.to_string(),
                self.term_values(&graph, &field, &ns.fielddef("xsdDatatype")),
            ),
            (
                var::MIN_OCCURS.to_string(),
                self.term_values(&graph, &field, &ns.fielddef("minOccurs")),
            ),
            (
                var::MAX_OCCURS.to_string(),
                self.term_values(&graph, &field, &ns.fielddef("maxOccurs")),
            ),
            (
                var::ORDER.to_string(),
                self.term_values(&graph, &field, &ns.fielddef("order")),
            ),
            (
                var::DEFAULT_VALUE.to_string(),
                self.term_values(&graph, &field, &ns.fielddef("defaultValue")),
            ),
        ];
        for kind in QueryKind::ALL {
            let predicate = ns.fielddef(&format!("{}Pattern", kind.key()));
            columns.push((var::pattern(kind), self.pattern_texts(&graph, &field, &predicate)));
        }

        // Zip the observation columns: every observed value lands in some
        // row, in statement order, which is all the merge rules consume.
        let height = columns
            .iter()
            .map(|(_, values)| values.len())
            .max()
            .unwrap_or(0);
        let mut rows = Vec::with_capacity(height);
        for i in 0..height {
            let mut row = Row::new();
            for (name, values) in &columns {
                if let Some(term) = values.get(i) {
                    row.insert(name.clone(), term.clone());
                }
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iri_display_form() {
        let object = parse_term_display("<http://example.org/a>").expect("iri term");
        assert_eq!(object, Object::Node(Node::Iri("http://example.org/a".to_string())));
    }

    #[test]
    fn parses_blank_node_display_form() {
        let object = parse_term_display("_:b0").expect("bnode term");
        assert_eq!(object, Object::Node(Node::Blank("b0".to_string())));
    }

    #[test]
    fn parses_literal_and_drops_annotations() {
        let plain = parse_term_display("\"Birthplace\"").expect("plain literal");
        assert_eq!(plain, Object::Literal("Birthplace".to_string()));
        let tagged = parse_term_display("\"Geburtsort\"@de").expect("language literal");
        assert_eq!(tagged, Object::Literal("Geburtsort".to_string()));
        let typed = parse_term_display(
            "\"1\"^^<http://www.w3.org/2001/XMLSchema#integer>",
        )
        .expect("typed literal");
        assert_eq!(typed, Object::Literal("1".to_string()));
    }

    #[test]
    fn unescapes_literal_content() {
        let object = parse_term_display("\"line\\none \\\"quoted\\\"\"").expect("escaped literal");
        assert_eq!(object, Object::Literal("line\none \"quoted\"".to_string()));
    }

    #[test]
    fn rejects_malformed_terms() {
        let err = parse_term_display("\"unterminated").expect_err("missing quote");
        assert!(err.to_string().contains("malformed"), "err={err}");
        let err = parse_node_display("\"a literal\"").expect_err("literal as node");
        assert!(err.to_string().contains("malformed"), "err={err}");
    }
}
