//! SPARQL protocol client for reading definitions from a live repository.
//!
//! Platform installations expose their repositories over the SPARQL
//! protocol; field definitions live in the assets repository, selected
//! with a `repository` query parameter and usually guarded by basic auth.
//! The client runs the same two lookups the memory store answers, as
//! textual SPARQL built from the shared namespace table, and parses
//! `application/sparql-results+json` answers.

use std::collections::BTreeMap;

use serde::Deserialize;

use semfield_model::field::QueryKind;

use crate::error::StoreError;
use crate::ns::Namespaces;
use crate::reader::{var, FieldStore};
use crate::term::{FieldEntry, Row, Term};

/// Connection settings for a SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub uri: String,
    pub repository: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// A field definition store backed by a SPARQL endpoint.
pub struct SparqlEndpoint {
    client: reqwest::blocking::Client,
    config: EndpointConfig,
}

impl SparqlEndpoint {
    pub fn new(config: EndpointConfig) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|source| StoreError::Http { source })?;
        Ok(SparqlEndpoint { client, config })
    }

    fn select(&self, query: &str) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(endpoint = %self.config.uri, "running SPARQL select");
        let mut request = self
            .client
            .get(&self.config.uri)
            .header(reqwest::header::ACCEPT, "application/sparql-results+json")
            .query(&[("query", query)]);
        if let Some(repository) = &self.config.repository {
            request = request.query(&[("repository", repository.as_str())]);
        }
        if let Some(user) = &self.config.user {
            request = request.basic_auth(user, self.config.password.as_deref());
        }
        let response = request.send().map_err(|source| StoreError::Http { source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::EndpointStatus {
                uri: self.config.uri.clone(),
                status: status.as_u16(),
            });
        }
        let body: SelectResponse = response
            .json()
            .map_err(|source| StoreError::Http { source })?;
        Ok(body.into_rows())
    }
}

impl FieldStore for SparqlEndpoint {
    fn field_entries(&self, ns: &Namespaces) -> Result<Vec<FieldEntry>, StoreError> {
        let rows = self.select(&container_query(ns))?;
        let mut entries: Vec<FieldEntry> = Vec::new();
        for row in rows {
            let (Some(Term::Uri(graph)), Some(Term::Uri(field))) =
                (row.get("graph"), row.get("field"))
            else {
                tracing::debug!("skipping container row without graph/field URIs");
                continue;
            };
            let entry = FieldEntry {
                graph: graph.clone(),
                field: field.clone(),
            };
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn field_rows(&self, entry: &FieldEntry, ns: &Namespaces) -> Result<Vec<Row>, StoreError> {
        self.select(&attributes_query(ns, entry))
    }
}

// ============================================================================
// Lookup texts
// ============================================================================

fn container_query(ns: &Namespaces) -> String {
    format!(
        "{}SELECT ?graph ?field WHERE {{\n  GRAPH ?graph {{\n    fieldcon:fieldDefinitionContainer ldp:contains ?field .\n    ?field a fielddef:Field .\n  }}\n}}",
        ns.sparql_prologue()
    )
}

fn attributes_query(ns: &Namespaces, entry: &FieldEntry) -> String {
    let mut query = ns.sparql_prologue();
    query.push_str("SELECT * WHERE {\n");
    query.push_str(&format!("  GRAPH <{}> {{\n", entry.graph));
    query.push_str(&format!(
        "    <{}> rdfs:label ?{} .\n",
        entry.field,
        var::LABEL
    ));
    let optionals = [
        format!("rdfs:comment ?{}", var::DESCRIPTION),
        format!("fielddef:domain ?{}", var::DOMAIN),
        format!("fielddef:range ?{}", var::RANGE),
        format!("fielddef:xsdDatatype ?{}", var::DATATYPE),
        format!("fielddef:minOccurs ?{}", var::MIN_OCCURS),
        format!("fielddef:maxOccurs ?{}", var::MAX_OCCURS),
        format!("fielddef:order ?{}", var::ORDER),
        format!("fielddef:defaultValue ?{}", var::DEFAULT_VALUE),
    ];
    for pattern in optionals {
        query.push_str(&format!(
            "    OPTIONAL {{ <{}> {} . }}\n",
            entry.field, pattern
        ));
    }
    for kind in QueryKind::ALL {
        query.push_str(&format!(
            "    OPTIONAL {{ <{}> fielddef:{}Pattern / sp:text ?{} . }}\n",
            entry.field,
            kind.key(),
            var::pattern(kind)
        ));
    }
    query.push_str("  }\n}");
    query
}

// ============================================================================
// SPARQL Results JSON
// ============================================================================

#[derive(Debug, Deserialize)]
struct SelectResponse {
    results: SelectResults,
}

#[derive(Debug, Deserialize)]
struct SelectResults {
    bindings: Vec<BTreeMap<String, SelectBinding>>,
}

#[derive(Debug, Deserialize)]
struct SelectBinding {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

impl SelectResponse {
    fn into_rows(self) -> Vec<Row> {
        self.results
            .bindings
            .into_iter()
            .map(|binding| {
                binding
                    .into_iter()
                    .map(|(name, term)| {
                        let term = if term.kind == "uri" {
                            Term::Uri(term.value)
                        } else {
                            Term::Literal(term.value)
                        };
                        (name, term)
                    })
                    .collect()
            })
            .collect()
    }
}
