//! Template rendering over canonical field collections.
//!
//! The renderer owns one handlebars registry with all five flavor templates
//! registered up front. HTML escaping is disabled; the TriG templates quote
//! their own literals, and the JSON flavors get their quote escaping from
//! the dedicated pass below rather than from the engine.

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use serde_json::Value as Json;

use semfield_model::{Field, FieldDocument};

use crate::error::RenderError;
use crate::flavor::Flavor;

/// Format a bound attribute value as a TriG term: absolute URIs are
/// bracketed, prefixed names pass through, anything else becomes a plain
/// literal.
fn trig_term(value: &Json) -> String {
    match value {
        Json::String(s) => {
            if s.starts_with("http://") || s.starts_with("https://") || s.starts_with("urn:") {
                format!("<{s}>")
            } else if s.contains(':') && !s.contains(char::is_whitespace) {
                s.clone()
            } else {
                format!("\"{s}\"")
            }
        }
        Json::Bool(v) => format!("\"{v}\""),
        Json::Number(v) => format!("\"{v}\""),
        other => format!("\"{other}\""),
    }
}

handlebars_helper!(term: |value: Json| trig_term(value));

/// The context shape every flavor template receives.
#[derive(Serialize)]
struct RenderContext<'a> {
    prefix: &'a str,
    fields: &'a [Field],
    #[serde(rename = "extraNs", skip_serializing_if = "Option::is_none")]
    extra_ns: Option<&'a str>,
}

/// A preconfigured template registry for all five flavors.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.register_helper("term", Box::new(term));
        for flavor in Flavor::ALL {
            registry
                .register_template_string(flavor.template_name(), flavor.template_source())
                .map_err(RenderError::generate)?;
        }
        Ok(Renderer { registry })
    }

    /// Render the whole collection as one text unit.
    ///
    /// `extra_ns` is a raw namespace declaration token
    /// (`crm: <http://...>`) added to the TriG flavors' prefix header.
    pub fn render(
        &self,
        doc: &FieldDocument,
        flavor: Flavor,
        extra_ns: Option<&str>,
    ) -> Result<String, RenderError> {
        tracing::debug!(flavor = %flavor, fields = doc.fields.len(), "rendering field definitions");
        let prepared = prepare(doc, flavor);
        self.render_document(&prepared, flavor, extra_ns)
    }

    /// Render one text unit per field, as `(prefix + id, text)` pairs in
    /// original field order. The first template failure aborts the rest.
    pub fn render_split(
        &self,
        doc: &FieldDocument,
        flavor: Flavor,
        extra_ns: Option<&str>,
    ) -> Result<Vec<(String, String)>, RenderError> {
        tracing::debug!(flavor = %flavor, fields = doc.fields.len(), "rendering split field definitions");
        let prepared = prepare(doc, flavor);
        let mut outputs = Vec::with_capacity(prepared.fields.len());
        for field in &prepared.fields {
            let singleton = FieldDocument {
                prefix: prepared.prefix.clone(),
                fields: vec![field.clone()],
            };
            let text = self.render_document(&singleton, flavor, extra_ns)?;
            outputs.push((prepared.external_id(field), text));
        }
        Ok(outputs)
    }

    fn render_document(
        &self,
        doc: &FieldDocument,
        flavor: Flavor,
        extra_ns: Option<&str>,
    ) -> Result<String, RenderError> {
        let context = RenderContext {
            prefix: doc.prefix_str(),
            fields: &doc.fields,
            extra_ns,
        };
        self.registry
            .render(flavor.template_name(), &context)
            .map_err(RenderError::generate)
    }
}

/// List-normalize a working copy and, for the quoting flavors, overwrite
/// its query and tree pattern texts with quote-escaped copies taken from
/// the caller's original document. The original is never touched.
fn prepare(doc: &FieldDocument, flavor: Flavor) -> FieldDocument {
    let mut prepared = doc.normalized();
    if flavor.escapes_queries() {
        for (original, target) in doc.fields.iter().zip(prepared.fields.iter_mut()) {
            for (entry, slot) in original.queries.iter().zip(target.queries.iter_mut()) {
                slot.text = entry.text.replace('"', "\\\"");
            }
            for (key, value) in &original.tree_patterns {
                target
                    .tree_patterns
                    .insert(key.clone(), value.replace('"', "\\\""));
            }
        }
    }
    prepared
}
