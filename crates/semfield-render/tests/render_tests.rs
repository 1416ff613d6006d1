//! Rendering across the five flavors.

use semfield_model::{Field, FieldDocument, OneOrMany, QueryEntry, QueryKind, Scalar};
use semfield_render::{Flavor, Renderer};

const PREFIX: &str = "http://example.org/fields/";

fn birthplace() -> Field {
    let mut field = Field::new("birthplace", "Birthplace");
    field.description = Some("Place where a person was born".to_string());
    field.domain = Some(OneOrMany::One(Scalar::from(
        "http://www.cidoc-crm.org/cidoc-crm/E21_Person",
    )));
    field.range = Some(OneOrMany::Many(vec![Scalar::from(
        "http://www.cidoc-crm.org/cidoc-crm/E53_Place",
    )]));
    field.datatype = Some("xsd:anyURI".to_string());
    field.min_occurs = Some(Scalar::Int(0));
    field.max_occurs = Some(Scalar::Str("1".to_string()));
    field.queries.push(QueryEntry::new(
        QueryKind::Select,
        "SELECT ?value WHERE { $subject crm:P98i_was_born ?value . ?value rdfs:label \"x\" }",
    ));
    field.queries.push(QueryEntry::new(
        QueryKind::ValueSet,
        "SELECT ?value ?label WHERE { ?value a crm:E53_Place ; rdfs:label ?label }",
    ));
    field
}

fn document() -> FieldDocument {
    let mut doc = FieldDocument::new(vec![birthplace()]);
    doc.prefix = Some(PREFIX.to_string());
    doc
}

fn renderer() -> Renderer {
    Renderer::new().expect("renderer")
}

#[test]
fn researchspace_render_carries_container_and_attributes() {
    let out = renderer()
        .render(&document(), Flavor::ResearchSpace, None)
        .expect("render");

    assert!(out.contains(
        "@prefix fielddef: <http://www.researchspace.org/resource/system/fields/> ."
    ));
    assert!(out.contains("<http://example.org/fields/birthplace/context> {"));
    assert!(out.contains(
        "fieldcon:fieldDefinitionContainer ldp:contains <http://example.org/fields/birthplace> ."
    ));
    assert!(out.contains("<http://example.org/fields/birthplace> a fielddef:Field ;"));
    assert!(out.contains("rdfs:label \"Birthplace\" ;"));
    assert!(out.contains("rdfs:comment \"Place where a person was born\" ;"));
    assert!(out.contains(
        "fielddef:domain <http://www.cidoc-crm.org/cidoc-crm/E21_Person> ;"
    ));
    assert!(out.contains("fielddef:xsdDatatype xsd:anyURI ;"));
    assert!(out.contains("fielddef:minOccurs \"0\" ;"), "out={out}");
    assert!(out.contains("fielddef:maxOccurs \"1\" ;"));
    assert!(out.contains("fielddef:selectPattern [ a sp:Query ; sp:text \"\"\""));
    assert!(out.contains("fielddef:valueSetPattern [ a sp:Query ; sp:text \"\"\""));
    // No escaping outside the quoting flavors.
    assert!(out.contains("rdfs:label \"x\""));
    assert!(!out.contains("\\\"x\\\""));
}

#[test]
fn multiline_query_text_is_embedded_verbatim_in_trig() {
    let mut field = Field::new("note", "Note");
    field.queries.push(QueryEntry::new(
        QueryKind::Insert,
        "INSERT { $subject fielddef:note $value }\nWHERE {}",
    ));
    let doc = FieldDocument::new(vec![field]);

    let out = renderer()
        .render(&doc, Flavor::ResearchSpace, None)
        .expect("render");
    assert!(out.contains("sp:text \"\"\"INSERT { $subject fielddef:note $value }\nWHERE {}\"\"\""));
}

#[test]
fn universal_and_metaphacts_use_their_own_namespaces() {
    let uni = renderer()
        .render(&document(), Flavor::Universal, None)
        .expect("render universal");
    assert!(uni.contains("@prefix fielddef: <urn:x-semfield:def:> ."));
    assert!(uni.contains("fieldcon:fieldDefinitionContainer ldp:contains"));

    let mp = renderer()
        .render(&document(), Flavor::Metaphacts, None)
        .expect("render metaphacts");
    assert!(mp.contains("@prefix fielddef: <http://www.metaphacts.com/ontology/fields#> ."));
    assert!(mp.contains("@prefix fieldcon: <http://www.metaphacts.com/ontologies/platform#> ."));
}

#[test]
fn json_render_escapes_quotes_and_parses() {
    let out = renderer()
        .render(&document(), Flavor::Json, None)
        .expect("render");

    assert!(out.contains("\\\"x\\\""), "escaped quote missing: {out}");

    let value: serde_json::Value = serde_json::from_str(&out).expect("output is JSON");
    let fields = value.as_array().expect("array");
    assert_eq!(fields.len(), 1);
    let field = &fields[0];
    assert_eq!(
        field["id"].as_str(),
        Some("http://example.org/fields/birthplace")
    );
    assert_eq!(field["label"].as_str(), Some("Birthplace"));
    assert_eq!(field["xsdDatatype"].as_str(), Some("xsd:anyURI"));
    assert_eq!(field["minOccurs"].as_str(), Some("0"));
    assert_eq!(
        field["domain"],
        serde_json::json!(["http://www.cidoc-crm.org/cidoc-crm/E21_Person"])
    );
    // Parsing undoes the escaping, so the pattern reads back verbatim.
    assert_eq!(
        field["selectPattern"].as_str(),
        Some("SELECT ?value WHERE { $subject crm:P98i_was_born ?value . ?value rdfs:label \"x\" }")
    );
    assert!(field["valueSetPattern"].is_string());
}

#[test]
fn tree_patterns_render_as_an_escaped_json_object() {
    let mut field = Field::new("place", "Place");
    field.tree_patterns.insert(
        "rootsQuery".to_string(),
        "SELECT ?root WHERE { ?root a \"T\" }".to_string(),
    );
    field
        .tree_patterns
        .insert("childrenQuery".to_string(), "SELECT ?child WHERE {}".to_string());
    let doc = FieldDocument::new(vec![field]);

    let out = renderer().render(&doc, Flavor::Json, None).expect("render");
    assert!(out.contains("\\\"T\\\""), "out={out}");

    let value: serde_json::Value = serde_json::from_str(&out).expect("output is JSON");
    assert_eq!(
        value[0]["treePatterns"]["rootsQuery"].as_str(),
        Some("SELECT ?root WHERE { ?root a \"T\" }")
    );
    assert_eq!(
        value[0]["treePatterns"]["childrenQuery"].as_str(),
        Some("SELECT ?child WHERE {}")
    );
}

#[test]
fn inline_render_wraps_the_json_array() {
    let out = renderer()
        .render(&document(), Flavor::Inline, None)
        .expect("render");

    assert!(out.starts_with("[[#*inline \"fieldDefinitions\"]]"), "out={out}");
    assert!(out.trim_end().ends_with("[[/inline]]"), "out={out}");
    assert!(out.contains("\\\"x\\\""));

    let start = out.find('\n').expect("body");
    let end = out.rfind("[[/inline]]").expect("closing tag");
    let body = out[start..end].trim();
    let value: serde_json::Value = serde_json::from_str(body).expect("body is JSON");
    assert_eq!(value[0]["label"].as_str(), Some("Birthplace"));
}

#[test]
fn split_mode_yields_one_output_per_field_in_order() {
    let mut doc = FieldDocument::new(vec![
        Field::new("a", "First"),
        Field::new("b", "Second"),
        Field::new("c", "Third"),
    ]);
    doc.prefix = Some(PREFIX.to_string());

    let outputs = renderer()
        .render_split(&doc, Flavor::ResearchSpace, None)
        .expect("split render");
    let ids: Vec<&str> = outputs.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "http://example.org/fields/a",
            "http://example.org/fields/b",
            "http://example.org/fields/c",
        ]
    );
    assert!(outputs[1].1.contains("rdfs:label \"Second\""));
    assert!(!outputs[1].1.contains("rdfs:label \"First\""));

    let combined = renderer()
        .render(&doc, Flavor::ResearchSpace, None)
        .expect("combined render");
    assert!(combined.contains("rdfs:label \"First\""));
    assert!(combined.contains("rdfs:label \"Second\""));
    assert!(combined.contains("rdfs:label \"Third\""));
}

#[test]
fn rendering_never_mutates_the_caller_document() {
    let mut field = Field::new("f", "F");
    field.domain = Some(OneOrMany::One(Scalar::from("crm:E21_Person")));
    field
        .queries
        .push(QueryEntry::new(QueryKind::Select, "say \"hi\""));
    let doc = FieldDocument::new(vec![field]);
    let before = doc.clone();

    renderer().render(&doc, Flavor::Json, None).expect("render");
    renderer()
        .render(&doc, Flavor::ResearchSpace, None)
        .expect("render");
    assert_eq!(doc, before);
}

#[test]
fn extra_namespace_token_is_declared_in_the_trig_header() {
    let extra = "crm: <http://www.cidoc-crm.org/cidoc-crm/>";
    let with = renderer()
        .render(&document(), Flavor::ResearchSpace, Some(extra))
        .expect("render");
    assert!(with.contains("@prefix crm: <http://www.cidoc-crm.org/cidoc-crm/> ."));

    let without = renderer()
        .render(&document(), Flavor::ResearchSpace, None)
        .expect("render");
    assert!(!without.contains("@prefix crm:"));

    let json = renderer()
        .render(&document(), Flavor::Json, Some(extra))
        .expect("render");
    assert!(!json.contains("@prefix"));
}

#[test]
fn empty_collection_renders_a_bare_document() {
    let doc = FieldDocument::new(Vec::new());

    let trig = renderer()
        .render(&doc, Flavor::ResearchSpace, None)
        .expect("render");
    assert!(trig.contains("@prefix fielddef:"));
    assert!(!trig.contains("a fielddef:Field"));

    let json = renderer().render(&doc, Flavor::Json, None).expect("render");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output is JSON");
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn yaml_source_renders_without_prior_normalization() {
    let yaml = r#"
prefix: "http://example.org/fields/"
fields:
- id: note
  label: Note
  domain: http://example.org/Document
  queries:
  - select: "SELECT ?value WHERE { $subject ex:note ?value }"
"#;
    let doc = semfield_model::source::from_yaml_str(yaml).expect("parse yaml");

    let out = renderer()
        .render(&doc, Flavor::ResearchSpace, None)
        .expect("render");
    assert!(out.contains("fielddef:domain <http://example.org/Document> ;"));
    assert!(out.contains("fielddef:selectPattern"));
}
