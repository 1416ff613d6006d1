//! RDF vocabulary constants for the namespaces the reader touches.

/// Core RDF namespace.
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// `rdf:type`.
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// RDF Schema namespace.
pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// `rdfs:label` — a field's mandatory display label.
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// `rdfs:comment` — a field's description.
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
}

/// W3C Linked Data Platform namespace.
pub mod ldp {
    pub const NS: &str = "http://www.w3.org/ns/ldp#";

    /// `ldp:contains` — container membership of a field definition.
    pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";
}

/// XML Schema datatypes namespace.
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
}

/// SPIN SPARQL vocabulary; pattern texts hang off `sp:text`.
pub mod sp {
    pub const NS: &str = "http://spinrdf.org/sp#";

    /// `sp:Query` — the type of a stored query node.
    pub const QUERY: &str = "http://spinrdf.org/sp#Query";

    /// `sp:text` — the literal SPARQL text of a stored query.
    pub const TEXT: &str = "http://spinrdf.org/sp#text";
}

/// ResearchSpace field definition vocabulary.
pub mod researchspace {
    /// Base of the field definition predicates (`fielddef:`).
    pub const FIELD_NS: &str = "http://www.researchspace.org/resource/system/fields/";

    /// Base of the platform container resources (`fieldcon:`).
    pub const CONTAINER_NS: &str = "http://www.researchspace.org/resource/system/";
}

/// Metaphacts field definition vocabulary.
pub mod metaphacts {
    /// Base of the field definition predicates (`fielddef:`).
    pub const FIELD_NS: &str = "http://www.metaphacts.com/ontology/fields#";

    /// Base of the platform container resources (`fieldcon:`).
    pub const CONTAINER_NS: &str = "http://www.metaphacts.com/ontologies/platform#";
}
