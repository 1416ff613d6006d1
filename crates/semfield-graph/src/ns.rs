//! Namespace-prefix tables for querying and URI compaction.

use crate::vocab;

/// The two platforms whose graph layout the reader understands.
///
/// Rendering knows more flavors; only these two can be read back, so the
/// distinction is a separate type and an unsupported combination is
/// unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    ResearchSpace,
    Metaphacts,
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Platform::ResearchSpace => "researchspace",
            Platform::Metaphacts => "metaphacts",
        }
    }
}

/// The prefix table shared by lookup construction and binding compaction.
///
/// `fielddef` and `fieldcon` resolve per platform; the rest is fixed. The
/// same table drives both directions: predicates are expanded from it when
/// matching statements or printing SPARQL, and URI-valued bindings are
/// compacted against it when written into field attributes.
#[derive(Debug, Clone)]
pub struct Namespaces {
    platform: Platform,
    pairs: Vec<(&'static str, &'static str)>,
}

impl Namespaces {
    pub fn for_platform(platform: Platform) -> Self {
        let (fielddef, fieldcon) = match platform {
            Platform::ResearchSpace => (
                vocab::researchspace::FIELD_NS,
                vocab::researchspace::CONTAINER_NS,
            ),
            Platform::Metaphacts => (
                vocab::metaphacts::FIELD_NS,
                vocab::metaphacts::CONTAINER_NS,
            ),
        };
        Namespaces {
            platform,
            pairs: vec![
                ("rdf", vocab::rdf::NS),
                ("rdfs", vocab::rdfs::NS),
                ("ldp", vocab::ldp::NS),
                ("xsd", vocab::xsd::NS),
                ("sp", vocab::sp::NS),
                ("fielddef", fielddef),
                ("fieldcon", fieldcon),
            ],
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Expanded URI of a `fielddef:` predicate.
    pub fn fielddef(&self, local: &str) -> String {
        format!("{}{}", self.base("fielddef"), local)
    }

    /// Expanded URI of a `fieldcon:` resource.
    pub fn fieldcon(&self, local: &str) -> String {
        format!("{}{}", self.base("fieldcon"), local)
    }

    fn base(&self, prefix: &str) -> &'static str {
        // Both names are present by construction.
        self.pairs
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, base)| *base)
            .unwrap_or("")
    }

    /// Compact `uri` to `prefix:local` form, preferring the longest
    /// matching base (the container base is a prefix of the ResearchSpace
    /// field base). URIs outside the table pass through unchanged.
    pub fn compact(&self, uri: &str) -> String {
        let mut best: Option<(&str, &str)> = None;
        for (prefix, base) in &self.pairs {
            if uri.starts_with(base) {
                match best {
                    Some((_, b)) if b.len() >= base.len() => {}
                    _ => best = Some((prefix, base)),
                }
            }
        }
        match best {
            Some((prefix, base)) => format!("{}:{}", prefix, &uri[base.len()..]),
            None => uri.to_string(),
        }
    }

    /// PREFIX declarations for the textual SPARQL form of the lookups.
    pub fn sparql_prologue(&self) -> String {
        let mut out = String::new();
        for (prefix, base) in &self.pairs {
            out.push_str("PREFIX ");
            out.push_str(prefix);
            out.push_str(": <");
            out.push_str(base);
            out.push_str(">\n");
        }
        out
    }
}
