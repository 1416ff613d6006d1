//! The closed set of output flavors.

use std::fmt;

/// One of the five fixed output syntaxes.
///
/// Each variant carries its embedded template, its output file extension,
/// and whether its target syntax re-quotes embedded query text (which is
/// what decides the quote-escaping pass).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Platform-neutral TriG on `urn:x-semfield:` namespaces.
    Universal,
    /// ResearchSpace TriG.
    ResearchSpace,
    /// Metaphacts TriG.
    Metaphacts,
    /// JSON field definition array (quote-escaped).
    Json,
    /// The JSON array wrapped in a backend template inline partial
    /// (quote-escaped).
    Inline,
}

impl Flavor {
    pub const ALL: [Flavor; 5] = [
        Flavor::Universal,
        Flavor::ResearchSpace,
        Flavor::Metaphacts,
        Flavor::Json,
        Flavor::Inline,
    ];

    /// Template registry name.
    pub fn template_name(self) -> &'static str {
        match self {
            Flavor::Universal => "universal",
            Flavor::ResearchSpace => "researchspace",
            Flavor::Metaphacts => "metaphacts",
            Flavor::Json => "json",
            Flavor::Inline => "inline",
        }
    }

    /// Embedded template source.
    pub fn template_source(self) -> &'static str {
        match self {
            Flavor::Universal => include_str!("../templates/universal.hbs"),
            Flavor::ResearchSpace => include_str!("../templates/researchspace.hbs"),
            Flavor::Metaphacts => include_str!("../templates/metaphacts.hbs"),
            Flavor::Json => include_str!("../templates/json.hbs"),
            Flavor::Inline => include_str!("../templates/inline.hbs"),
        }
    }

    /// File extension used when the rendered output is written to disk.
    pub fn file_extension(self) -> &'static str {
        match self {
            Flavor::Universal | Flavor::ResearchSpace | Flavor::Metaphacts => "trig",
            Flavor::Json => "json",
            Flavor::Inline => "html",
        }
    }

    /// Whether this flavor embeds query text inside an already-quoted
    /// context and therefore needs the quote-escaping pass.
    pub fn escapes_queries(self) -> bool {
        matches!(self, Flavor::Json | Flavor::Inline)
    }

    /// The command-line code of this flavor.
    pub fn code(self) -> &'static str {
        match self {
            Flavor::Universal => "UNI",
            Flavor::ResearchSpace => "RS",
            Flavor::Metaphacts => "MP",
            Flavor::Json => "JSON",
            Flavor::Inline => "INLINE",
        }
    }

    /// Parse a command-line flavor code.
    pub fn from_code(code: &str) -> Option<Flavor> {
        match code {
            "UNI" => Some(Flavor::Universal),
            "RS" => Some(Flavor::ResearchSpace),
            "MP" => Some(Flavor::Metaphacts),
            "JSON" => Some(Flavor::Json),
            "INLINE" => Some(Flavor::Inline),
            _ => None,
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for flavor in Flavor::ALL {
            assert_eq!(Flavor::from_code(flavor.code()), Some(flavor));
        }
        assert_eq!(Flavor::from_code("TTL"), None);
        assert_eq!(Flavor::from_code("rs"), None);
    }

    #[test]
    fn only_quoting_flavors_escape() {
        assert!(Flavor::Json.escapes_queries());
        assert!(Flavor::Inline.escapes_queries());
        assert!(!Flavor::Universal.escapes_queries());
        assert!(!Flavor::ResearchSpace.escapes_queries());
        assert!(!Flavor::Metaphacts.escapes_queries());
    }

    #[test]
    fn trig_flavors_share_the_trig_extension() {
        assert_eq!(Flavor::ResearchSpace.file_extension(), "trig");
        assert_eq!(Flavor::Json.file_extension(), "json");
        assert_eq!(Flavor::Inline.file_extension(), "html");
    }
}
