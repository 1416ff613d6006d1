//! Scalar-to-sequence source normalization.
//!
//! YAML authors may write the multi-valued attributes (`domain`, `range`,
//! `defaultValue`) as a bare scalar or as a sequence. Downstream consumers
//! want exactly one shape, so normalization wraps every bare scalar into a
//! one-element sequence. The operation is total, idempotent, and never
//! touches the caller's document.

use crate::field::{Field, FieldDocument, OneOrMany};

impl FieldDocument {
    /// A deep copy of this document with every multi-valued attribute in
    /// sequence form. Field order and all other attributes are unchanged.
    pub fn normalized(&self) -> FieldDocument {
        FieldDocument {
            prefix: self.prefix.clone(),
            fields: self.fields.iter().map(normalize_field).collect(),
        }
    }
}

fn normalize_field(field: &Field) -> Field {
    let mut field = field.clone();
    field.domain = field.domain.take().map(OneOrMany::into_sequence);
    field.range = field.range.take().map(OneOrMany::into_sequence);
    field.default_value = field.default_value.take().map(OneOrMany::into_sequence);
    field
}
