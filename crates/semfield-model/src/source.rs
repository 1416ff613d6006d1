//! YAML source loading and the round-trip writer.
//!
//! A source is either one YAML file or a directory of fragment files merged
//! in sorted file order. Fragments concatenate their `fields` sequences;
//! they must agree on `prefix` (declaring none defers to whichever fragment
//! declares one, two differing declarations are a configuration conflict).
//!
//! Writing is pure serialization of the document shape; no normalization
//! or merging happens on the way out.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ModelError;
use crate::field::{Field, FieldDocument};

/// Extensions recognized as YAML fragments when loading a directory.
const FRAGMENT_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Load a single YAML source file.
pub fn load_file(path: &Path) -> Result<FieldDocument, ModelError> {
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| ModelError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a source file, or merge a directory of fragments if `path` is one.
pub fn load_path(path: &Path) -> Result<FieldDocument, ModelError> {
    if path.is_dir() {
        load_fragments_dir(path)
    } else {
        load_file(path)
    }
}

/// Merge every `*.yml` / `*.yaml` fragment in `dir`, in sorted file order.
pub fn load_fragments_dir(dir: &Path) -> Result<FieldDocument, ModelError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| ModelError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_fragment(path))
        .collect();
    paths.sort();

    if paths.is_empty() {
        tracing::warn!(dir = %dir.display(), "no YAML fragments found");
    }

    let mut merged = FieldDocument::new(Vec::new());
    for path in &paths {
        let fragment = load_file(path)?;
        merge_fragment(&mut merged, fragment, path)?;
    }
    Ok(merged)
}

fn is_fragment(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| FRAGMENT_EXTENSIONS.contains(&ext))
            .unwrap_or(false)
}

fn merge_fragment(
    merged: &mut FieldDocument,
    fragment: FieldDocument,
    path: &Path,
) -> Result<(), ModelError> {
    match (&merged.prefix, &fragment.prefix) {
        (Some(existing), Some(found)) if existing != found => {
            return Err(ModelError::PrefixConflict {
                path: path.to_path_buf(),
                existing: existing.clone(),
                found: found.clone(),
            });
        }
        (None, Some(found)) => merged.prefix = Some(found.clone()),
        _ => {}
    }
    tracing::debug!(
        fragment = %path.display(),
        fields = fragment.fields.len(),
        "merged fragment"
    );
    merged.fields.extend(fragment.fields);
    Ok(())
}

/// Parse a YAML source document from text.
pub fn from_yaml_str(text: &str) -> Result<FieldDocument, ModelError> {
    serde_yaml::from_str(text).map_err(ModelError::Parse)
}

/// Serialize fields (and an optional prefix) to the YAML source shape.
pub fn to_yaml_string(fields: &[Field], prefix: Option<&str>) -> Result<String, ModelError> {
    let doc = FieldDocument {
        prefix: prefix.map(str::to_string),
        fields: fields.to_vec(),
    };
    serde_yaml::to_string(&doc).map_err(ModelError::Serialize)
}

/// Write fields to `path` in the YAML source shape.
pub fn write_file(path: &Path, fields: &[Field], prefix: Option<&str>) -> Result<(), ModelError> {
    let text = to_yaml_string(fields, prefix)?;
    fs::write(path, text).map_err(|source| ModelError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    #[test]
    fn prefix_is_adopted_from_the_only_declaring_fragment() {
        let mut merged = FieldDocument::new(vec![Field::new("a", "A")]);
        let mut fragment = FieldDocument::new(vec![Field::new("b", "B")]);
        fragment.prefix = Some("ex:".to_string());
        merge_fragment(&mut merged, fragment, Path::new("b.yml")).expect("merge");
        assert_eq!(merged.prefix.as_deref(), Some("ex:"));
        assert_eq!(merged.fields.len(), 2);
        assert_eq!(merged.fields[1].id, "b");
    }

    #[test]
    fn conflicting_prefixes_are_rejected() {
        let mut merged = FieldDocument::new(Vec::new());
        merged.prefix = Some("ex:".to_string());
        let mut fragment = FieldDocument::new(Vec::new());
        fragment.prefix = Some("other:".to_string());
        let err = merge_fragment(&mut merged, fragment, Path::new("c.yml"))
            .expect_err("prefix conflict");
        assert!(err.to_string().contains("prefix"), "err={err}");
    }

    #[test]
    fn equal_prefixes_merge_cleanly() {
        let mut merged = FieldDocument::new(Vec::new());
        merged.prefix = Some("ex:".to_string());
        let mut fragment = FieldDocument::new(vec![Field::new("a", "A")]);
        fragment.prefix = Some("ex:".to_string());
        merge_fragment(&mut merged, fragment, Path::new("a.yml")).expect("merge");
        assert_eq!(merged.prefix.as_deref(), Some("ex:"));
    }

    #[test]
    fn to_yaml_string_omits_absent_prefix() {
        let yaml = to_yaml_string(&[Field::new("f1", "One")], None).expect("serialize");
        assert!(!yaml.contains("prefix"), "yaml={yaml}");
        let yaml = to_yaml_string(&[Field::new("f1", "One")], Some("ex:")).expect("serialize");
        assert!(yaml.contains("prefix"), "yaml={yaml}");
    }
}
