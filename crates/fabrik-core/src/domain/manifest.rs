//! Multi-document manifest streams and namespace normalization.
//!
//! `helm template` has no way to force a namespace onto the resources it
//! renders, so the stream is rewritten here: every document is decoded into a
//! dynamic YAML node, `metadata.namespace` is set where `metadata` exists, and
//! the stream is re-encoded with one `---` header per surviving document.
//!
//! Only the first document of each segment is read. Segments whose first
//! document is not a non-empty mapping (blank space between delimiters,
//! comment-only chunks, scalars, malformed YAML) are dropped.

use serde::Deserialize as _;
use serde_yaml::{Mapping, Value};

use crate::domain::error::DomainError;

/// Line that separates documents in a stream.
pub const DOCUMENT_DELIMITER: &str = "---";

const METADATA_KEY: &str = "metadata";
const NAMESPACE_FIELD: &str = "namespace";

/// Split a stream into the raw text between delimiter lines.
///
/// A delimiter is a line that is exactly `---`, optionally followed by
/// whitespace and a comment (`--- # Source: chart/templates/svc.yaml`).
/// Empty segments are kept so positions match the input.
pub fn split_documents(stream: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in stream.split_inclusive('\n') {
        if is_delimiter(line) {
            segments.push(&stream[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    segments.push(&stream[start..]);

    segments
}

/// Number of documents that would survive normalization.
pub fn count_documents(stream: &str) -> usize {
    split_documents(stream)
        .into_iter()
        .filter_map(decode_document)
        .count()
}

/// Set `metadata.namespace` on every document of `stream` that has metadata.
///
/// Documents without `metadata` (or with `metadata: null`) are re-encoded
/// unchanged. Any failure aborts the whole stream; there is no partial output.
///
/// # Errors
///
/// - [`DomainError::MetadataNotMapping`] when `metadata` is a scalar or sequence
/// - [`DomainError::ManifestEncoding`] when a document cannot be re-encoded
///
/// Document numbers in errors are 1-based positions in the input stream,
/// counting dropped segments.
pub fn inject_namespace(stream: &str, namespace: &str) -> Result<String, DomainError> {
    let mut normalized = String::with_capacity(stream.len());

    for (index, segment) in split_documents(stream).into_iter().enumerate() {
        let document = index + 1;
        let Some(mut manifest) = decode_document(segment) else {
            continue;
        };

        set_namespace(&mut manifest, namespace)
            .map_err(|found| DomainError::MetadataNotMapping { document, found })?;

        let encoded =
            serde_yaml::to_string(&manifest).map_err(|e| DomainError::ManifestEncoding {
                document,
                reason: e.to_string(),
            })?;

        normalized.push_str(DOCUMENT_DELIMITER);
        normalized.push('\n');
        normalized.push_str(&encoded);
        normalized.push('\n');
    }

    Ok(normalized)
}

/// Human-readable kind of a YAML node, used in typed errors.
pub fn node_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn is_delimiter(line: &str) -> bool {
    let line = line.trim_end_matches(['\n', '\r']);
    match line.strip_prefix(DOCUMENT_DELIMITER) {
        Some(rest) => rest.is_empty() || rest.starts_with([' ', '\t']),
        None => false,
    }
}

/// First YAML document of a segment, as a non-empty mapping.
///
/// Anything after a `...` end marker is ignored. A tag on the top-level
/// mapping is dropped.
fn decode_document(segment: &str) -> Option<Mapping> {
    let first = serde_yaml::Deserializer::from_str(segment).next()?;
    let value = match Value::deserialize(first).ok()? {
        Value::Tagged(tagged) => tagged.value,
        other => other,
    };
    match value {
        Value::Mapping(mapping) if !mapping.is_empty() => Some(mapping),
        _ => None,
    }
}

fn set_namespace(manifest: &mut Mapping, namespace: &str) -> Result<(), &'static str> {
    match manifest.get_mut(METADATA_KEY) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Mapping(metadata)) => {
            metadata.insert(Value::from(NAMESPACE_FIELD), Value::from(namespace));
            Ok(())
        }
        Some(other) => Err(node_kind(other)),
    }
}
