//! YAML adapter backed by `serde_yaml`.
//!
//! A stream containing several `---` documents becomes a root array with one
//! element per document, so each document is reachable by index
//! (`root.0.name`, `root.1.name`, ...).

use crate::document::node::{DocString, Node, Scalar};
use crate::error::LoadError;
use crate::format::Format;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value as SerdeValue;

/// Parses YAML text into a document root.
///
/// # Example
///
/// ```
/// use serialquill::document::node::{Node, Scalar};
/// use serialquill::format::yaml::parse_yaml;
///
/// let root = parse_yaml("name: first\ncount: 3\n").unwrap();
/// assert_eq!(root.get_path(&["count"]), Some(&Node::Scalar(Scalar::Integer(3))));
///
/// let multi = parse_yaml("---\nname: a\n---\nname: b\n").unwrap();
/// assert_eq!(multi.get_path(&["1", "name"]), Some(&Node::string("b")));
/// ```
pub fn parse_yaml(yaml_str: &str) -> Result<Node, LoadError> {
    let mut documents = Vec::new();

    for document in serde_yaml::Deserializer::from_str(yaml_str) {
        let value =
            SerdeValue::deserialize(document).map_err(|e| LoadError::syntax(Format::Yaml, e))?;
        documents.push(parse_value(&value));
    }

    match documents.len() {
        0 => Err(LoadError::syntax(Format::Yaml, "no YAML document found")),
        1 => Ok(documents.remove(0)),
        _ => Ok(Node::Array(documents)),
    }
}

/// Converts a `serde_yaml::Value` into a `Node`.
pub fn parse_value(value: &SerdeValue) -> Node {
    match value {
        SerdeValue::Mapping(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (k, v) in map {
                entries.insert(key_to_string(k), parse_value(v));
            }
            Node::Object(entries)
        }
        SerdeValue::Sequence(seq) => Node::Array(seq.iter().map(parse_value).collect()),
        SerdeValue::String(s) => Node::string(s.clone()),
        SerdeValue::Number(n) => match n.as_i64() {
            Some(i) => Node::Scalar(Scalar::Integer(i)),
            None => Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        SerdeValue::Bool(b) => Node::Scalar(Scalar::Boolean(*b)),
        SerdeValue::Null => Node::Scalar(Scalar::Null),
        SerdeValue::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            match (tag.trim_start_matches('!'), &tagged.value) {
                (name, SerdeValue::String(s)) => match tagged_string(name, s) {
                    Some(doc_string) => Node::Scalar(Scalar::String(doc_string)),
                    None => Node::string(s.clone()),
                },
                // Unknown tags and tagged collections are transparent
                (_, inner) => parse_value(inner),
            }
        }
    }
}

/// Maps a tag name onto a string category, if it names one.
fn tagged_string(tag: &str, s: &str) -> Option<DocString> {
    let s = s.to_string();
    match tag.to_lowercase().as_str() {
        "date" | "timestamp" | "datetime" => Some(DocString::Date(s)),
        "raw" | "binary" => Some(DocString::Raw(s)),
        "uuid" | "guid" | "id" => Some(DocString::Identifier(s)),
        "uri" | "url" => Some(DocString::Uri(s)),
        "duration" | "timespan" => Some(DocString::Duration(s)),
        _ => None,
    }
}

/// Mapping keys may be any YAML value; they are addressed by their text.
fn key_to_string(key: &SerdeValue) -> String {
    match key {
        SerdeValue::String(s) => s.clone(),
        SerdeValue::Number(n) => n.to_string(),
        SerdeValue::Bool(b) => b.to_string(),
        SerdeValue::Null => "null".to_string(),
        SerdeValue::Tagged(tagged) => key_to_string(&tagged.value),
        SerdeValue::Sequence(_) | SerdeValue::Mapping(_) => serde_yaml::to_string(key)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
