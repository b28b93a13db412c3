//! JSON adapter backed by `serde_json`.
//!
//! Object key order follows the source text (`serde_json` is built with
//! `preserve_order`).

use crate::document::node::{Node, Scalar};
use crate::error::LoadError;
use crate::format::Format;
use serde_json::Value as SerdeValue;

/// Parses a JSON string into a document root.
///
/// # Example
///
/// ```
/// use serialquill::document::node::{Node, Scalar};
/// use serialquill::format::json::parse_json;
///
/// let root = parse_json(r#"[1, 2.5, "three"]"#).unwrap();
/// assert_eq!(root.get_path(&["0"]), Some(&Node::Scalar(Scalar::Integer(1))));
/// assert_eq!(root.get_path(&["1"]), Some(&Node::Scalar(Scalar::Float(2.5))));
///
/// assert!(parse_json(r#"{"unclosed": "#).is_err());
/// ```
pub fn parse_json(json_str: &str) -> Result<Node, LoadError> {
    let value: SerdeValue =
        serde_json::from_str(json_str).map_err(|e| LoadError::syntax(Format::Json, e))?;
    Ok(parse_value(&value))
}

/// Converts a `serde_json::Value` into a `Node`.
///
/// Integers that fit in `i64` stay integers; every other number becomes a
/// float.
pub fn parse_value(value: &SerdeValue) -> Node {
    match value {
        SerdeValue::Object(map) => Node::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), parse_value(v)))
                .collect(),
        ),
        SerdeValue::Array(arr) => Node::Array(arr.iter().map(parse_value).collect()),
        SerdeValue::String(s) => Node::string(s.clone()),
        SerdeValue::Number(n) => match n.as_i64() {
            Some(i) => Node::Scalar(Scalar::Integer(i)),
            None => Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        SerdeValue::Bool(b) => Node::Scalar(Scalar::Boolean(*b)),
        SerdeValue::Null => Node::Scalar(Scalar::Null),
    }
}
