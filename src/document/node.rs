//! Format-agnostic document node representation.
//!
//! Every supported serialization format (JSON, XML, YAML) is translated into
//! the same closed set of node shapes: objects, arrays and scalars. The search
//! engine only ever sees these types, so it never needs to know which format a
//! document came from.
//!
//! # Example
//!
//! ```
//! use serialquill::document::node::{Node, Scalar};
//! use indexmap::IndexMap;
//!
//! let mut user = IndexMap::new();
//! user.insert("name".to_string(), Node::string("Alice"));
//! user.insert("age".to_string(), Node::Scalar(Scalar::Integer(30)));
//! let root = Node::Object(user);
//!
//! assert!(root.is_object());
//! assert_eq!(root.len(), 2);
//! ```

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// String-like scalar categories.
///
/// All of these compare as plain strings; the category only records what the
/// source format said the string was.
#[derive(Debug, Clone, PartialEq)]
pub enum DocString {
    Plain(String),
    Date(String),
    Raw(String),
    Identifier(String),
    Uri(String),
    Duration(String),
}

impl std::fmt::Display for DocString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DocString {
    pub fn as_str(&self) -> &str {
        match self {
            DocString::Plain(s)
            | DocString::Date(s)
            | DocString::Raw(s)
            | DocString::Identifier(s)
            | DocString::Uri(s)
            | DocString::Duration(s) => s,
        }
    }

    /// Short category name used in diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            DocString::Plain(_) => "string",
            DocString::Date(_) => "date",
            DocString::Raw(_) => "raw",
            DocString::Identifier(_) => "identifier",
            DocString::Uri(_) => "uri",
            DocString::Duration(_) => "duration",
        }
    }
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(DocString),
    /// Explicit null, or an empty XML element.
    Null,
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::String(s) => write!(f, "{}", s),
            Scalar::Null => write!(f, "null"),
        }
    }
}

impl Scalar {
    /// Short category name used in diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Boolean(_) => "boolean",
            Scalar::String(s) => s.category(),
            Scalar::Null => "null",
        }
    }

    fn to_json_value(&self) -> JsonValue {
        match self {
            Scalar::Integer(i) => JsonValue::from(*i),
            // NaN and infinities have no JSON form
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Scalar::Boolean(b) => JsonValue::Bool(*b),
            Scalar::String(s) => JsonValue::String(s.as_str().to_string()),
            Scalar::Null => JsonValue::Null,
        }
    }
}

/// A node in a loaded document.
///
/// Objects keep their keys in insertion order so match contexts are reported
/// the way the source file wrote them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Key-value pairs with unique keys
    Object(IndexMap<String, Node>),
    /// Ordered elements addressed by 0-based index
    Array(Vec<Node>),
    /// A leaf value
    Scalar(Scalar),
}

impl Node {
    /// Creates a plain string scalar.
    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(DocString::Plain(s.into())))
    }

    /// Returns true if this node is an object.
    ///
    /// # Example
    ///
    /// ```
    /// use serialquill::document::node::{Node, Scalar};
    /// use indexmap::IndexMap;
    ///
    /// assert!(Node::Object(IndexMap::new()).is_object());
    /// assert!(!Node::Scalar(Scalar::Integer(42)).is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            Node::Object(_) | Node::Array(_) => None,
        }
    }

    /// Number of direct children. Scalars have none.
    pub fn len(&self) -> usize {
        match self {
            Node::Object(entries) => entries.len(),
            Node::Array(items) => items.len(),
            Node::Scalar(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Follows a sequence of segments (object keys or decimal array indices)
    /// from this node.
    ///
    /// # Example
    ///
    /// ```
    /// use serialquill::document::node::{Node, Scalar};
    /// use indexmap::IndexMap;
    ///
    /// let mut root = IndexMap::new();
    /// root.insert(
    ///     "items".to_string(),
    ///     Node::Array(vec![Node::Scalar(Scalar::Integer(10)), Node::Scalar(Scalar::Integer(20))]),
    /// );
    /// let root = Node::Object(root);
    ///
    /// let second = root.get_path(&["items", "1"]).unwrap();
    /// assert_eq!(second, &Node::Scalar(Scalar::Integer(20)));
    /// assert!(root.get_path(&["items", "7"]).is_none());
    /// ```
    pub fn get_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Node> {
        let mut current = self;
        for segment in segments {
            let segment = segment.as_ref();
            current = match current {
                Node::Object(entries) => entries.get(segment)?,
                Node::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                Node::Scalar(_) => return None,
            };
        }
        Some(current)
    }

    /// Converts this node into a `serde_json::Value` for display.
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Node::Object(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
            Node::Array(items) => JsonValue::Array(items.iter().map(Node::to_json_value).collect()),
            Node::Scalar(s) => s.to_json_value(),
        }
    }

    /// Renders this node as JSON text, indented when `pretty` is set.
    pub fn render(&self, pretty: bool) -> String {
        let value = self.to_json_value();
        let rendered = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        // Serializing a Value built from owned data cannot fail
        rendered.unwrap_or_default()
    }
}
