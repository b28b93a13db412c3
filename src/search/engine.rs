//! Recursive key-path search over a document tree.

use super::matcher;
use super::path::SearchPath;
use crate::document::node::{Node, Scalar};
use tracing::{debug, info};

/// A scalar that satisfied a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch<'a> {
    /// Segments from the document root to the matched scalar.
    pub path: Vec<String>,
    /// The matched value.
    pub scalar: &'a Scalar,
    /// The container holding the scalar (the scalar itself when it is the
    /// document root).
    pub context: &'a Node,
}

impl SearchMatch<'_> {
    /// Anchored form of the path, usable as a query key (`root.a.0.b`).
    pub fn path_string(&self) -> String {
        std::iter::once("root")
            .chain(self.path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Counts the scalars under `root` reachable by `key` that match `value`.
///
/// A blank `value` matches nothing. Every match is logged with its path.
///
/// # Example
///
/// ```
/// use serialquill::format::json::parse_json;
/// use serialquill::search::search;
///
/// let root = parse_json(r#"{"a": {"b": 1}}"#).unwrap();
/// assert_eq!(search(&root, Some("root.a.b"), "1"), 1);
/// assert_eq!(search(&root, Some("root.a.c"), "1"), 0);
/// assert_eq!(search(&root, Some("b"), "1"), 1);
/// assert_eq!(search(&root, None, "1"), 1);
/// ```
pub fn search(root: &Node, key: Option<&str>, value: &str) -> usize {
    find_matches(root, key, value).len()
}

/// Like [`search`], but returns every match with its path and context.
pub fn find_matches<'a>(root: &'a Node, key: Option<&str>, value: &str) -> Vec<SearchMatch<'a>> {
    if value.trim().is_empty() {
        debug!("blank search value, skipping search");
        return Vec::new();
    }

    let path = SearchPath::resolve(key);
    debug!(
        anchored = path.is_anchored(),
        key = path.remaining(),
        value,
        "searching document"
    );

    let mut walker = Walker {
        value,
        segments: Vec::new(),
        matches: Vec::new(),
    };
    walker.walk(
        root,
        None,
        path.has_key(),
        path.is_anchored(),
        path.remaining(),
    );
    walker.matches
}

/// Walk state shared across the recursion.
struct Walker<'a, 'v> {
    value: &'v str,
    segments: Vec<String>,
    matches: Vec<SearchMatch<'a>>,
}

impl<'a> Walker<'a, '_> {
    /// Visits `node`. `key_in_progress` is set once the key has started
    /// matching (or was anchored), after which a diverging segment prunes the
    /// branch.
    fn walk(
        &mut self,
        node: &'a Node,
        container: Option<&'a Node>,
        has_key: bool,
        key_in_progress: bool,
        current_key: &str,
    ) {
        match node {
            Node::Object(entries) => {
                for (name, child) in entries {
                    self.visit_child(node, name, child, has_key, key_in_progress, current_key);
                }
            }
            Node::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    let name = index.to_string();
                    self.visit_child(node, &name, child, has_key, key_in_progress, current_key);
                }
            }
            Node::Scalar(scalar) => {
                // A scalar cannot satisfy a key that is still unresolved
                if !has_key && matcher::matches(scalar, self.value) {
                    self.record(scalar, container.unwrap_or(node));
                }
            }
        }
    }

    fn visit_child(
        &mut self,
        container: &'a Node,
        name: &str,
        child: &'a Node,
        has_key: bool,
        key_in_progress: bool,
        current_key: &str,
    ) {
        self.segments.push(name.to_string());

        if !has_key {
            self.walk(child, Some(container), false, false, current_key);
        } else if let Some(scalar) = child
            .as_scalar()
            .filter(|s| current_key == name && matcher::matches(s, self.value))
        {
            self.record(scalar, container);
        } else if let Some(rest) = current_key
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('.'))
        {
            self.walk(child, Some(container), true, true, rest);
        } else if !key_in_progress {
            self.walk(child, Some(container), true, false, current_key);
        }

        self.segments.pop();
    }

    fn record(&mut self, scalar: &'a Scalar, context: &'a Node) {
        let found = SearchMatch {
            path: self.segments.clone(),
            scalar,
            context,
        };
        info!(
            path = %found.path_string(),
            value = %scalar,
            kind = scalar.category(),
            "found node that matches term"
        );
        self.matches.push(found);
    }
}
