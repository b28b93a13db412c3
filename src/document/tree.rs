//! A loaded document: the root node plus where it came from.
//!
//! # Example
//!
//! ```
//! use serialquill::document::node::Node;
//! use serialquill::document::tree::Document;
//! use serialquill::format::Format;
//!
//! let doc = Document::new(Node::string("hello"), Format::Json);
//! assert_eq!(doc.format(), Format::Json);
//! assert!(doc.source_path().is_none());
//! ```

use super::node::Node;
use crate::format::Format;
use std::path::{Path, PathBuf};

/// A parsed document held for the rest of a session.
///
/// The tree is never mutated after construction; searches only borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
    format: Format,
    source_path: Option<PathBuf>,
}

impl Document {
    /// Creates a document that was not read from a file.
    pub fn new(root: Node, format: Format) -> Self {
        Self {
            root,
            format,
            source_path: None,
        }
    }

    /// Creates a document remembering the file it was loaded from.
    pub fn with_source(root: Node, format: Format, source_path: impl Into<PathBuf>) -> Self {
        Self {
            root,
            format,
            source_path: Some(source_path.into()),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the path the document was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Human-readable name for messages: the file name, or `<memory>`.
    pub fn display_name(&self) -> String {
        match &self.source_path {
            Some(path) => path.display().to_string(),
            None => "<memory>".to_string(),
        }
    }
}
