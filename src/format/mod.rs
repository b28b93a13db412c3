//! Format adapters: translate document text into the generic node model.
//!
//! Each adapter delegates the actual grammar to an existing parser and only
//! converts the parser's output into [`Node`]s. Construction never partially
//! succeeds: either the whole document converts or an error is returned.
//!
//! # Example
//!
//! ```
//! use serialquill::format::Format;
//!
//! let root = Format::Json.parse(r#"{"a": {"b": 1}}"#).unwrap();
//! assert!(root.is_object());
//!
//! assert_eq!(Format::from_path("data.YAML"), Some(Format::Yaml));
//! assert_eq!(Format::from_path("data.xml.gz"), Some(Format::Xml));
//! assert_eq!(Format::from_path("notes.txt"), None);
//! ```

pub mod json;
pub mod xml;
pub mod yaml;

use crate::document::node::Node;
use crate::error::LoadError;
use std::path::Path;

/// Supported serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
    Yaml,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Json => "JSON",
            Format::Xml => "XML",
            Format::Yaml => "YAML",
        };
        write!(f, "{}", name)
    }
}

impl Format {
    /// Every format, in the order they are listed to users.
    pub const ALL: [Format; 3] = [Format::Json, Format::Xml, Format::Yaml];

    /// File extensions (without the dot) recognised for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Json => &["json"],
            Format::Xml => &["xml"],
            Format::Yaml => &["yml", "yaml"],
        }
    }

    /// Determines the format from a file name, case-insensitively.
    ///
    /// A trailing `.gz` is looked through, so `data.json.gz` is JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        let base = name.strip_suffix(".gz").unwrap_or(&name);
        let ext = Path::new(base).extension()?.to_str()?;

        Format::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext))
    }

    /// Looks a format up by name (`json`, `xml`, `yaml` or `yml`), ignoring case.
    pub fn from_name(name: &str) -> Option<Format> {
        let name = name.trim().to_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&name.as_str()))
    }

    /// Parses `text` into a document root using this format's adapter.
    pub fn parse(&self, text: &str) -> Result<Node, LoadError> {
        match self {
            Format::Json => json::parse_json(text),
            Format::Xml => xml::parse_xml(text),
            Format::Yaml => yaml::parse_yaml(text),
        }
    }
}
