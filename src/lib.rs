//! SerialQuill - search serialized documents by key path and value.
//!
//! Documents in JSON, XML or YAML are loaded into one generic tree
//! ([`document::node::Node`]) and queried with dotted key paths:
//!
//! ```
//! use serialquill::format::Format;
//! use serialquill::search::search;
//!
//! let root = Format::Yaml.parse("a:\n  b: 1\n").unwrap();
//! assert_eq!(search(&root, Some("root.a.b"), "1"), 1);
//! assert_eq!(search(&root, Some("b"), "1"), 1);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod format;
pub mod logging;
pub mod search;
pub mod session;

pub use error::{LoadError, SessionError};
