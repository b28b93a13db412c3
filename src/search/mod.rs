//! Key-path search over loaded documents.
//!
//! A query pairs an optional dotted key with a value:
//!
//! - `value` - match the value anywhere in the document
//! - `a.b=value` - the path `a.b` may start at any depth
//! - `root.a.b=value` / `this.a.b=value` - the path must start at the root
//!
//! Array elements are addressed by their decimal index (`root.items.0.name`).
//! Values are compared according to the type of the node they are checked
//! against; see [`matcher::matches`].

pub mod engine;
pub mod matcher;
pub mod path;
pub mod query;

pub use engine::{find_matches, search, SearchMatch};
pub use path::SearchPath;
pub use query::Query;
