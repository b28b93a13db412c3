//! Generic document model shared by every input format.
//!
//! - [`node`]: the closed Object / Array / Scalar node types
//! - [`tree`]: a loaded document with its source metadata

pub mod node;
pub mod tree;

pub use node::{DocString, Node, Scalar};
pub use tree::Document;
