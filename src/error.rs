//! Error types for loading documents and running queries.

use crate::format::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a document.
///
/// None of these are fatal: a failed load leaves the session waiting for
/// another file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The named document does not exist.
    #[error("File {} does not exist.", .0.display())]
    SourceNotFound(PathBuf),

    /// The document is blank after trimming whitespace.
    #[error("Contents of {} are empty.", .0.display())]
    SourceEmpty(PathBuf),

    /// The format adapter rejected the content.
    #[error("Contents are not valid {format}: {message}")]
    SyntaxInvalid { format: Format, message: String },

    /// The file extension does not name a supported format.
    #[error("File {} is not a supported format (expected .json, .xml, .yml or .yaml).", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Reading or decompressing the file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn syntax(format: Format, message: impl std::fmt::Display) -> Self {
        LoadError::SyntaxInvalid {
            format,
            message: message.to_string(),
        }
    }
}

/// Errors surfaced by the session layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A query was issued before any document was loaded.
    #[error("No document is loaded; load a file before searching.")]
    NoDocument,
}
