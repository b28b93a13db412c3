//! Document file loading.
//!
//! Reads a file from disk (decompressing `.gz` files), rejects missing or
//! blank sources, and hands the text to the format adapter chosen by the
//! file extension.

use crate::document::node::Node;
use crate::document::tree::Document;
use crate::error::LoadError;
use crate::format::Format;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Loads and parses a document file.
///
/// The format is picked from the file extension (`.json`, `.xml`, `.yml`,
/// `.yaml`, each optionally followed by `.gz`).
///
/// # Examples
///
/// ```no_run
/// use serialquill::file::loader::load_file;
///
/// let doc = load_file("config.json").unwrap();
/// assert!(doc.root().is_object());
/// ```
///
/// # Errors
///
/// - [`LoadError::SourceNotFound`] if the path does not exist
/// - [`LoadError::UnsupportedFormat`] if the extension is not recognised
/// - [`LoadError::Io`] if the file cannot be read or decompressed
/// - [`LoadError::SourceEmpty`] if the contents are blank
/// - [`LoadError::SyntaxInvalid`] if the contents are not valid for the format
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document, LoadError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(LoadError::SourceNotFound(path_ref.to_path_buf()));
    }

    let format = Format::from_path(path_ref)
        .ok_or_else(|| LoadError::UnsupportedFormat(path_ref.to_path_buf()))?;

    load_file_as(path_ref, format)
}

/// Loads a document file with an explicit format, ignoring its extension.
///
/// Gzip decompression still follows the `.gz` suffix.
pub fn load_file_as<P: AsRef<Path>>(path: P, format: Format) -> Result<Document, LoadError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(LoadError::SourceNotFound(path_ref.to_path_buf()));
    }

    let bytes = if is_gzipped(path_ref) {
        debug!(path = %path_ref.display(), "decompressing gzipped file");
        read_gzipped_file(path_ref)?
    } else {
        fs::read(path_ref).map_err(|source| LoadError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?
    };

    let content = String::from_utf8(bytes)
        .map_err(|e| LoadError::syntax(format, format!("file is not valid UTF-8: {}", e)))?;

    if content.trim().is_empty() {
        return Err(LoadError::SourceEmpty(path_ref.to_path_buf()));
    }

    let root = parse_content(&content, format)?;
    info!(path = %path_ref.display(), %format, "parsed document");

    Ok(Document::with_source(root, format, path_ref))
}

/// Parses in-memory text, applying the same blank-content check as files.
///
/// # Example
///
/// ```
/// use serialquill::file::loader::parse_content;
/// use serialquill::format::Format;
///
/// let root = parse_content("a: 1", Format::Yaml).unwrap();
/// assert!(root.is_object());
/// assert!(parse_content("  \n", Format::Json).is_err());
/// ```
pub fn parse_content(content: &str, format: Format) -> Result<Node, LoadError> {
    if content.trim().is_empty() {
        return Err(LoadError::SourceEmpty(Path::new("<memory>").to_path_buf()));
    }
    format.parse(content)
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    use flate2::read::GzDecoder;

    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = fs::File::open(path).map_err(io_error)?;
    let mut decoder = GzDecoder::new(file);
    let mut content = Vec::new();
    decoder.read_to_end(&mut content).map_err(io_error)?;
    Ok(content)
}
