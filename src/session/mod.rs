//! Session state: the currently loaded document and the operations on it.
//!
//! A session starts out waiting for a document. Once a file loads it stays
//! loaded until another file replaces it; a failed load leaves whatever was
//! there before untouched.
//!
//! # Example
//!
//! ```
//! use serialquill::document::tree::Document;
//! use serialquill::format::Format;
//! use serialquill::session::Session;
//!
//! let mut session = Session::new();
//! assert!(session.query_line("a=1").is_err());
//!
//! let root = Format::Json.parse(r#"{"a": 1}"#).unwrap();
//! session.set_document(Document::new(root, Format::Json));
//! assert_eq!(session.query_line("root.a=1"), Ok(1));
//! ```

use crate::document::tree::Document;
use crate::error::{LoadError, SessionError};
use crate::file::loader::{load_file, load_file_as};
use crate::format::Format;
use crate::search::{self, Query, SearchMatch};
use std::path::Path;
use tracing::warn;

/// Words that end the interactive loop, compared case-insensitively.
pub const QUIT_COMMANDS: [&str; 2] = ["quit", "x"];

/// Returns true if `line` asks to leave the application.
pub fn is_quit_command(line: &str) -> bool {
    let line = line.trim();
    QUIT_COMMANDS
        .iter()
        .any(|command| line.eq_ignore_ascii_case(command))
}

/// Holds at most one loaded document.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<Document>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a document file, replacing the current document on success.
    pub fn load_document<P: AsRef<Path>>(&mut self, path: P) -> Result<&Document, LoadError> {
        let path = path.as_ref();
        self.install(path, load_file(path))
    }

    /// Like [`Session::load_document`], but with an explicit format.
    pub fn load_document_as<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: Format,
    ) -> Result<&Document, LoadError> {
        let path = path.as_ref();
        self.install(path, load_file_as(path, format))
    }

    fn install(
        &mut self,
        path: &Path,
        loaded: Result<Document, LoadError>,
    ) -> Result<&Document, LoadError> {
        match loaded {
            Ok(document) => Ok(&*self.document.insert(document)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load document");
                Err(e)
            }
        }
    }

    /// Installs an already-built document.
    pub fn set_document(&mut self, document: Document) {
        self.document = Some(document);
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Counts matches for `key` / `value` in the loaded document.
    pub fn query(&self, key: Option<&str>, value: &str) -> Result<usize, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        Ok(search::search(document.root(), key, value))
    }

    /// Parses a raw query line and counts its matches.
    pub fn query_line(&self, line: &str) -> Result<usize, SessionError> {
        let query = Query::parse(line);
        self.query(query.key(), &query.value)
    }

    /// Returns every match for `query`, with paths and contexts.
    pub fn find(&self, query: &Query) -> Result<Vec<SearchMatch<'_>>, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        Ok(search::find_matches(document.root(), query.key(), &query.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(json: &str) -> Session {
        let mut session = Session::new();
        let root = Format::Json.parse(json).unwrap();
        session.set_document(Document::new(root, Format::Json));
        session
    }

    #[test]
    fn test_quit_commands() {
        assert!(is_quit_command("quit"));
        assert!(is_quit_command("QUIT"));
        assert!(is_quit_command(" x "));
        assert!(is_quit_command("X"));
        assert!(!is_quit_command("exit"));
        assert!(!is_quit_command("x=1"));
    }

    #[test]
    fn test_query_without_document() {
        let session = Session::new();
        assert!(!session.is_loaded());
        assert_eq!(session.query(None, "1"), Err(SessionError::NoDocument));
        assert!(session.find(&Query::parse("1")).is_err());
    }

    #[test]
    fn test_query_line_forms() {
        let session = loaded(r#"{"a": {"b": 1}, "c": "1"}"#);
        assert_eq!(session.query_line("root.a.b=1"), Ok(1));
        assert_eq!(session.query_line("b = 1"), Ok(1));
        assert_eq!(session.query_line("1"), Ok(2));
        assert_eq!(session.query_line("c="), Ok(0));
    }

    #[test]
    fn test_failed_load_keeps_previous_document() {
        let mut session = loaded(r#"{"a": 1}"#);
        let result = session.load_document("/definitely/not/here.json");
        assert!(matches!(result, Err(LoadError::SourceNotFound(_))));
        assert!(session.is_loaded());
        assert_eq!(session.query_line("a=1"), Ok(1));
    }

    #[test]
    fn test_find_returns_paths() {
        let session = loaded(r#"{"xs": [5, 6, 5]}"#);
        let found = session.find(&Query::parse("5")).unwrap();
        let paths: Vec<String> = found.iter().map(|m| m.path_string()).collect();
        assert_eq!(paths, vec!["root.xs.0", "root.xs.2"]);
    }
}
