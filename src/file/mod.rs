//! File I/O for documents.
//!
//! Documents are only ever read; there is no write-back.

pub mod loader;
