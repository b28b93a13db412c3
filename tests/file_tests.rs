//! Integration tests for loading documents from disk.

use flate2::write::GzEncoder;
use flate2::Compression;
use serialquill::document::node::{Node, Scalar};
use serialquill::error::LoadError;
use serialquill::file::loader::load_file;
use serialquill::format::Format;
use serialquill::search::search;
use std::io::Write;
use tempfile::{Builder, NamedTempFile, TempDir};

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_load_simple_json_file() {
    let file = temp_file(".json", r#"{"name": "test"}"#);
    let doc = load_file(file.path()).unwrap();

    assert_eq!(doc.format(), Format::Json);
    match doc.root() {
        Node::Object(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries["name"], Node::string("test"));
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_load_complex_json_file() {
    let file = temp_file(
        ".JSON",
        r#"{
        "user": {
            "name": "Alice",
            "age": 30,
            "active": true
        },
        "items": [1, 2, 3],
        "metadata": null
    }"#,
    );

    let doc = load_file(file.path()).unwrap();
    let root = doc.root();

    assert_eq!(
        root.get_path(&["user", "age"]),
        Some(&Node::Scalar(Scalar::Integer(30)))
    );
    assert_eq!(root.get_path(&["items"]).map(Node::len), Some(3));
    assert_eq!(search(root, Some("root.user.name"), "Alice"), 1);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    match load_file(&path) {
        Err(LoadError::SourceNotFound(p)) => assert_eq!(p, path),
        other => panic!("Expected SourceNotFound, got {:?}", other),
    }
}

#[test]
fn test_blank_file_is_empty() {
    for suffix in [".json", ".xml", ".yaml"] {
        let file = temp_file(suffix, "  \n\t\n");
        assert!(
            matches!(load_file(file.path()), Err(LoadError::SourceEmpty(_))),
            "Expected SourceEmpty for {}",
            suffix
        );
    }
}

#[test]
fn test_invalid_content_is_syntax_error() {
    let cases = [
        (".json", r#"{"unclosed": "#, Format::Json),
        (".xml", "<a><b></a>", Format::Xml),
        (".yml", "key: [unclosed\n", Format::Yaml),
    ];

    for (suffix, contents, expected) in cases {
        let file = temp_file(suffix, contents);
        match load_file(file.path()) {
            Err(LoadError::SyntaxInvalid { format, message }) => {
                assert_eq!(format, expected);
                assert!(!message.is_empty());
            }
            other => panic!("Expected SyntaxInvalid for {}, got {:?}", suffix, other),
        }
    }
}

#[test]
fn test_unsupported_extension() {
    let file = temp_file(".csv", "a,b\n1,2\n");
    assert!(matches!(
        load_file(file.path()),
        Err(LoadError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_gzipped_json_loads_like_plain() {
    let json = r#"{"a": {"b": [1, 2, 3]}}"#;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut gz_file = Builder::new().suffix(".json.gz").tempfile().unwrap();
    gz_file.write_all(&compressed).unwrap();
    gz_file.flush().unwrap();

    let plain_file = temp_file(".json", json);

    let gz_doc = load_file(gz_file.path()).unwrap();
    let plain_doc = load_file(plain_file.path()).unwrap();

    assert_eq!(gz_doc.format(), Format::Json);
    assert_eq!(gz_doc.root(), plain_doc.root());
    assert_eq!(search(gz_doc.root(), Some("root.a.b.2"), "3"), 1);
}

#[test]
fn test_gzipped_blank_file_is_empty() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"   \n").unwrap();
    let compressed = encoder.finish().unwrap();

    let mut gz_file = Builder::new().suffix(".yaml.gz").tempfile().unwrap();
    gz_file.write_all(&compressed).unwrap();
    gz_file.flush().unwrap();

    assert!(matches!(
        load_file(gz_file.path()),
        Err(LoadError::SourceEmpty(_))
    ));
}
