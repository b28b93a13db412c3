//! XML adapter backed by `roxmltree`.
//!
//! Elements are mapped onto the generic model as follows:
//!
//! - the document root is an object holding the document element under its
//!   tag name, so paths start with that name (`root.catalog.book.title`)
//! - an element with no attributes and only text becomes a string scalar; an
//!   empty one becomes null
//! - any other element becomes an object: attributes appear as `@name`
//!   strings, child elements are keyed by tag name and repeated sibling tags
//!   collapse into an array in document order
//! - the text of an element with attributes lives under `#text`, so
//!   `<price currency="USD">10</price>` is reached as `price.#text`; text mixed
//!   between child elements is trimmed and kept there too
//!
//! XML has no typed scalars, so every value compares as a literal string.
//! Documents nested deeper than [`MAX_DEPTH`] elements are rejected before
//! parsing.

use crate::document::node::{Node, Scalar};
use crate::error::LoadError;
use crate::format::Format;
use indexmap::IndexMap;

const ATTRIBUTE_PREFIX: &str = "@";
const TEXT_KEY: &str = "#text";

/// Deepest element nesting accepted, matching the recursion limit of the JSON
/// and YAML parsers.
pub const MAX_DEPTH: usize = 128;

/// Parses XML text into a document root.
///
/// # Example
///
/// ```
/// use serialquill::document::node::Node;
/// use serialquill::format::xml::parse_xml;
///
/// let root = parse_xml("<a><b>1</b><c>x</c><c>y</c></a>").unwrap();
/// assert_eq!(root.get_path(&["a", "b"]), Some(&Node::string("1")));
/// assert_eq!(root.get_path(&["a", "c", "1"]), Some(&Node::string("y")));
/// ```
pub fn parse_xml(xml_str: &str) -> Result<Node, LoadError> {
    if exceeds_depth(xml_str, MAX_DEPTH) {
        return Err(LoadError::syntax(
            Format::Xml,
            format!("elements are nested more than {} levels deep", MAX_DEPTH),
        ));
    }

    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(xml_str, options)
        .map_err(|e| LoadError::syntax(Format::Xml, e))?;
    let root_element = document.root_element();

    let mut root = IndexMap::with_capacity(1);
    root.insert(
        root_element.tag_name().name().to_string(),
        convert_element(root_element),
    );
    Ok(Node::Object(root))
}

fn convert_element(element: roxmltree::Node<'_, '_>) -> Node {
    let has_child_elements = element.children().any(|n| n.is_element());
    let has_attributes = element.attributes().next().is_some();
    let text: String = element
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();

    if !has_child_elements && !has_attributes {
        return if text.is_empty() {
            Node::Scalar(Scalar::Null)
        } else {
            Node::string(text)
        };
    }

    let mut entries: IndexMap<String, Node> = IndexMap::new();

    for attribute in element.attributes() {
        entries.insert(
            format!("{}{}", ATTRIBUTE_PREFIX, attribute.name()),
            Node::string(attribute.value()),
        );
    }

    for child in element.children().filter(|n| n.is_element()) {
        let name = child.tag_name().name().to_string();
        let node = convert_element(child);

        match entries.get_mut(&name) {
            None => {
                entries.insert(name, node);
            }
            Some(existing) => push_repeated(existing, node),
        }
    }

    // Leaf text stays verbatim, like a plain text-only element
    let text = if has_child_elements { text.trim() } else { text.as_str() };
    if !text.trim().is_empty() {
        entries.insert(TEXT_KEY.to_string(), Node::string(text));
    }

    Node::Object(entries)
}

/// Cheap scan of the raw markup for element nesting deeper than `limit`.
///
/// Comments, CDATA sections, processing instructions and declarations are
/// skipped. Malformed markup stops the scan and is left for the parser to
/// report.
fn exceeds_depth(xml: &str, limit: usize) -> bool {
    let mut depth = 0usize;
    let mut rest = xml;

    while let Some(start) = rest.find('<') {
        rest = &rest[start..];

        let skip_to = |rest: &str, terminator: &str| {
            rest.find(terminator).map(|end| end + terminator.len())
        };
        let consumed = if rest.starts_with("<!--") {
            skip_to(rest, "-->")
        } else if rest.starts_with("<![CDATA[") {
            skip_to(rest, "]]>")
        } else if rest.starts_with("<?") {
            skip_to(rest, "?>")
        } else if rest.starts_with("<!") {
            skip_to(rest, ">")
        } else if rest.starts_with("</") {
            depth = depth.saturating_sub(1);
            skip_to(rest, ">")
        } else {
            match tag_end(rest) {
                Some(end) => {
                    if !rest[..end].ends_with("/>") {
                        depth += 1;
                        if depth > limit {
                            return true;
                        }
                    }
                    Some(end)
                }
                None => None,
            }
        };

        match consumed {
            Some(end) => rest = &rest[end..],
            None => break,
        }
    }

    false
}

/// Byte offset just past the `>` closing the start tag at the beginning of
/// `tag`, skipping `>` inside quoted attribute values.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in tag.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i + 1),
            (None, _) => {}
        }
    }
    None
}

/// Appends a repeated sibling, turning the first occurrence into an array.
///
/// `convert_element` never yields an array, so an existing array always means
/// the tag has already repeated.
fn push_repeated(existing: &mut Node, node: Node) {
    match existing {
        Node::Array(items) => items.push(node),
        Node::Object(_) | Node::Scalar(_) => {
            let first = std::mem::replace(existing, Node::Array(Vec::with_capacity(2)));
            if let Node::Array(items) = existing {
                items.push(first);
                items.push(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_text_is_string() {
        let root = parse_xml("<config><port>8080</port></config>").unwrap();
        assert_eq!(root.get_path(&["config", "port"]), Some(&Node::string("8080")));
    }

    #[test]
    fn test_empty_element_is_null() {
        let root = parse_xml("<config><debug/></config>").unwrap();
        assert_eq!(
            root.get_path(&["config", "debug"]),
            Some(&Node::Scalar(Scalar::Null))
        );
    }

    #[test]
    fn test_attributes_and_mixed_text() {
        let root = parse_xml(r#"<book id="bk101">Intro<title>XML</title></book>"#).unwrap();
        assert_eq!(root.get_path(&["book", "@id"]), Some(&Node::string("bk101")));
        assert_eq!(root.get_path(&["book", "title"]), Some(&Node::string("XML")));
        assert_eq!(root.get_path(&["book", "#text"]), Some(&Node::string("Intro")));
    }

    #[test]
    fn test_repeated_siblings_become_array() {
        let xml = "<list><item>a</item><item>b</item><item>c</item><end>z</end></list>";
        let root = parse_xml(xml).unwrap();

        let items = root.get_path(&["list", "item"]).unwrap();
        assert!(items.is_array());
        assert_eq!(items.len(), 3);
        assert_eq!(root.get_path(&["list", "item", "2"]), Some(&Node::string("c")));
        assert_eq!(root.get_path(&["list", "end"]), Some(&Node::string("z")));
    }

    #[test]
    fn test_whitespace_between_elements_is_ignored() {
        let xml = "<a>\n  <b>1</b>\n  <c>2</c>\n</a>";
        let root = parse_xml(xml).unwrap();
        match root.get_path(&["a"]) {
            Some(Node::Object(entries)) => {
                let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["b", "c"]);
            }
            other => panic!("Expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_doctype_is_accepted() {
        let xml = "<?xml version=\"1.0\"?>\n<!DOCTYPE note>\n<note><to>Tove</to></note>";
        let root = parse_xml(xml).unwrap();
        assert_eq!(root.get_path(&["note", "to"]), Some(&Node::string("Tove")));
    }

    #[test]
    fn test_parse_invalid_xml() {
        let result = parse_xml("<a><b></a>");
        assert!(matches!(
            result,
            Err(LoadError::SyntaxInvalid {
                format: Format::Xml,
                ..
            })
        ));
    }

    #[test]
    fn test_text_element_keeps_attributes() {
        let root = parse_xml(r#"<r><price currency="USD">10</price></r>"#).unwrap();
        assert_eq!(
            root.get_path(&["r", "price", "@currency"]),
            Some(&Node::string("USD"))
        );
        assert_eq!(root.get_path(&["r", "price", "#text"]), Some(&Node::string("10")));
    }

    #[test]
    fn test_empty_element_with_attributes_is_object() {
        let root = parse_xml(r#"<r><flag on="yes"/></r>"#).unwrap();
        let flag = root.get_path(&["r", "flag"]).unwrap();
        assert!(flag.is_object());
        assert_eq!(flag.len(), 1);
        assert_eq!(flag.get_path(&["@on"]), Some(&Node::string("yes")));
    }

    #[test]
    fn test_too_deep_nesting_is_rejected() {
        let depth = MAX_DEPTH + 1;
        let xml = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        match parse_xml(&xml) {
            Err(LoadError::SyntaxInvalid { format, message }) => {
                assert_eq!(format, Format::Xml);
                assert!(message.contains("nested"));
            }
            other => panic!("Expected SyntaxInvalid, got {:?}", other),
        }

        let deep = 10_000;
        let xml = format!("{}{}", "<a>".repeat(deep), "</a>".repeat(deep));
        assert!(parse_xml(&xml).is_err());
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let xml = format!(
            "{}x{}",
            "<a>".repeat(MAX_DEPTH),
            "</a>".repeat(MAX_DEPTH)
        );
        assert!(parse_xml(&xml).is_ok());
    }

    #[test]
    fn test_depth_scan_skips_non_elements() {
        let siblings = "<b/><!-- <c><c><c> --><![CDATA[<d><d>]]><?pi <e>?>";
        let xml = format!("<a>{}</a>", siblings.repeat(200));
        assert!(!exceeds_depth(&xml, 2));

        assert!(!exceeds_depth(r#"<a x="1>2"><b y='>'/></a>"#, 1));
        assert!(exceeds_depth("<a><b><c/></b></a>", 1));
    }
}
