//! End-to-end tests for the article schema.
//!
//! Runs loose XHTML fixtures through the default schema and checks the
//! canonical markup and structured documents that come out.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use article_schema::catalog::{create_article_schema, default_schema};
use article_schema::config::SchemaConfig;
use article_schema::engine::{decode_document, encode_document};
use article_schema::markup::{parse_xhtml, MarkupElement};
use article_schema::model::{AttrValue, Mark, Node};
use article_schema::registry::Schema;
use article_schema::SchemaError;

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn decode_element(schema: &Schema, xhtml: &str) -> Node {
    let element = parse_xhtml(xhtml).expect("Failed to parse markup");
    schema.decode(&element).expect("No node type matched")
}

/// Encode a childless node and decode the element again.
fn element_round_trip(schema: &Schema, node: &Node) -> Node {
    let element: MarkupElement = schema.encode(node).expect("encode failed").render(Vec::new());
    schema.decode(&element).expect("No node type matched")
}

#[test]
fn test_normalize_article_fixture() {
    let schema = default_schema();
    let doc = decode_document(schema, &load_fixture("article.xhtml")).unwrap();
    let markup = encode_document(schema, &doc).unwrap();

    assert_eq!(markup, load_fixture("article.canonical.xhtml").trim_end());
}

#[test]
fn test_canonical_markup_is_fixed_point() {
    let schema = default_schema();
    let canonical = load_fixture("article.canonical.xhtml");

    let doc = decode_document(schema, &canonical).unwrap();
    assert_eq!(encode_document(schema, &doc).unwrap(), canonical.trim_end());
}

#[test]
fn test_document_round_trip() {
    let schema = default_schema();
    let doc = decode_document(schema, &load_fixture("article.xhtml")).unwrap();
    schema.check(&doc).unwrap();

    let markup = encode_document(schema, &doc).unwrap();
    let again = decode_document(schema, &markup).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn test_article_structure() {
    let doc = decode_document(default_schema(), &load_fixture("article.xhtml")).unwrap();

    let types: Vec<_> = doc.content.iter().map(|n| n.type_name.as_str()).collect();
    assert_eq!(
        types,
        vec!["heading", "paragraph", "horizontal_rule", "video", "table", "blockquote"]
    );

    let paragraph = &doc.content[1];
    assert_eq!(paragraph.attr("align"), Some(&AttrValue::text("right")));
    assert_eq!(
        paragraph.content,
        vec![
            Node::text("Hello "),
            Node::text("bold").with_marks([Mark::new("strong")]),
            Node::text(" and "),
            Node::text("under").with_marks([Mark::new("underline")]),
            Node::text("."),
        ]
    );

    let cell = &doc.content[4].content[0].content[1];
    assert_eq!(cell.type_name, "table_cell");
    assert_eq!(cell.attr("background"), Some(&AttrValue::text("#008000")));
    assert_eq!(cell.attr("colwidth"), Some(&AttrValue::List(vec![100, 50])));
}

#[test]
fn test_video_attributes_verbatim() {
    let node = decode_element(
        default_schema(),
        r#"<div data-node="video" data-source="yt" data-source-id="abc" data-url="http://x" data-title="T" data-thumbnail="http://y/thumb.png"/>"#,
    );

    assert_eq!(
        node,
        Node::new("video")
            .with_attr("source", "yt")
            .with_attr("source_id", "abc")
            .with_attr("url", "http://x")
            .with_attr("title", "T")
            .with_attr("thumbnail", "http://y/thumb.png")
    );
}

#[test]
fn test_divider_style_out_of_range() {
    let node = decode_element(default_schema(), r#"<hr data-style="9"/>"#);
    assert_eq!(node, Node::new("horizontal_rule").with_attr("style", "1"));
}

#[test]
fn test_plain_div_is_not_video() {
    let element = parse_xhtml(r#"<div data-node="audio"/>"#).unwrap();
    let err = default_schema().decode(&element).unwrap_err();
    assert_eq!(err.tag, "div");
}

#[test]
fn test_active_marks_after_exclusion() {
    let schema = default_schema();
    assert_eq!(
        schema.mark_names().collect::<Vec<_>>(),
        vec!["strong", "underline"]
    );
    for name in ["link", "code", "em", "font_size", "color"] {
        assert!(schema.mark(name).is_none(), "{name} should not be active");
    }

    // The specs still exist in the base catalog
    let full = create_article_schema(&SchemaConfig::all_marks()).unwrap();
    for name in ["link", "code", "em", "font_size", "color"] {
        assert!(full.mark(name).is_some(), "{name} should exist in the catalog");
    }
}

#[test]
fn test_every_node_type_round_trips() {
    let schema = default_schema();
    let nodes = [
        Node::new("paragraph").with_attr("align", "center"),
        Node::new("image")
            .with_attr("src", "/cat.png")
            .with_attr("alt", "A cat"),
        Node::new("video")
            .with_attr("source", "vimeo")
            .with_attr("source_id", "42")
            .with_attr("url", "https://vimeo.com/42")
            .with_attr("title", "Intro")
            .with_attr("thumbnail", ""),
        Node::new("blockquote"),
        Node::new("horizontal_rule").with_attr("style", "3"),
        Node::new("heading"),
        Node::new("table"),
        Node::new("table_row"),
        Node::new("table_cell")
            .with_attr("colspan", 2)
            .with_attr("rowspan", 1)
            .with_attr("colwidth", AttrValue::List(vec![120, 80]))
            .with_attr("background", "#fafad2"),
        Node::new("table_header")
            .with_attr("colspan", 1)
            .with_attr("rowspan", 3)
            .with_attr("colwidth", AttrValue::Null)
            .with_attr("background", AttrValue::Null),
        Node::new("hard_break"),
    ];

    for node in &nodes {
        assert_eq!(&element_round_trip(schema, node), node);
    }
}

#[test]
fn test_every_mark_round_trips() {
    let schema = create_article_schema(&SchemaConfig::all_marks()).unwrap();
    let marks = [
        Mark::new("strong"),
        Mark::new("em"),
        Mark::new("code"),
        Mark::new("link")
            .with_attr("href", "https://example.org")
            .with_attr("title", "Example"),
        Mark::new("link")
            .with_attr("href", "/local")
            .with_attr("title", AttrValue::Null),
        Mark::new("underline"),
        Mark::new("font_size").with_attr("level", 5),
        Mark::new("color").with_attr("color", "#336699"),
    ];

    for mark in &marks {
        let element = schema.encode_mark(mark).unwrap().render(Vec::new());
        assert_eq!(&schema.decode_marks(&element), &vec![mark.clone()]);
    }
}

#[test]
fn test_check_rejects_invalid_documents() {
    let schema = default_schema();

    let heading_with_block = Node::new("doc").with_content([
        Node::new("heading").with_content([Node::new("paragraph")]),
    ]);
    assert!(matches!(
        schema.check(&heading_with_block),
        Err(SchemaError::InvalidContent { .. })
    ));

    let heading_with_mark = Node::new("doc").with_content([Node::new("heading")
        .with_content([Node::text("Loud").with_marks([Mark::new("strong")])])]);
    assert!(matches!(
        schema.check(&heading_with_mark),
        Err(SchemaError::MarkNotAllowed { .. })
    ));

    let empty_cell = Node::new("doc").with_content([Node::new("table").with_content([
        Node::new("table_row").with_content([Node::new("table_cell")]),
    ])]);
    assert!(matches!(
        schema.check(&empty_cell),
        Err(SchemaError::InvalidContent { ref type_name, .. }) if type_name == "table_cell"
    ));
}

#[test]
fn test_json_document_encodes() {
    let json = r#"{
        "type": "doc",
        "content": [
            {"type": "paragraph", "attrs": {"align": "center"}, "content": [
                {"type": "text", "text": "a & b", "marks": [{"type": "underline"}]}
            ]}
        ]
    }"#;
    let doc: Node = serde_json::from_str(json).unwrap();
    assert_eq!(
        encode_document(default_schema(), &doc).unwrap(),
        r#"<p style="text-align: center;"><span style="text-decoration: underline">a &amp; b</span></p>"#
    );
}

#[test]
fn test_loose_cell_and_quote_content_is_repaired() {
    let schema = default_schema();
    let doc = decode_document(
        schema,
        "<table><tbody><tr><td>Price</td></tr></tbody></table>\
         <blockquote><p>Famous words</p></blockquote>",
    )
    .unwrap();
    schema.check(&doc).unwrap();

    assert_eq!(
        encode_document(schema, &doc).unwrap(),
        r#"<table><tbody><tr><td><p style="text-align: left;">Price</p></td></tr></tbody></table><blockquote>Famous words</blockquote>"#
    );
}

#[test]
fn test_empty_input_is_valid_document() {
    let schema = default_schema();
    let doc = decode_document(schema, "").unwrap();
    schema.check(&doc).unwrap();
    assert_eq!(encode_document(schema, &doc).unwrap(), r#"<p style="text-align: left;"/>"#);
}

#[test]
fn test_malformed_markup() {
    let err = decode_document(default_schema(), "<p>unclosed").unwrap_err();
    assert!(matches!(err, SchemaError::XmlParse(_)));
}
