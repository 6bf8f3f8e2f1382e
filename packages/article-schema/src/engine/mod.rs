//! Reference tree walker.
//!
//! The registry decodes and encodes one element at a time. The engines in
//! here apply those rules to whole trees: markup to document in
//! [`ParseEngine`], document to markup in [`SerializeEngine`].

mod parse;
mod serialize;

pub use parse::ParseEngine;
pub use serialize::SerializeEngine;

use crate::error::Result;
use crate::markup::{parse_xhtml_fragment, write_fragment};
use crate::model::Node;
use crate::registry::Schema;

/// Parse an XHTML document or fragment into a `doc` node.
///
/// Accepts the output of [`encode_document`], which may have several
/// top-level elements.
///
/// # Errors
/// Returns `XmlParse` if the input is not well-formed.
pub fn decode_document(schema: &Schema, xhtml: &str) -> Result<Node> {
    let root = parse_xhtml_fragment(xhtml)?;
    Ok(ParseEngine::new(schema).parse_document(&root))
}

/// Serialize a `doc` node into an XHTML fragment.
///
/// # Errors
/// Returns an error if a node or mark cannot be encoded.
pub fn encode_document(schema: &Schema, doc: &Node) -> Result<String> {
    let markup = SerializeEngine::new(schema).serialize_document(doc)?;
    Ok(write_fragment(&markup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_schema;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_reads_encoded_fragment() {
        let schema = default_schema();
        let markup = r#"<h2>Title</h2><p style="text-align: center;">Body</p><hr data-style="3"/>"#;

        let doc = decode_document(schema, markup).unwrap();
        assert_eq!(doc.content.len(), 3);
        assert_eq!(encode_document(schema, &doc).unwrap(), markup);
    }

    #[test]
    fn test_decode_skips_xml_declaration() {
        let doc = decode_document(default_schema(), "<?xml version=\"1.0\"?>\n<p>a</p><p>b</p>").unwrap();
        assert_eq!(doc.content.len(), 2);
    }
}
