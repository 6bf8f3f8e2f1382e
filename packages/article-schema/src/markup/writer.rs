//! Deterministic XHTML writer.

use super::{Markup, MarkupElement};

/// Serialize an element and its subtree.
///
/// Childless elements are self-closed, so output parses back with
/// [`parse_xhtml`](super::parse_xhtml).
#[must_use]
pub fn to_xhtml(element: &MarkupElement) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

/// Serialize a sequence of markup nodes back to back.
#[must_use]
pub fn write_fragment(nodes: &[Markup]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &Markup, out: &mut String) {
    match node {
        Markup::Element(element) => write_element(element, out),
        Markup::Text(text) => escape_into(text, false, out),
    }
}

fn write_element(element: &MarkupElement, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in element.attrs.iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_xhtml;

    #[test]
    fn test_write_void_and_nested() {
        let el = MarkupElement::new("p")
            .with_attr("style", "text-align: left;")
            .with_children([
                Markup::text("a < b"),
                MarkupElement::new("br").into(),
            ]);
        assert_eq!(
            to_xhtml(&el),
            r#"<p style="text-align: left;">a &lt; b<br/></p>"#
        );
    }

    #[test]
    fn test_write_escapes_attribute_quotes() {
        let el = MarkupElement::new("img").with_attr("alt", r#"say "hi" & bye"#);
        assert_eq!(to_xhtml(&el), r#"<img alt="say &quot;hi&quot; &amp; bye"/>"#);
    }

    #[test]
    fn test_written_markup_parses_back() {
        let el = MarkupElement::new("div")
            .with_attr("data-node", "video")
            .with_attr("data-title", "Tom & Jerry");
        let parsed = parse_xhtml(&to_xhtml(&el)).unwrap();
        assert_eq!(parsed, el);
    }

    #[test]
    fn test_write_fragment() {
        let nodes = vec![
            Markup::Element(MarkupElement::new("hr").with_attr("data-style", "1")),
            Markup::text("x"),
        ];
        assert_eq!(write_fragment(&nodes), r#"<hr data-style="1"/>x"#);
    }
}
