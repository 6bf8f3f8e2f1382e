//! XHTML reader built on `roxmltree`.
//!
//! Input must be well-formed XML: void elements self-closed (`<br/>`) and
//! no HTML-only entities.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node};

use super::{Markup, MarkupElement};
use crate::error::Result;

/// Tag of the element that [`parse_xhtml_fragment`] wraps its input in.
pub const FRAGMENT_ROOT: &str = "fragment";

/// Optional XML declaration and doctype at the start of a document.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PROLOG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:<\?xml[^>]*\?>)?\s*(?i:<!doctype[^>]*>)?").expect("valid regex")
});

/// Parse an XHTML string into a markup tree rooted at its root element.
///
/// Comments and processing instructions are dropped. Tag and attribute
/// names lose their namespace prefix.
///
/// # Examples
/// ```
/// use article_schema::markup::parse_xhtml;
///
/// let root = parse_xhtml(r#"<hr data-style="2"/>"#).unwrap();
/// assert_eq!(root.tag, "hr");
/// assert_eq!(root.attribute("data-style"), Some("2"));
/// ```
pub fn parse_xhtml(input: &str) -> Result<MarkupElement> {
    let doc = Document::parse(input)?;
    Ok(convert_element(doc.root_element()))
}

/// Parse an XHTML fragment: any number of top-level elements and text.
///
/// The input is wrapped in a synthetic [`FRAGMENT_ROOT`] element, so the
/// fragment's nodes become that element's children. A leading XML
/// declaration or doctype is skipped; a complete document works too and
/// ends up as the single child.
///
/// # Examples
/// ```
/// use article_schema::markup::{parse_xhtml_fragment, FRAGMENT_ROOT};
///
/// let root = parse_xhtml_fragment("<p>a</p><p>b</p>").unwrap();
/// assert_eq!(root.tag, FRAGMENT_ROOT);
/// assert_eq!(root.element_children().count(), 2);
/// ```
pub fn parse_xhtml_fragment(input: &str) -> Result<MarkupElement> {
    let body = PROLOG_PATTERN
        .find(input)
        .map_or(input, |prolog| &input[prolog.end()..]);
    parse_xhtml(&format!("<{FRAGMENT_ROOT}>{body}</{FRAGMENT_ROOT}>"))
}

fn convert_element(node: Node<'_, '_>) -> MarkupElement {
    let attrs = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();

    let children = node
        .children()
        .filter_map(|child| {
            if child.is_element() {
                Some(Markup::Element(convert_element(child)))
            } else if child.is_text() {
                child.text().map(Markup::text)
            } else {
                None
            }
        })
        .collect();

    MarkupElement {
        tag: node.tag_name().name().to_ascii_lowercase(),
        attrs,
        children,
    }
}
