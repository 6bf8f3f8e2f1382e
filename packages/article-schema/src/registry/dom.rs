//! Markup descriptors produced by encoding.

use tracing::warn;

use crate::markup::{Markup, MarkupAttrs, MarkupElement};

/// What goes inside an encoded element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomContent {
    /// No children (atomic and leaf types).
    Empty,
    /// The node's children go directly inside the element.
    Hole,
    /// A fixed wrapper element holds the hole (e.g. `table > tbody`).
    Wrap(Box<DomSpec>),
}

/// Markup descriptor: tag, attributes and content shape.
///
/// Type specs hold one of these as a template (fixed attributes only);
/// encoding fills in the attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSpec {
    pub tag: String,
    pub attrs: MarkupAttrs,
    pub content: DomContent,
}

impl DomSpec {
    /// An element whose children go straight inside it.
    #[must_use]
    pub fn with_hole(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: MarkupAttrs::new(),
            content: DomContent::Hole,
        }
    }

    /// An element with no children.
    #[must_use]
    pub fn leaf(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: MarkupAttrs::new(),
            content: DomContent::Empty,
        }
    }

    /// An element wrapping a fixed inner template.
    #[must_use]
    pub fn wrapping(tag: impl Into<String>, inner: DomSpec) -> Self {
        Self {
            tag: tag.into(),
            attrs: MarkupAttrs::new(),
            content: DomContent::Wrap(Box::new(inner)),
        }
    }

    /// Add a fixed attribute, such as a role marker.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Whether the descriptor has a place for children.
    #[must_use]
    pub fn has_hole(&self) -> bool {
        match &self.content {
            DomContent::Empty => false,
            DomContent::Hole => true,
            DomContent::Wrap(inner) => inner.has_hole(),
        }
    }

    /// Build the markup element, putting `children` into the hole.
    #[must_use]
    pub fn render(self, children: Vec<Markup>) -> MarkupElement {
        let children = match self.content {
            DomContent::Empty => {
                if !children.is_empty() {
                    warn!(tag = %self.tag, "Dropping children of an element without content");
                }
                Vec::new()
            }
            DomContent::Hole => children,
            DomContent::Wrap(inner) => vec![Markup::Element(inner.render(children))],
        };
        MarkupElement {
            tag: self.tag,
            attrs: self.attrs,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_hole() {
        let el = DomSpec::with_hole("blockquote").render(vec![Markup::text("q")]);
        assert_eq!(el.tag, "blockquote");
        assert_eq!(el.children, vec![Markup::text("q")]);
    }

    #[test]
    fn test_render_wrapped_template() {
        let spec = DomSpec::wrapping("table", DomSpec::with_hole("tbody"));
        assert!(spec.has_hole());

        let row = MarkupElement::new("tr");
        let el = spec.render(vec![row.clone().into()]);
        let tbody = el.element_children().next().unwrap();
        assert_eq!(tbody.tag, "tbody");
        assert_eq!(tbody.children, vec![Markup::Element(row)]);
    }

    #[test]
    fn test_render_leaf_drops_children() {
        let spec = DomSpec::leaf("hr");
        assert!(!spec.has_hole());
        let el = spec.render(vec![Markup::text("x")]);
        assert!(el.children.is_empty());
    }
}
