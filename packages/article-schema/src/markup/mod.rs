//! Markup tree model.
//!
//! A small, owned DOM-like tree: elements with an ordered attribute list
//! and children, plus text. Decoders read from it; encoders produce it.

mod reader;
mod writer;

pub use reader::{parse_xhtml, parse_xhtml_fragment, FRAGMENT_ROOT};
pub use writer::{to_xhtml, write_fragment};

use crate::codec::style::{append_style, style_property};

/// Ordered attribute list of a markup element.
///
/// Insertion order is preserved so encoded output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupAttrs(Vec<(String, String)>);

impl MarkupAttrs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Append a fragment to the `style` attribute, keeping existing content.
    pub fn append_style(&mut self, fragment: &str) {
        let style = append_style(self.get("style"), fragment);
        self.set("style", style);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MarkupAttrs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.set(key, value);
        }
        attrs
    }
}

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element(MarkupElement),
    Text(String),
}

impl Markup {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl From<MarkupElement> for Markup {
    fn from(element: MarkupElement) -> Self {
        Self::Element(element)
    }
}

/// A markup element: tag, attributes, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    /// Tag name without namespace, lowercase for HTML input.
    pub tag: String,
    pub attrs: MarkupAttrs,
    pub children: Vec<Markup>,
}

impl MarkupElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: MarkupAttrs::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Look up a property in the element's `style` attribute.
    #[must_use]
    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.attribute("style")
            .and_then(|style| style_property(style, property))
    }

    /// Iterate over child elements, skipping text.
    pub fn element_children(&self) -> impl Iterator<Item = &MarkupElement> {
        self.children.iter().filter_map(|child| match child {
            Markup::Element(element) => Some(element),
            Markup::Text(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_set_replaces_in_place() {
        let mut attrs: MarkupAttrs = [("src", "a.png"), ("alt", "A")].into_iter().collect();
        attrs.set("src", "b.png");

        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("src", "b.png"), ("alt", "A")]);
    }

    #[test]
    fn test_attrs_append_style() {
        let mut attrs = MarkupAttrs::new();
        attrs.set("style", "font-weight:bold;");
        attrs.append_style("background-color: #ff0000;");
        assert_eq!(
            attrs.get("style"),
            Some("font-weight:bold;background-color: #ff0000;")
        );
    }

    #[test]
    fn test_element_style_property() {
        let el = MarkupElement::new("p").with_attr("style", "TEXT-ALIGN: Right");
        assert_eq!(el.style_property("text-align"), Some("Right"));
        assert_eq!(el.style_property("color"), None);
    }

    #[test]
    fn test_element_children_skip_text() {
        let el = MarkupElement::new("p").with_children([
            Markup::text("a "),
            MarkupElement::new("strong")
                .with_children([Markup::text("b")])
                .into(),
            Markup::text(" c"),
        ]);
        let tags: Vec<_> = el.element_children().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["strong"]);
    }
}
