//! Markup matching predicates.

use crate::markup::MarkupElement;

/// Decides whether a markup element is a candidate for a node or mark type.
///
/// Every configured condition must hold. Matchers are tried in
/// registration order and the first hit wins.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    /// Required tag name; `None` matches any tag.
    pub tag: Option<String>,

    /// Required attribute, optionally with an exact value.
    pub attribute: Option<(String, Option<String>)>,

    /// Required non-empty style property.
    pub style: Option<String>,

    /// Extra pure predicate over the element.
    pub guard: Option<fn(&MarkupElement) -> bool>,
}

impl Matcher {
    /// Match elements by tag name.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Match any element carrying a style property.
    #[must_use]
    pub fn style(property: impl Into<String>) -> Self {
        Self {
            style: Some(property.into()),
            ..Self::default()
        }
    }

    /// Require an attribute to be present.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>) -> Self {
        self.attribute = Some((name.into(), None));
        self
    }

    /// Require an attribute with an exact value (e.g. a role marker).
    #[must_use]
    pub fn with_attr_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute = Some((name.into(), Some(value.into())));
        self
    }

    #[must_use]
    pub fn with_guard(mut self, guard: fn(&MarkupElement) -> bool) -> Self {
        self.guard = Some(guard);
        self
    }

    #[must_use]
    pub fn matches(&self, element: &MarkupElement) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != element.tag) {
            return false;
        }

        if let Some((name, expected)) = &self.attribute {
            match (element.attribute(name), expected) {
                (None, _) => return false,
                (Some(actual), Some(expected)) if actual != expected => return false,
                _ => {}
            }
        }

        if let Some(property) = &self.style {
            if element.style_property(property).is_none() {
                return false;
            }
        }

        self.guard.is_none_or(|guard| guard(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_matcher() {
        let matcher = Matcher::tag("hr");
        assert!(matcher.matches(&MarkupElement::new("hr")));
        assert!(!matcher.matches(&MarkupElement::new("br")));
    }

    #[test]
    fn test_attr_value_matcher() {
        let matcher = Matcher::tag("div").with_attr_value("data-node", "video");
        assert!(matcher.matches(&MarkupElement::new("div").with_attr("data-node", "video")));
        assert!(!matcher.matches(&MarkupElement::new("div").with_attr("data-node", "audio")));
        assert!(!matcher.matches(&MarkupElement::new("div")));
    }

    #[test]
    fn test_attr_presence_matcher() {
        let matcher = Matcher::tag("a").with_attr("href");
        assert!(matcher.matches(&MarkupElement::new("a").with_attr("href", "")));
        assert!(!matcher.matches(&MarkupElement::new("a").with_attr("name", "x")));
    }

    #[test]
    fn test_style_matcher_any_tag() {
        let matcher = Matcher::style("color");
        assert!(matcher.matches(&MarkupElement::new("span").with_attr("style", "color: red")));
        assert!(matcher.matches(&MarkupElement::new("font").with_attr("style", "COLOR:blue")));
        assert!(!matcher.matches(&MarkupElement::new("span").with_attr("style", "margin: 0")));
    }

    #[test]
    fn test_guard() {
        fn has_children(el: &MarkupElement) -> bool {
            !el.children.is_empty()
        }
        let matcher = Matcher::tag("p").with_guard(has_children);
        assert!(!matcher.matches(&MarkupElement::new("p")));
    }
}
