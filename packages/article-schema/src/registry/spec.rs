//! Node and mark type specifications.

use super::attribute::{decode_attrs, default_attrs, encode_attrs, AttributeSpec};
use super::dom::DomSpec;
use super::matcher::Matcher;
use crate::error::{Result, SchemaError};
use crate::markup::MarkupElement;
use crate::model::{Attrs, Mark, Node};

/// Which marks a node admits on its inline content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkPolicy {
    #[default]
    All,
    None,
}

/// Declarative specification of a node type.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    /// Unique type name.
    pub name: String,

    /// Content model expression; `None` for leaf types.
    pub content: Option<String>,

    /// Group tags used by parent content models.
    pub groups: Vec<String>,

    pub inline: bool,

    /// No user-editable structural children (media embeds, line breaks).
    pub atom: bool,

    pub marks: MarkPolicy,

    pub attrs: Vec<AttributeSpec>,

    /// Matchers in priority order; empty means never decoded from an element.
    pub parse: Vec<Matcher>,

    /// Encoded form; `None` for types without an element (`doc`, `text`).
    pub dom: Option<DomSpec>,
}

impl NodeSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: None,
            groups: Vec::new(),
            inline: false,
            atom: false,
            marks: MarkPolicy::All,
            attrs: Vec::new(),
            parse: Vec::new(),
            dom: None,
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    #[must_use]
    pub fn atom(mut self) -> Self {
        self.atom = true;
        self
    }

    #[must_use]
    pub fn with_marks(mut self, marks: MarkPolicy) -> Self {
        self.marks = marks;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, attr: AttributeSpec) -> Self {
        self.attrs.push(attr);
        self
    }

    #[must_use]
    pub fn with_parse(mut self, matcher: Matcher) -> Self {
        self.parse.push(matcher);
        self
    }

    #[must_use]
    pub fn with_dom(mut self, dom: DomSpec) -> Self {
        self.dom = Some(dom);
        self
    }

    #[must_use]
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// A node is a leaf when it has no content model.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.content.is_none()
    }

    #[must_use]
    pub fn default_attrs(&self) -> Attrs {
        default_attrs(&self.attrs)
    }

    /// Decode attributes if any matcher accepts the element.
    #[must_use]
    pub fn from_markup(&self, element: &MarkupElement) -> Option<Attrs> {
        self.parse
            .iter()
            .any(|matcher| matcher.matches(element))
            .then(|| decode_attrs(&self.attrs, element))
    }

    /// Encode a node of this type into its markup descriptor.
    pub fn to_markup(&self, node: &Node) -> Result<DomSpec> {
        let mut dom = self.dom.clone().ok_or_else(|| SchemaError::NoMarkupForm {
            name: self.name.clone(),
        })?;
        encode_attrs(&self.name, &self.attrs, &node.attrs, &mut dom.attrs)?;
        Ok(dom)
    }
}

/// Declarative specification of a mark type.
#[derive(Debug, Clone)]
pub struct MarkSpec {
    pub name: String,
    pub attrs: Vec<AttributeSpec>,
    pub parse: Vec<Matcher>,
    /// Encoded wrapper; always holds a content hole.
    pub dom: DomSpec,
}

impl MarkSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, dom: DomSpec) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            parse: Vec::new(),
            dom,
        }
    }

    #[must_use]
    pub fn with_attr(mut self, attr: AttributeSpec) -> Self {
        self.attrs.push(attr);
        self
    }

    #[must_use]
    pub fn with_parse(mut self, matcher: Matcher) -> Self {
        self.parse.push(matcher);
        self
    }

    #[must_use]
    pub fn from_markup(&self, element: &MarkupElement) -> Option<Attrs> {
        self.parse
            .iter()
            .any(|matcher| matcher.matches(element))
            .then(|| decode_attrs(&self.attrs, element))
    }

    pub fn to_markup(&self, mark: &Mark) -> Result<DomSpec> {
        let mut dom = self.dom.clone();
        encode_attrs(&self.name, &self.attrs, &mark.attrs, &mut dom.attrs)?;
        Ok(dom)
    }
}
