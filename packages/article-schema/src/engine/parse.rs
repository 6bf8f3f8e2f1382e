//! Markup to document.

use tracing::{debug, warn};

use crate::markup::{Markup, MarkupElement};
use crate::model::{Mark, Node};
use crate::registry::{MarkPolicy, NodeSpec, Schema};

/// Node inserted between blocks whose content is lifted into inline content.
const LINE_BREAK: &str = "hard_break";

/// Walks a markup tree and builds a document using the schema's rules.
///
/// Elements are tried as nodes first, then as marks. An element that is
/// neither is a transparent wrapper: its children are walked in its place.
///
/// Content the parent's model does not admit is repaired rather than lost.
/// Inline runs in block-only parents are wrapped in the first admitted
/// node that takes inline content (a paragraph). Blocks that are not
/// admitted have their children walked in their place.
pub struct ParseEngine<'s> {
    schema: &'s Schema,
}

impl<'s> ParseEngine<'s> {
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Parse a markup root into a `doc` node.
    ///
    /// The root itself is walked like any other element, so a bare block
    /// (`<p>`), a wrapper (`<body>`, `<article>`) and a parsed fragment all
    /// work. A document without blocks gets one empty paragraph.
    #[must_use]
    pub fn parse_document(&self, root: &MarkupElement) -> Node {
        let doc = Node::new("doc");
        let Some(spec) = self.schema.node("doc") else {
            warn!("Schema has no doc type");
            return doc;
        };
        let mut content = Vec::new();
        self.walk_element(root, spec, &[], &mut content);
        doc.with_content(self.finish(spec, content))
    }

    fn walk(&self, children: &[Markup], parent: &NodeSpec, marks: &[Mark], out: &mut Vec<Node>) {
        for child in children {
            match child {
                Markup::Text(text) => self.add_text(text, parent, marks, out),
                Markup::Element(element) => self.walk_element(element, parent, marks, out),
            }
        }
    }

    fn walk_element(&self, element: &MarkupElement, parent: &NodeSpec, marks: &[Mark], out: &mut Vec<Node>) {
        if let Ok(node) = self.schema.decode(element) {
            self.add_node(node, element, parent, marks, out);
            return;
        }

        let found = self.schema.decode_marks(element);
        if found.is_empty() {
            debug!(tag = %element.tag, parent = %parent.name, "Descending into unknown element");
            self.walk(&element.children, parent, marks, out);
        } else {
            let marks = self.add_marks(marks, found);
            self.walk(&element.children, parent, &marks, out);
        }
    }

    fn add_node(
        &self,
        mut node: Node,
        element: &MarkupElement,
        parent: &NodeSpec,
        marks: &[Mark],
        out: &mut Vec<Node>,
    ) {
        let Some(spec) = self.schema.node(&node.type_name) else {
            return;
        };
        let inline_parent = self.accepts_inline(parent);

        if !self.admits(parent, &spec.name) {
            if !spec.inline {
                self.lift(spec, element, parent, marks, out);
                return;
            }
            if inline_parent {
                warn!(node = %spec.name, parent = %parent.name, "Dropping node not allowed here");
                return;
            }
        }

        if spec.inline {
            // In a block-only parent the marks are settled when the run is wrapped
            node.marks = if inline_parent {
                self.allowed_marks(marks, parent)
            } else {
                marks.to_vec()
            };
        }
        if !spec.is_leaf() {
            let mut content = Vec::new();
            self.walk(&element.children, spec, &[], &mut content);
            node.content = self.finish(spec, content);
        }
        out.push(node);
    }

    /// Walk the children of a node that is not allowed here in its place.
    fn lift(
        &self,
        spec: &NodeSpec,
        element: &MarkupElement,
        parent: &NodeSpec,
        marks: &[Mark],
        out: &mut Vec<Node>,
    ) {
        if spec.is_leaf() {
            warn!(node = %spec.name, parent = %parent.name, "Dropping node not allowed here");
            return;
        }
        debug!(node = %spec.name, parent = %parent.name, "Lifting content of node not allowed here");

        let separate = self.accepts_inline(parent)
            && self.schema.node(LINE_BREAK).is_some()
            && self.admits(parent, LINE_BREAK)
            && out.last().is_some_and(|last| self.is_inline(last));
        if separate {
            out.push(Node::new(LINE_BREAK));
        }
        self.walk(&element.children, parent, marks, out);
    }

    fn add_text(&self, text: &str, parent: &NodeSpec, marks: &[Mark], out: &mut Vec<Node>) {
        if text.is_empty() {
            return;
        }
        let marks = if self.accepts_inline(parent) {
            self.allowed_marks(marks, parent)
        } else {
            marks.to_vec()
        };
        out.push(Node::text(text).with_marks(marks));
    }

    /// Settle a parent's collected children: merge text, wrap stray inline
    /// runs and fill required content that came out empty.
    fn finish(&self, parent: &NodeSpec, mut content: Vec<Node>) -> Vec<Node> {
        if self.accepts_inline(parent) {
            merge_text(&mut content);
            return content;
        }

        let mut out = Vec::with_capacity(content.len());
        let mut run = Vec::new();
        for node in content {
            if self.is_inline(&node) {
                run.push(node);
            } else {
                self.wrap_run(parent, &mut run, &mut out);
                out.push(node);
            }
        }
        self.wrap_run(parent, &mut run, &mut out);

        if out.is_empty() && !self.matches(parent, &[]) {
            if let Some(wrapper) = self.inline_wrapper(parent) {
                if self.matches(parent, &[wrapper.name.as_str()]) {
                    out.push(Node::new(wrapper.name.as_str()).with_attrs(wrapper.default_attrs()));
                }
            }
        }
        out
    }

    fn wrap_run(&self, parent: &NodeSpec, run: &mut Vec<Node>, out: &mut Vec<Node>) {
        let mut nodes = std::mem::take(run);
        merge_text(&mut nodes);
        trim_run(&mut nodes);
        if nodes.is_empty() {
            return;
        }

        let Some(wrapper) = self.inline_wrapper(parent) else {
            warn!(parent = %parent.name, count = nodes.len(), "Dropping inline content with no block to wrap it");
            return;
        };
        debug!(parent = %parent.name, wrapper = %wrapper.name, "Wrapping inline content");
        for node in &mut nodes {
            node.marks = self.allowed_marks(&node.marks, wrapper);
        }
        merge_text(&mut nodes);
        out.push(
            Node::new(wrapper.name.as_str())
                .with_attrs(wrapper.default_attrs())
                .with_content(nodes),
        );
    }

    /// First block type, in catalog order, that the parent admits and
    /// that takes inline content.
    fn inline_wrapper(&self, parent: &NodeSpec) -> Option<&'s NodeSpec> {
        self.schema
            .node_names()
            .filter_map(|name| self.schema.node(name))
            .find(|spec| !spec.inline && self.admits(parent, &spec.name) && self.accepts_inline(spec))
    }

    /// Add marks to a set: same-type marks are replaced, order follows the catalog.
    fn add_marks(&self, current: &[Mark], found: Vec<Mark>) -> Vec<Mark> {
        let mut marks = current.to_vec();
        for mark in found {
            marks.retain(|m| m.type_name != mark.type_name);
            marks.push(mark);
        }
        marks.sort_by_key(|m| self.schema.mark_rank(&m.type_name));
        marks
    }

    fn allowed_marks(&self, marks: &[Mark], parent: &NodeSpec) -> Vec<Mark> {
        match parent.marks {
            MarkPolicy::All => marks.to_vec(),
            MarkPolicy::None => {
                if !marks.is_empty() {
                    warn!(parent = %parent.name, count = marks.len(), "Dropping marks not allowed here");
                }
                Vec::new()
            }
        }
    }

    fn admits(&self, parent: &NodeSpec, child: &str) -> bool {
        self.schema
            .content_expr(&parent.name)
            .is_some_and(|expr| expr.references().into_iter().any(|name| self.schema.admits(name, child)))
    }

    fn matches(&self, parent: &NodeSpec, children: &[&str]) -> bool {
        self.schema
            .content_expr(&parent.name)
            .is_some_and(|expr| expr.matches(children, &|name, child| self.schema.admits(name, child)))
    }

    fn accepts_inline(&self, parent: &NodeSpec) -> bool {
        self.admits(parent, "text")
    }

    fn is_inline(&self, node: &Node) -> bool {
        node.is_text() || self.schema.node(&node.type_name).is_some_and(|spec| spec.inline)
    }
}

/// Drop leading and trailing whitespace of a run that gets wrapped.
fn trim_run(nodes: &mut Vec<Node>) {
    while let Some(first) = nodes.first_mut() {
        let Some(text) = first.text.as_mut() else {
            break;
        };
        *text = text.trim_start().to_string();
        if !text.is_empty() {
            break;
        }
        nodes.remove(0);
    }
    while let Some(last) = nodes.last_mut() {
        let Some(text) = last.text.as_mut() else {
            break;
        };
        *text = text.trim_end().to_string();
        if !text.is_empty() {
            break;
        }
        nodes.pop();
    }
}

/// Join adjacent text nodes that carry the same marks.
fn merge_text(nodes: &mut Vec<Node>) {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes.drain(..) {
        if let (Some(last), Some(text)) = (merged.last_mut(), node.text.as_deref()) {
            if last.marks == node.marks {
                if let Some(existing) = last.text.as_mut() {
                    existing.push_str(text);
                    continue;
                }
            }
        }
        merged.push(node);
    }
    *nodes = merged;
}
