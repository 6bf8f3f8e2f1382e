//! Schema registry: the immutable catalog of node and mark types.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use super::dom::DomSpec;
use super::spec::{MarkPolicy, MarkSpec, NodeSpec};
use crate::content::ContentExpr;
use crate::error::{DecodeMismatch, Result, SchemaError, TypeKind};
use crate::markup::MarkupElement;
use crate::model::{Mark, Node};

static LEAF: ContentExpr = ContentExpr::Empty;

/// Collects type specs and turns them into a [`Schema`].
///
/// Registration order is parse priority: when two specs match the same
/// element, the one registered first wins.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    nodes: Vec<NodeSpec>,
    marks: Vec<MarkSpec>,
    excluded_marks: BTreeSet<String>,
}

impl SchemaBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type.
    ///
    /// # Errors
    /// Returns `DuplicateType` if a node with the same name exists.
    pub fn register_node(&mut self, spec: NodeSpec) -> Result<()> {
        if self.nodes.iter().any(|n| n.name == spec.name) {
            return Err(SchemaError::DuplicateType {
                kind: TypeKind::Node,
                name: spec.name,
            });
        }
        self.nodes.push(spec);
        Ok(())
    }

    /// Register a mark type.
    ///
    /// # Errors
    /// Returns `DuplicateType` if a mark with the same name exists.
    pub fn register_mark(&mut self, spec: MarkSpec) -> Result<()> {
        if self.marks.iter().any(|m| m.name == spec.name) {
            return Err(SchemaError::DuplicateType {
                kind: TypeKind::Mark,
                name: spec.name,
            });
        }
        self.marks.push(spec);
        Ok(())
    }

    /// Leave these marks out of the built schema.
    ///
    /// The registered specs are untouched; exclusion happens in `build`.
    pub fn exclude_marks(&mut self, names: impl IntoIterator<Item = impl Into<String>>) {
        self.excluded_marks
            .extend(names.into_iter().map(Into::into));
    }

    /// Validate content models and produce the immutable schema.
    ///
    /// # Errors
    /// Returns `InvalidContentExpression` for unparseable content models
    /// and `DanglingContentReference` for names that are neither a node
    /// nor a group.
    pub fn build(self) -> Result<Schema> {
        for name in &self.excluded_marks {
            if !self.marks.iter().any(|m| &m.name == name) {
                warn!(mark = %name, "Excluded mark is not in the catalog");
            }
        }

        let known: BTreeSet<&str> = self
            .nodes
            .iter()
            .flat_map(|n| std::iter::once(n.name.as_str()).chain(n.groups.iter().map(String::as_str)))
            .collect();

        let mut content = Vec::with_capacity(self.nodes.len());
        for spec in &self.nodes {
            let expr = match &spec.content {
                Some(source) => ContentExpr::parse(source)?,
                None => ContentExpr::Empty,
            };
            if let Some(reference) = expr.references().into_iter().find(|r| !known.contains(r)) {
                return Err(SchemaError::DanglingContentReference {
                    type_name: spec.name.clone(),
                    reference: reference.to_string(),
                });
            }
            content.push(expr);
        }

        let excluded = self.excluded_marks;
        let marks: Vec<MarkSpec> = self
            .marks
            .into_iter()
            .filter(|m| !excluded.contains(&m.name))
            .collect();

        let node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.name.clone(), i))
            .collect();
        let mark_index = marks
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.clone(), i))
            .collect();

        debug!(
            nodes = self.nodes.len(),
            marks = marks.len(),
            excluded = excluded.len(),
            "Schema built"
        );

        Ok(Schema {
            nodes: self.nodes,
            content,
            marks,
            node_index,
            mark_index,
        })
    }
}

/// Immutable registry of node and mark types.
///
/// Built once and shared by reference; every operation is a pure function
/// of its input and the catalog.
#[derive(Debug)]
pub struct Schema {
    nodes: Vec<NodeSpec>,
    content: Vec<ContentExpr>,
    marks: Vec<MarkSpec>,
    node_index: HashMap<String, usize>,
    mark_index: HashMap<String, usize>,
}

impl Schema {
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&NodeSpec> {
        self.node_index.get(name).map(|&i| &self.nodes[i])
    }

    #[must_use]
    pub fn mark(&self, name: &str) -> Option<&MarkSpec> {
        self.mark_index.get(name).map(|&i| &self.marks[i])
    }

    /// Node names in registration order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Active mark names in registration order.
    pub fn mark_names(&self) -> impl Iterator<Item = &str> {
        self.marks.iter().map(|m| m.name.as_str())
    }

    /// Node types that carry a group tag.
    #[must_use]
    pub fn nodes_in_group(&self, group: &str) -> Vec<&NodeSpec> {
        self.nodes.iter().filter(|n| n.in_group(group)).collect()
    }

    /// Compiled content model of a node type.
    #[must_use]
    pub fn content_expr(&self, name: &str) -> Option<&ContentExpr> {
        self.node_index.get(name).map(|&i| &self.content[i])
    }

    /// Position of a mark in the catalog, used to order mark sets.
    #[must_use]
    pub fn mark_rank(&self, name: &str) -> Option<usize> {
        self.mark_index.get(name).copied()
    }

    /// Decode one markup element into a node (without children).
    ///
    /// The first node type whose matcher accepts the element wins. Each
    /// attribute decodes on its own and falls back to its default.
    ///
    /// # Errors
    /// Returns `DecodeMismatch` when no node type matches.
    pub fn decode(&self, element: &MarkupElement) -> std::result::Result<Node, DecodeMismatch> {
        self.nodes
            .iter()
            .find_map(|spec| {
                spec.from_markup(element)
                    .map(|attrs| Node::new(spec.name.as_str()).with_attrs(attrs))
            })
            .ok_or_else(|| DecodeMismatch {
                tag: element.tag.clone(),
            })
    }

    /// Every active mark the element expresses, in catalog order.
    #[must_use]
    pub fn decode_marks(&self, element: &MarkupElement) -> Vec<Mark> {
        self.marks
            .iter()
            .filter_map(|spec| {
                spec.from_markup(element).map(|attrs| Mark {
                    type_name: spec.name.clone(),
                    attrs,
                })
            })
            .collect()
    }

    /// Encode a node into its markup descriptor.
    ///
    /// # Errors
    /// `UnknownType` for an unregistered type, `NoMarkupForm` for `doc`
    /// and `text`, `InvalidAttribute` for non-canonical attribute values.
    pub fn encode(&self, node: &Node) -> Result<DomSpec> {
        let spec = self.node(&node.type_name).ok_or_else(|| SchemaError::UnknownType {
            kind: TypeKind::Node,
            name: node.type_name.clone(),
        })?;
        spec.to_markup(node)
    }

    /// Encode a mark into its wrapper descriptor.
    ///
    /// # Errors
    /// `UnknownType` for a mark that is not active in this schema.
    pub fn encode_mark(&self, mark: &Mark) -> Result<DomSpec> {
        let spec = self.mark(&mark.type_name).ok_or_else(|| SchemaError::UnknownType {
            kind: TypeKind::Mark,
            name: mark.type_name.clone(),
        })?;
        spec.to_markup(mark)
    }

    /// Whether `name` (node or group) in a content model admits `child`.
    #[must_use]
    pub fn admits(&self, name: &str, child: &str) -> bool {
        name == child || self.node(child).is_some_and(|spec| spec.in_group(name))
    }

    /// Validate a structured tree against content models and mark policies.
    ///
    /// # Errors
    /// `UnknownType`, `InvalidContent` or `MarkNotAllowed` for the first
    /// violation found, depth first.
    pub fn check(&self, node: &Node) -> Result<()> {
        let spec = self.node(&node.type_name).ok_or_else(|| SchemaError::UnknownType {
            kind: TypeKind::Node,
            name: node.type_name.clone(),
        })?;

        for mark in &node.marks {
            if self.mark(&mark.type_name).is_none() {
                return Err(SchemaError::UnknownType {
                    kind: TypeKind::Mark,
                    name: mark.type_name.clone(),
                });
            }
        }

        let child_types: Vec<&str> = node.content.iter().map(|c| c.type_name.as_str()).collect();
        let expr = self.content_expr(&node.type_name).unwrap_or(&LEAF);
        if !expr.matches(&child_types, &|name, child| self.admits(name, child)) {
            return Err(SchemaError::InvalidContent {
                type_name: node.type_name.clone(),
                detail: format!("[{}] does not match '{expr}'", child_types.join(", ")),
            });
        }

        for child in &node.content {
            if spec.marks == MarkPolicy::None {
                if let Some(mark) = child.marks.first() {
                    return Err(SchemaError::MarkNotAllowed {
                        mark: mark.type_name.clone(),
                        parent: node.type_name.clone(),
                    });
                }
            }
            self.check(child)?;
        }

        Ok(())
    }
}
