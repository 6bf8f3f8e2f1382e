//! Document to markup.

use crate::error::Result;
use crate::markup::Markup;
use crate::model::Node;
use crate::registry::Schema;

/// Renders a document as markup using the schema's encoders.
///
/// Adjacent inline nodes that share a mark share its wrapper element,
/// with the mark that ranks first in the catalog outermost.
pub struct SerializeEngine<'s> {
    schema: &'s Schema,
}

impl<'s> SerializeEngine<'s> {
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Render the content of a `doc` node.
    ///
    /// # Errors
    /// Returns the first encode error found in the tree.
    pub fn serialize_document(&self, doc: &Node) -> Result<Vec<Markup>> {
        self.serialize_content(&doc.content)
    }

    /// Render one node and its subtree, marks included.
    ///
    /// # Errors
    /// `UnknownType`, `NoMarkupForm` or `InvalidAttribute` from the schema.
    pub fn serialize_node(&self, node: &Node) -> Result<Vec<Markup>> {
        self.serialize_inline(&[node], 0)
    }

    fn serialize_content(&self, content: &[Node]) -> Result<Vec<Markup>> {
        let nodes: Vec<&Node> = content.iter().collect();
        self.serialize_inline(&nodes, 0)
    }

    /// Group runs of nodes sharing the mark at `depth` under one wrapper.
    fn serialize_inline(&self, nodes: &[&Node], depth: usize) -> Result<Vec<Markup>> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < nodes.len() {
            let Some(mark) = nodes[i].marks.get(depth) else {
                out.push(self.serialize_bare(nodes[i])?);
                i += 1;
                continue;
            };

            let run = nodes[i..]
                .iter()
                .take_while(|node| node.marks.get(depth) == Some(mark))
                .count();
            let children = self.serialize_inline(&nodes[i..i + run], depth + 1)?;
            let wrapper = self.schema.encode_mark(mark)?;
            out.push(wrapper.render(children).into());
            i += run;
        }
        Ok(out)
    }

    fn serialize_bare(&self, node: &Node) -> Result<Markup> {
        if let Some(text) = &node.text {
            return Ok(Markup::text(text.as_str()));
        }
        let dom = self.schema.encode(node)?;
        let children = self.serialize_content(&node.content)?;
        Ok(dom.render(children).into())
    }
}
