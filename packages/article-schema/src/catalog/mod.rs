//! The article catalog: every node and mark type of the article editor.
//!
//! The catalog is rebuilt by a function on every call, so exclusions
//! applied by one schema never leak into another.

mod codecs;
pub mod marks;
pub mod nodes;
pub mod table;

use std::sync::LazyLock;

use crate::config::SchemaConfig;
use crate::error::Result;
use crate::registry::{MarkSpec, NodeSpec, Schema, SchemaBuilder};

pub use table::{background_attribute, table_nodes};

/// Node types in parse priority order.
#[must_use]
pub fn base_nodes(config: &SchemaConfig) -> Vec<NodeSpec> {
    let mut specs = vec![
        nodes::doc(),
        nodes::paragraph(),
        nodes::image(),
        nodes::video(),
        nodes::blockquote(),
        nodes::horizontal_rule(),
        nodes::heading(),
    ];
    specs.extend(table_nodes(&config.table, &[background_attribute()]));
    specs.push(nodes::text());
    specs.push(nodes::hard_break());
    specs
}

/// All seven mark types, before any exclusion.
#[must_use]
pub fn base_marks() -> Vec<MarkSpec> {
    vec![
        marks::strong(),
        marks::em(),
        marks::code(),
        marks::link(),
        marks::underline(),
        marks::font_size(),
        marks::color(),
    ]
}

/// Build the article schema with the configured mark exclusions.
///
/// # Errors
/// Returns an error if the configured cell content model is invalid or
/// references an unknown type.
///
/// # Examples
/// ```
/// use article_schema::catalog::create_article_schema;
/// use article_schema::config::SchemaConfig;
///
/// let schema = create_article_schema(&SchemaConfig::default()).unwrap();
/// assert_eq!(schema.mark_names().collect::<Vec<_>>(), vec!["strong", "underline"]);
/// ```
pub fn create_article_schema(config: &SchemaConfig) -> Result<Schema> {
    let mut builder = SchemaBuilder::new();
    for spec in base_nodes(config) {
        builder.register_node(spec)?;
    }
    for spec in base_marks() {
        builder.register_mark(spec)?;
    }
    builder.exclude_marks(config.excluded_marks.iter().cloned());
    builder.build()
}

/// Schema built from the product defaults.
#[allow(clippy::expect_used)] // The default catalog is covered by tests
pub static DEFAULT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    create_article_schema(&SchemaConfig::default()).expect("default catalog is valid")
});

/// Shared schema built from the product defaults.
#[must_use]
pub fn default_schema() -> &'static Schema {
    &DEFAULT_SCHEMA
}
