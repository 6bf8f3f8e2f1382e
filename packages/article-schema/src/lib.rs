//! Article Schema - the document schema of a rich-text article editor.
//!
//! The schema declares which structural nodes and inline marks an article
//! may contain, how each is decoded from markup and encoded back, and how
//! loosely formatted attribute values are normalized on the way in.
//!
//! # Example
//!
//! ```
//! use article_schema::catalog::default_schema;
//! use article_schema::engine::{decode_document, encode_document};
//!
//! let schema = default_schema();
//! let doc = decode_document(schema, r#"<p style="text-align:CENTER">Hi <b>there</b></p>"#).unwrap();
//! assert_eq!(
//!     encode_document(schema, &doc).unwrap(),
//!     r#"<p style="text-align: center;">Hi <strong>there</strong></p>"#
//! );
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: attribute normalizers (color, alignment, divider style, font size)
//! - [`markup`]: markup tree, XHTML reader and writer
//! - [`content`]: content model expressions
//! - [`registry`]: node and mark specs, `SchemaBuilder` and `Schema`
//! - [`catalog`]: the article's node and mark types, table sub-factory
//! - [`model`]: structured document types
//! - [`engine`]: whole-tree parse and serialize
//! - [`config`]: mark exclusion policy and table options
//! - [`error`]: error types and Result alias
//! - [`cli`]: command-line interface

pub mod catalog;
pub mod cli;
pub mod codec;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod markup;
pub mod model;
pub mod registry;

pub use catalog::{create_article_schema, default_schema};
pub use config::{SchemaConfig, TableOptions};
pub use error::{AttributeDecodeFailure, DecodeMismatch, Result, SchemaError};
pub use model::{AttrValue, Attrs, Mark, Node};
pub use registry::{Schema, SchemaBuilder};
