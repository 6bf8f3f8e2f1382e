//! Type registry.
//!
//! Node and mark types are declared as data: a content model, group tags,
//! attribute specs with codec functions, matchers for decoding and a DOM
//! template for encoding. A [`SchemaBuilder`] collects them and produces an
//! immutable [`Schema`].

mod attribute;
mod core;
mod dom;
mod matcher;
mod spec;

pub use attribute::{decode_attrs, encode_attrs, AttributeSpec, DecodeFn, EncodeFn};
pub use core::{Schema, SchemaBuilder};
pub use dom::{DomContent, DomSpec};
pub use matcher::Matcher;
pub use spec::{MarkPolicy, MarkSpec, NodeSpec};
