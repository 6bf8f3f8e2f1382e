//! Attribute schemas and their codec hooks.

use tracing::trace;

use crate::error::{AttributeDecodeFailure, Result, SchemaError};
use crate::markup::{MarkupAttrs, MarkupElement};
use crate::model::{AttrValue, Attrs};

/// Read an attribute's canonical value out of a markup element.
pub type DecodeFn = fn(&MarkupElement) -> std::result::Result<AttrValue, AttributeDecodeFailure>;

/// Write a canonical value into the attributes of an encoded element.
pub type EncodeFn = fn(&AttrValue, &mut MarkupAttrs) -> std::result::Result<(), AttributeDecodeFailure>;

/// Declarative specification of one attribute of a node or mark type.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub name: String,

    /// Value used when the attribute is absent or fails to decode.
    pub default: AttrValue,

    pub decode: Option<DecodeFn>,

    pub encode: Option<EncodeFn>,
}

impl AttributeSpec {
    /// Create an attribute with a default and no markup representation.
    #[must_use]
    pub fn new(name: impl Into<String>, default: impl Into<AttrValue>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
            decode: None,
            encode: None,
        }
    }

    /// Attach the markup codec pair.
    #[must_use]
    pub fn with_codec(mut self, decode: DecodeFn, encode: EncodeFn) -> Self {
        self.decode = Some(decode);
        self.encode = Some(encode);
        self
    }

    /// Decode from markup, falling back to the default. Never fails.
    #[must_use]
    pub fn decode_from(&self, element: &MarkupElement) -> AttrValue {
        let Some(decode) = self.decode else {
            return self.default.clone();
        };
        decode(element).unwrap_or_else(|failure| {
            trace!(
                attribute = %self.name,
                tag = %element.tag,
                %failure,
                "Attribute decode failed, using default"
            );
            self.default.clone()
        })
    }
}

/// Decode every attribute of a type from a matched element.
#[must_use]
pub fn decode_attrs(specs: &[AttributeSpec], element: &MarkupElement) -> Attrs {
    specs
        .iter()
        .map(|spec| (spec.name.clone(), spec.decode_from(element)))
        .collect()
}

/// Encode every attribute of a type into `out`.
///
/// Missing values are encoded as their defaults. A value that cannot be
/// encoded is an integrity error of the stored document.
pub fn encode_attrs(
    type_name: &str,
    specs: &[AttributeSpec],
    values: &Attrs,
    out: &mut MarkupAttrs,
) -> Result<()> {
    for spec in specs {
        let Some(encode) = spec.encode else {
            continue;
        };
        let value = values.get(&spec.name).unwrap_or(&spec.default);
        encode(value, out).map_err(|source| SchemaError::InvalidAttribute {
            type_name: type_name.to_string(),
            attribute: spec.name.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Default values of every attribute.
#[must_use]
pub(crate) fn default_attrs(specs: &[AttributeSpec]) -> Attrs {
    specs
        .iter()
        .map(|spec| (spec.name.clone(), spec.default.clone()))
        .collect()
}
