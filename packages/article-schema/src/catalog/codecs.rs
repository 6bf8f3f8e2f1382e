//! Small helpers shared by the catalog's attribute codecs.

use crate::error::AttributeDecodeFailure;
use crate::markup::{MarkupAttrs, MarkupElement};
use crate::model::AttrValue;

pub(crate) type DecodeResult = Result<AttrValue, AttributeDecodeFailure>;
pub(crate) type EncodeResult = Result<(), AttributeDecodeFailure>;

/// Read a markup attribute verbatim.
pub(crate) fn read_attr(element: &MarkupElement, name: &str) -> DecodeResult {
    element
        .attribute(name)
        .map(AttrValue::from)
        .ok_or(AttributeDecodeFailure::Missing)
}

/// Read a style property verbatim.
pub(crate) fn read_style(element: &MarkupElement, property: &str) -> Result<String, AttributeDecodeFailure> {
    element
        .style_property(property)
        .map(str::to_string)
        .ok_or(AttributeDecodeFailure::Missing)
}

/// Borrow a canonical text value.
pub(crate) fn text_value(value: &AttrValue) -> Result<&str, AttributeDecodeFailure> {
    value
        .as_str()
        .ok_or_else(|| AttributeDecodeFailure::WrongShape(value.to_string()))
}

/// Borrow a canonical integer value.
pub(crate) fn int_value(value: &AttrValue) -> Result<i64, AttributeDecodeFailure> {
    value
        .as_int()
        .ok_or_else(|| AttributeDecodeFailure::WrongShape(value.to_string()))
}

/// Write a text value into a markup attribute verbatim.
pub(crate) fn write_attr(value: &AttrValue, out: &mut MarkupAttrs, name: &str) -> EncodeResult {
    out.set(name, text_value(value)?);
    Ok(())
}
