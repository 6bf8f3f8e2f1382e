//! Table node types.
//!
//! Generated by a factory so the group a table joins, the content a cell
//! admits and any extra per-cell attributes are supplied by the caller.

use super::codecs::{int_value, read_attr, read_style, text_value, DecodeResult, EncodeResult};
use crate::codec::style::declaration;
use crate::codec::{normalize_color, parse_colwidth, render_colwidth};
use crate::config::TableOptions;
use crate::error::AttributeDecodeFailure;
use crate::markup::{MarkupAttrs, MarkupElement};
use crate::model::AttrValue;
use crate::registry::{AttributeSpec, DomSpec, Matcher, NodeSpec};

/// Build `table`, `table_row`, `table_cell` and `table_header`.
///
/// `cell_attributes` are appended to both cell types after the built-in
/// `colspan`, `rowspan` and `colwidth`.
#[must_use]
pub fn table_nodes(options: &TableOptions, cell_attributes: &[AttributeSpec]) -> Vec<NodeSpec> {
    let table = NodeSpec::new("table")
        .with_content("table_row+")
        .with_group(options.table_group.as_str())
        .with_parse(Matcher::tag("table"))
        .with_dom(DomSpec::wrapping("table", DomSpec::with_hole("tbody")));

    let row = NodeSpec::new("table_row")
        .with_content("(table_cell | table_header)*")
        .with_parse(Matcher::tag("tr"))
        .with_dom(DomSpec::with_hole("tr"));

    vec![
        table,
        row,
        cell("table_cell", "td", options, cell_attributes),
        cell("table_header", "th", options, cell_attributes),
    ]
}

fn cell(name: &str, tag: &str, options: &TableOptions, extra: &[AttributeSpec]) -> NodeSpec {
    let spec = NodeSpec::new(name)
        .with_content(options.cell_content.as_str())
        .with_attr(AttributeSpec::new("colspan", 1).with_codec(decode_colspan, encode_colspan))
        .with_attr(AttributeSpec::new("rowspan", 1).with_codec(decode_rowspan, encode_rowspan))
        .with_attr(
            AttributeSpec::new("colwidth", AttrValue::Null).with_codec(decode_colwidth, encode_colwidth),
        )
        .with_parse(Matcher::tag(tag))
        .with_dom(DomSpec::with_hole(tag));

    extra
        .iter()
        .cloned()
        .fold(spec, |spec, attr| spec.with_attr(attr))
}

/// Per-cell background color, decoded through the color codec.
///
/// Encoding appends to the cell's `style` attribute instead of replacing it.
#[must_use]
pub fn background_attribute() -> AttributeSpec {
    AttributeSpec::new("background", AttrValue::Null).with_codec(decode_background, encode_background)
}

fn decode_span(el: &MarkupElement, name: &str) -> DecodeResult {
    let value = read_attr(el, name)?;
    let raw = text_value(&value)?;
    match raw.trim().parse::<i64>() {
        Ok(span) if span >= 1 => Ok(AttrValue::Int(span)),
        _ => Err(AttributeDecodeFailure::Unrecognized(raw.to_string())),
    }
}

fn encode_span(value: &AttrValue, out: &mut MarkupAttrs, name: &str) -> EncodeResult {
    let span = int_value(value)?;
    if span != 1 {
        out.set(name, span.to_string());
    }
    Ok(())
}

fn decode_colspan(el: &MarkupElement) -> DecodeResult {
    decode_span(el, "colspan")
}

fn encode_colspan(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    encode_span(value, out, "colspan")
}

fn decode_rowspan(el: &MarkupElement) -> DecodeResult {
    decode_span(el, "rowspan")
}

fn encode_rowspan(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    encode_span(value, out, "rowspan")
}

fn decode_colwidth(el: &MarkupElement) -> DecodeResult {
    let raw = el
        .attribute("data-colwidth")
        .ok_or(AttributeDecodeFailure::Missing)?;
    let colspan = decode_colspan(el)
        .ok()
        .and_then(|span| span.as_int())
        .unwrap_or(1);
    parse_colwidth(raw, colspan)
        .map(AttrValue::List)
        .ok_or_else(|| AttributeDecodeFailure::Unrecognized(raw.to_string()))
}

fn encode_colwidth(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    match value {
        AttrValue::Null => Ok(()),
        AttrValue::List(widths) => {
            out.set("data-colwidth", render_colwidth(widths));
            Ok(())
        }
        other => Err(AttributeDecodeFailure::WrongShape(other.to_string())),
    }
}

fn decode_background(el: &MarkupElement) -> DecodeResult {
    let value = read_style(el, "background-color")?;
    Ok(AttrValue::Text(normalize_color(&value)?.into_string()))
}

/// Append `background-color: <value>;` to whatever style is already there.
/// Only colors the color codec accepts are written, in canonical form.
fn encode_background(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    if value.is_null() {
        return Ok(());
    }
    let color = normalize_color(text_value(value)?)?;
    out.append_style(&declaration("background-color", color.as_str()));
    Ok(())
}
