//! Block and inline node types of the article catalog.
//!
//! Table types live in [`super::table`].

use super::codecs::{read_attr, read_style, text_value, write_attr, DecodeResult, EncodeResult};
use crate::codec::style::declaration;
use crate::codec::{normalize_alignment, normalize_border_style, Alignment, BorderStyle};
use crate::markup::{MarkupAttrs, MarkupElement};
use crate::model::AttrValue;
use crate::registry::{AttributeSpec, DomSpec, MarkPolicy, Matcher, NodeSpec};

/// Content model shared by quotes and headings.
const PLAIN_INLINE: &str = "(text | hard_break)*";

pub fn doc() -> NodeSpec {
    NodeSpec::new("doc").with_content("block+")
}

pub fn paragraph() -> NodeSpec {
    NodeSpec::new("paragraph")
        .with_content("inline*")
        .with_group("block")
        .with_attr(
            AttributeSpec::new("align", Alignment::default().as_str())
                .with_codec(decode_align, encode_align),
        )
        .with_parse(Matcher::tag("p"))
        .with_dom(DomSpec::with_hole("p"))
}

pub fn image() -> NodeSpec {
    NodeSpec::new("image")
        .with_group("block")
        .atom()
        .with_attr(AttributeSpec::new("src", "").with_codec(decode_src, encode_src))
        .with_attr(AttributeSpec::new("alt", "").with_codec(decode_alt, encode_alt))
        .with_parse(Matcher::tag("img"))
        .with_dom(DomSpec::leaf("img"))
}

/// Embedded video, carried verbatim in `data-*` attributes.
pub fn video() -> NodeSpec {
    NodeSpec::new("video")
        .with_group("block")
        .atom()
        .with_attr(AttributeSpec::new("source", "").with_codec(decode_source, encode_source))
        .with_attr(
            AttributeSpec::new("source_id", "").with_codec(decode_source_id, encode_source_id),
        )
        .with_attr(AttributeSpec::new("url", "").with_codec(decode_url, encode_url))
        .with_attr(AttributeSpec::new("title", "").with_codec(decode_title, encode_title))
        .with_attr(
            AttributeSpec::new("thumbnail", "").with_codec(decode_thumbnail, encode_thumbnail),
        )
        .with_parse(Matcher::tag("div").with_attr_value("data-node", "video"))
        .with_dom(DomSpec::leaf("div").with_attr("data-node", "video"))
}

pub fn blockquote() -> NodeSpec {
    NodeSpec::new("blockquote")
        .with_content(PLAIN_INLINE)
        .with_group("block")
        .with_marks(MarkPolicy::None)
        .with_parse(Matcher::tag("blockquote"))
        .with_dom(DomSpec::with_hole("blockquote"))
}

pub fn horizontal_rule() -> NodeSpec {
    NodeSpec::new("horizontal_rule")
        .with_group("block")
        .with_attr(
            AttributeSpec::new("style", BorderStyle::default().as_str())
                .with_codec(decode_divider_style, encode_divider_style),
        )
        .with_parse(Matcher::tag("hr"))
        .with_dom(DomSpec::leaf("hr"))
}

pub fn heading() -> NodeSpec {
    NodeSpec::new("heading")
        .with_content(PLAIN_INLINE)
        .with_group("block")
        .with_marks(MarkPolicy::None)
        .with_parse(Matcher::tag("h2"))
        .with_dom(DomSpec::with_hole("h2"))
}

pub fn text() -> NodeSpec {
    NodeSpec::new("text").with_group("inline").inline()
}

pub fn hard_break() -> NodeSpec {
    NodeSpec::new("hard_break")
        .with_group("inline")
        .inline()
        .atom()
        .with_parse(Matcher::tag("br"))
        .with_dom(DomSpec::leaf("br"))
}

fn decode_align(el: &MarkupElement) -> DecodeResult {
    let value = read_style(el, "text-align")?;
    Ok(AttrValue::text(normalize_alignment(&value).as_str()))
}

fn encode_align(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    let align = normalize_alignment(text_value(value)?);
    out.append_style(&declaration("text-align", align.as_str()));
    Ok(())
}

fn decode_divider_style(el: &MarkupElement) -> DecodeResult {
    let value = read_attr(el, "data-style")?;
    let style = normalize_border_style(text_value(&value)?);
    Ok(AttrValue::text(style.as_str()))
}

fn encode_divider_style(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    let style = normalize_border_style(text_value(value)?);
    out.set("data-style", style.as_str());
    Ok(())
}

fn decode_src(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "src")
}

fn encode_src(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    write_attr(value, out, "src")
}

fn decode_alt(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "alt")
}

fn encode_alt(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    write_attr(value, out, "alt")
}

fn decode_source(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "data-source")
}

fn encode_source(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    write_attr(value, out, "data-source")
}

fn decode_source_id(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "data-source-id")
}

fn encode_source_id(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    write_attr(value, out, "data-source-id")
}

fn decode_url(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "data-url")
}

fn encode_url(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    write_attr(value, out, "data-url")
}

fn decode_title(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "data-title")
}

fn encode_title(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    write_attr(value, out, "data-title")
}

fn decode_thumbnail(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "data-thumbnail")
}

fn encode_thumbnail(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    write_attr(value, out, "data-thumbnail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_xhtml;
    use crate::model::Node;

    #[test]
    fn test_paragraph_alignment_decode() {
        let spec = paragraph();
        let el = parse_xhtml(r#"<p style="color: red; text-align: RIGHT">x</p>"#).unwrap();
        let attrs = spec.from_markup(&el).unwrap();
        assert_eq!(attrs["align"], AttrValue::text("right"));

        let el = parse_xhtml(r#"<p style="text-align: justify">x</p>"#).unwrap();
        assert_eq!(spec.from_markup(&el).unwrap()["align"], AttrValue::text("left"));

        let el = parse_xhtml("<p>x</p>").unwrap();
        assert_eq!(spec.from_markup(&el).unwrap()["align"], AttrValue::text("left"));
    }

    #[test]
    fn test_paragraph_encode_style() {
        let node = Node::new("paragraph").with_attr("align", "center");
        let dom = paragraph().to_markup(&node).unwrap();
        assert_eq!(dom.tag, "p");
        assert_eq!(dom.attrs.get("style"), Some("text-align: center;"));
        assert!(dom.has_hole());
    }

    #[test]
    fn test_divider_out_of_range_defaults() {
        let el = parse_xhtml(r#"<hr data-style="9"/>"#).unwrap();
        let attrs = horizontal_rule().from_markup(&el).unwrap();
        assert_eq!(attrs["style"], AttrValue::text("1"));

        let el = parse_xhtml("<hr/>").unwrap();
        let attrs = horizontal_rule().from_markup(&el).unwrap();
        assert_eq!(attrs["style"], AttrValue::text("1"));
    }

    #[test]
    fn test_divider_encode() {
        let node = Node::new("horizontal_rule").with_attr("style", "3");
        let dom = horizontal_rule().to_markup(&node).unwrap();
        assert_eq!(dom.attrs.get("data-style"), Some("3"));
        assert!(!dom.has_hole());
    }

    #[test]
    fn test_video_requires_role_marker() {
        let spec = video();
        assert!(spec.from_markup(&parse_xhtml("<div/>").unwrap()).is_none());
    }

    #[test]
    fn test_video_encode_attribute_order() {
        let node = Node::new("video")
            .with_attr("source", "yt")
            .with_attr("source_id", "abc")
            .with_attr("url", "http://x")
            .with_attr("title", "T")
            .with_attr("thumbnail", "http://y/thumb.png");
        let dom = video().to_markup(&node).unwrap();
        let names: Vec<_> = dom.attrs.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "data-node",
                "data-source",
                "data-source-id",
                "data-url",
                "data-title",
                "data-thumbnail"
            ]
        );
        assert_eq!(dom.attrs.get("data-node"), Some("video"));
    }

    #[test]
    fn test_image_missing_alt_defaults_empty() {
        let el = parse_xhtml(r#"<img src="/a.png"/>"#).unwrap();
        let attrs = image().from_markup(&el).unwrap();
        assert_eq!(attrs["src"], AttrValue::text("/a.png"));
        assert_eq!(attrs["alt"], AttrValue::text(""));
    }

    #[test]
    fn test_heading_admits_no_marks() {
        assert_eq!(heading().marks, MarkPolicy::None);
        assert_eq!(blockquote().marks, MarkPolicy::None);
        assert_eq!(paragraph().marks, MarkPolicy::All);
    }
}
