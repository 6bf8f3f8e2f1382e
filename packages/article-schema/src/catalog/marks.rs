//! Inline mark types of the article catalog.
//!
//! All seven are defined here. Which ones are active is decided by
//! configuration when the schema is built.

use super::codecs::{int_value, read_attr, read_style, text_value, DecodeResult, EncodeResult};
use crate::codec::style::declaration;
use crate::codec::{map_font_size_level_to_percent, map_percent_to_font_size_level, normalize_color, FontSizeLevel};
use crate::config::DEFAULT_TEXT_COLOR;
use crate::markup::{MarkupAttrs, MarkupElement};
use crate::model::AttrValue;
use crate::registry::{AttributeSpec, DomSpec, MarkSpec, Matcher};

pub fn strong() -> MarkSpec {
    MarkSpec::new("strong", DomSpec::with_hole("strong"))
        .with_parse(Matcher::tag("strong"))
        .with_parse(Matcher::tag("b").with_guard(not_normal_weight))
        .with_parse(Matcher::style("font-weight").with_guard(bold_weight))
}

pub fn em() -> MarkSpec {
    MarkSpec::new("em", DomSpec::with_hole("em"))
        .with_parse(Matcher::tag("em"))
        .with_parse(Matcher::tag("i"))
        .with_parse(Matcher::style("font-style").with_guard(italic_style))
}

pub fn code() -> MarkSpec {
    MarkSpec::new("code", DomSpec::with_hole("code")).with_parse(Matcher::tag("code"))
}

pub fn link() -> MarkSpec {
    MarkSpec::new("link", DomSpec::with_hole("a"))
        .with_attr(AttributeSpec::new("href", "").with_codec(decode_href, encode_href))
        .with_attr(AttributeSpec::new("title", AttrValue::Null).with_codec(decode_link_title, encode_link_title))
        .with_parse(Matcher::tag("a").with_attr("href"))
}

pub fn underline() -> MarkSpec {
    MarkSpec::new(
        "underline",
        DomSpec::with_hole("span").with_attr("style", "text-decoration: underline"),
    )
    .with_parse(Matcher::tag("u"))
    .with_parse(Matcher::default().with_guard(has_underline))
}

pub fn font_size() -> MarkSpec {
    MarkSpec::new("font_size", DomSpec::with_hole("span"))
        .with_attr(
            AttributeSpec::new("level", FontSizeLevel::default().number())
                .with_codec(decode_font_size, encode_font_size),
        )
        .with_parse(Matcher::style("font-size"))
}

pub fn color() -> MarkSpec {
    MarkSpec::new("color", DomSpec::with_hole("span"))
        .with_attr(AttributeSpec::new("color", DEFAULT_TEXT_COLOR).with_codec(decode_color, encode_color))
        .with_parse(Matcher::style("color"))
}

fn not_normal_weight(el: &MarkupElement) -> bool {
    !el.style_property("font-weight")
        .is_some_and(|weight| weight.eq_ignore_ascii_case("normal"))
}

fn bold_weight(el: &MarkupElement) -> bool {
    el.style_property("font-weight").is_some_and(|weight| {
        let weight = weight.to_ascii_lowercase();
        weight == "bold" || weight == "bolder" || weight.parse::<u16>().is_ok_and(|w| w >= 500)
    })
}

fn italic_style(el: &MarkupElement) -> bool {
    el.style_property("font-style")
        .is_some_and(|style| style.eq_ignore_ascii_case("italic"))
}

fn has_underline(el: &MarkupElement) -> bool {
    ["text-decoration", "text-decoration-line"].iter().any(|property| {
        el.style_property(property)
            .is_some_and(|value| value.to_ascii_lowercase().contains("underline"))
    })
}

fn decode_href(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "href")
}

fn encode_href(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    out.set("href", text_value(value)?);
    Ok(())
}

fn decode_link_title(el: &MarkupElement) -> DecodeResult {
    read_attr(el, "title")
}

fn encode_link_title(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    if !value.is_null() {
        out.set("title", text_value(value)?);
    }
    Ok(())
}

fn decode_font_size(el: &MarkupElement) -> DecodeResult {
    let percent = read_style(el, "font-size")?;
    Ok(AttrValue::Int(map_percent_to_font_size_level(&percent).number()))
}

fn encode_font_size(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    let level = FontSizeLevel::try_from(int_value(value)?)?;
    out.append_style(&declaration("font-size", map_font_size_level_to_percent(level)));
    Ok(())
}

fn decode_color(el: &MarkupElement) -> DecodeResult {
    let value = read_style(el, "color")?;
    Ok(AttrValue::Text(normalize_color(&value)?.into_string()))
}

fn encode_color(value: &AttrValue, out: &mut MarkupAttrs) -> EncodeResult {
    let color = normalize_color(text_value(value)?)?;
    out.append_style(&declaration("color", color.as_str()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_xhtml;
    use crate::model::Mark;

    fn el(xhtml: &str) -> MarkupElement {
        parse_xhtml(xhtml).unwrap()
    }

    #[test]
    fn test_strong_variants() {
        let spec = strong();
        assert!(spec.from_markup(&el("<strong>x</strong>")).is_some());
        assert!(spec.from_markup(&el("<b>x</b>")).is_some());
        assert!(spec.from_markup(&el(r#"<b style="font-weight: normal">x</b>"#)).is_none());
        assert!(spec.from_markup(&el(r#"<span style="font-weight: 700">x</span>"#)).is_some());
        assert!(spec.from_markup(&el(r#"<span style="font-weight: 400">x</span>"#)).is_none());
    }

    #[test]
    fn test_underline_parse_and_encode() {
        let spec = underline();
        assert!(spec.from_markup(&el("<u>x</u>")).is_some());
        assert!(spec
            .from_markup(&el(r#"<span style="text-decoration: underline wavy">x</span>"#))
            .is_some());
        assert!(spec
            .from_markup(&el(r#"<span style="text-decoration: line-through">x</span>"#))
            .is_none());

        let dom = spec.to_markup(&Mark::new("underline")).unwrap();
        assert_eq!(dom.tag, "span");
        assert_eq!(dom.attrs.get("style"), Some("text-decoration: underline"));
    }

    #[test]
    fn test_font_size_level() {
        let spec = font_size();
        let attrs = spec.from_markup(&el(r#"<span style="font-size: 120%">x</span>"#)).unwrap();
        assert_eq!(attrs["level"], AttrValue::Int(4));

        let attrs = spec.from_markup(&el(r#"<span style="font-size: 13px">x</span>"#)).unwrap();
        assert_eq!(attrs["level"], AttrValue::Int(3));

        let dom = spec.to_markup(&Mark::new("font_size").with_attr("level", 1)).unwrap();
        assert_eq!(dom.attrs.get("style"), Some("font-size: 60%;"));
    }

    #[test]
    fn test_font_size_out_of_range_level_fails_encode() {
        let err = font_size()
            .to_markup(&Mark::new("font_size").with_attr("level", 7))
            .unwrap_err();
        assert!(err.to_string().contains("level"));
    }

    #[test]
    fn test_color_normalized_or_default() {
        let spec = color();
        let attrs = spec.from_markup(&el(r#"<span style="color: rgb(255, 0, 0)">x</span>"#)).unwrap();
        assert_eq!(attrs["color"], AttrValue::text("#ff0000"));

        let attrs = spec.from_markup(&el(r#"<span style="color: wobbly">x</span>"#)).unwrap();
        assert_eq!(attrs["color"], AttrValue::text(DEFAULT_TEXT_COLOR));

        let dom = spec.to_markup(&Mark::new("color").with_attr("color", "#00ff00")).unwrap();
        assert_eq!(dom.attrs.get("style"), Some("color: #00ff00;"));
    }

    #[test]
    fn test_link_title_optional() {
        let spec = link();
        let attrs = spec.from_markup(&el(r#"<a href="/x">x</a>"#)).unwrap();
        assert!(attrs["title"].is_null());
        assert!(spec.from_markup(&el(r#"<a name="top">x</a>"#)).is_none());

        let dom = spec.to_markup(&Mark::new("link").with_attr("href", "/x")).unwrap();
        assert_eq!(dom.attrs.get("href"), Some("/x"));
        assert_eq!(dom.attrs.get("title"), None);
    }
}
