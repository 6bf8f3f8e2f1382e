//! CSS color normalization.
//!
//! Any CSS-style color (keyword, hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`)
//! collapses to a lowercase `#rrggbb`. The alpha channel is dropped: the
//! parsed color is packed as an RGBA pixel, rendered as eight hex digits
//! and cut to the first six. Stored documents depend on this canonical form.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AttributeDecodeFailure;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FUNCTIONAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(rgba?|hsla?)\(\s*(.*?)\s*\)$").expect("valid regex"));

/// CSS Color Module Level 4 named colors.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

/// A normalized `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalColor(String);

impl CanonicalColor {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parsed color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgba {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Rgba {
    fn opaque(rgb: u32) -> Self {
        let [_, r, g, b] = rgb.to_be_bytes();
        Self { r, g, b, a: 255 }
    }

    fn pixel(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Normalize a CSS color to `#rrggbb`, dropping alpha.
///
/// Returns `AttributeDecodeFailure::Unrecognized` for input that is not a
/// recognizable color; picking a fallback is the caller's business.
///
/// # Examples
/// ```
/// use article_schema::codec::normalize_color;
///
/// assert_eq!(normalize_color("Red").unwrap().as_str(), "#ff0000");
/// assert_eq!(normalize_color("rgba(0, 128, 255, 0.5)").unwrap().as_str(), "#0080ff");
/// assert!(normalize_color("not-a-color").is_err());
/// ```
pub fn normalize_color(input: &str) -> Result<CanonicalColor, AttributeDecodeFailure> {
    let rgba = parse_color(input)
        .ok_or_else(|| AttributeDecodeFailure::Unrecognized(input.trim().to_string()))?;
    let hex = format!("{:08x}", rgba.pixel());
    Ok(CanonicalColor(format!("#{}", &hex[..6])))
}

fn parse_color(input: &str) -> Option<Rgba> {
    let value = input.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }

    if value == "transparent" {
        return Some(Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        });
    }

    if let Some((_, rgb)) = NAMED_COLORS.iter().find(|(name, _)| *name == value) {
        return Some(Rgba::opaque(*rgb));
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(caps) = FUNCTIONAL_PATTERN.captures(&value) {
        return parse_functional(&caps[1], &caps[2]);
    }

    // Bare hex digits are accepted too ("ff0000")
    parse_hex(&value)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let digits: Vec<u8> = hex
        .chars()
        .filter_map(|c| c.to_digit(16))
        .filter_map(|d| u8::try_from(d).ok())
        .collect();

    let channels: Vec<u8> = match digits.len() {
        3 | 4 => digits.iter().map(|d| d * 17).collect(),
        6 | 8 => digits.chunks(2).map(|pair| pair[0] * 16 + pair[1]).collect(),
        _ => return None,
    };

    Some(Rgba {
        r: channels[0],
        g: channels[1],
        b: channels[2],
        a: channels.get(3).copied().unwrap_or(255),
    })
}

fn parse_functional(function: &str, args: &str) -> Option<Rgba> {
    let (main, slash_alpha) = match args.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (args, None),
    };

    let parts: Vec<&str> = main
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    let (channels, alpha) = match (parts.as_slice(), slash_alpha) {
        ([a, b, c], alpha) => ([*a, *b, *c], alpha),
        ([a, b, c, alpha], None) => ([*a, *b, *c], Some(*alpha)),
        _ => return None,
    };

    let a = match alpha {
        Some(alpha) => parse_alpha(alpha)?,
        None => 255,
    };

    if function.starts_with("rgb") {
        Some(Rgba {
            r: parse_rgb_channel(channels[0])?,
            g: parse_rgb_channel(channels[1])?,
            b: parse_rgb_channel(channels[2])?,
            a,
        })
    } else {
        let hue = parse_number(channels[0].trim_end_matches("deg"))?;
        let saturation = parse_percentage_or_number(channels[1])? / 100.0;
        let lightness = parse_percentage_or_number(channels[2])? / 100.0;
        let (r, g, b) = hsl_to_rgb(hue, saturation.clamp(0.0, 1.0), lightness.clamp(0.0, 1.0));
        Some(Rgba { r, g, b, a })
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_percentage_or_number(value: &str) -> Option<f64> {
    parse_number(value.strip_suffix('%').unwrap_or(value))
}

fn parse_rgb_channel(value: &str) -> Option<u8> {
    let scaled = match value.strip_suffix('%') {
        Some(pct) => parse_number(pct)?.clamp(0.0, 100.0) * 2.55,
        None => parse_number(value)?,
    };
    Some(to_channel(scaled))
}

fn parse_alpha(value: &str) -> Option<u8> {
    let unit = match value.strip_suffix('%') {
        Some(pct) => parse_number(pct)? / 100.0,
        None => parse_number(value)?,
    };
    Some(to_channel(unit.clamp(0.0, 1.0) * 255.0))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255 first
fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 360.0;
    if saturation == 0.0 {
        let v = to_channel(lightness * 255.0);
        return (v, v, v);
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        to_channel(v * 255.0)
    };

    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        normalize_color(input).unwrap().into_string()
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(norm("red"), "#ff0000");
        assert_eq!(norm("RebeccaPurple"), "#663399");
        assert_eq!(norm("  navy "), "#000080");
        assert_eq!(norm("transparent"), "#000000");
    }

    #[test]
    fn test_hex_lengths() {
        assert_eq!(norm("#f00"), "#ff0000");
        assert_eq!(norm("#f008"), "#ff0000");
        assert_eq!(norm("#FF8800"), "#ff8800");
        assert_eq!(norm("#12345678"), "#123456");
        assert_eq!(norm("abcdef"), "#abcdef");
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(norm("rgb(255, 0, 0)"), "#ff0000");
        assert_eq!(norm("rgb(0 128 255)"), "#0080ff");
        assert_eq!(norm("rgba(1, 2, 3, 0.1)"), "#010203");
        assert_eq!(norm("rgb(0 0 0 / 50%)"), "#000000");
        assert_eq!(norm("rgb(100%, 50%, 0%)"), "#ff8000");
        assert_eq!(norm("rgb(300, -5, 12.4)"), "#ff000c");
    }

    #[test]
    fn test_hsl_functions() {
        assert_eq!(norm("hsl(0, 100%, 50%)"), "#ff0000");
        assert_eq!(norm("hsl(120deg 100% 25%)"), "#008000");
        assert_eq!(norm("hsla(240, 100%, 50%, 0.3)"), "#0000ff");
        assert_eq!(norm("hsl(0, 0%, 100%)"), "#ffffff");
    }

    #[test]
    fn test_alpha_is_dropped() {
        assert_eq!(norm("rgba(255, 255, 255, 0)"), "#ffffff");
        assert_eq!(norm("#ffffff00"), "#ffffff");
    }

    #[test]
    fn test_unrecognized_input_fails() {
        for input in ["", "not-a-color", "#12", "#ggg", "rgb(1, 2)", "rgb(a, b, c)", "url(x)"] {
            assert!(normalize_color(input).is_err(), "input {input:?}");
        }
    }

    #[test]
    fn test_canonical_value_is_fixed_point() {
        for input in [
            "red",
            "#abc",
            "#AABBCCDD",
            "rgb(10, 20, 30)",
            "rgba(10%, 20%, 30%, .5)",
            "hsl(200, 50%, 40%)",
            "transparent",
        ] {
            let once = norm(input);
            assert_eq!(norm(&once), once, "input {input:?}");
            assert_eq!(once.len(), 7);
        }
    }
}
