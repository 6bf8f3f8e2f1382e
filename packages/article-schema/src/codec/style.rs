//! Inline `style` attribute handling.
//!
//! Style strings in pasted markup are loose: missing trailing semicolons,
//! odd casing, stray whitespace, `!important`. Lookups tolerate all of
//! that; writes only ever append.

/// Split a style attribute into `(property, value)` declarations.
///
/// Property names are lowercased and values trimmed. Fragments without a
/// colon or with an empty property are skipped.
///
/// # Examples
/// ```
/// use article_schema::codec::style::parse_style;
///
/// let decls = parse_style("Color: red;; font-size:80% ");
/// assert_eq!(decls, vec![
///     ("color".to_string(), "red".to_string()),
///     ("font-size".to_string(), "80%".to_string()),
/// ]);
/// ```
#[must_use]
pub fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|fragment| {
            let (property, value) = fragment.split_once(':')?;
            let property = property.trim();
            if property.is_empty() {
                return None;
            }
            Some((property.to_ascii_lowercase(), clean_value(value).to_string()))
        })
        .collect()
}

/// Look up a property; the last declaration wins and empty values count
/// as absent.
#[must_use]
pub fn style_property<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(|fragment| fragment.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| clean_value(value))
        .filter(|value| !value.is_empty())
        .last()
}

/// Format one declaration the way encoders write it.
#[must_use]
pub fn declaration(property: &str, value: &str) -> String {
    format!("{property}: {value};")
}

/// Append a fragment to an existing style string, keeping what is there.
///
/// A separator is inserted only when the existing style does not already
/// end with one.
#[must_use]
pub fn append_style(existing: Option<&str>, fragment: &str) -> String {
    match existing.map(str::trim_end) {
        None | Some("") => fragment.to_string(),
        Some(current) if current.ends_with(';') => format!("{current}{fragment}"),
        Some(current) => format!("{current};{fragment}"),
    }
}

fn clean_value(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_suffix("!important")
        .map_or(value, str::trim_end)
}
