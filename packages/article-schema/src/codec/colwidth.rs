//! Table cell column width codec (`data-colwidth="100,120"`).

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COLWIDTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(,\d+)*$").expect("valid regex"));

/// Parse a comma-separated width list.
///
/// Only accepted when every entry is numeric and there is exactly one
/// width per spanned column.
#[must_use]
pub fn parse_colwidth(value: &str, colspan: i64) -> Option<Vec<i64>> {
    if !COLWIDTH_PATTERN.is_match(value) {
        return None;
    }
    let widths = value
        .split(',')
        .map(str::parse::<i64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    (i64::try_from(widths.len()).ok() == Some(colspan)).then_some(widths)
}

#[must_use]
pub fn render_colwidth(widths: &[i64]) -> String {
    widths
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
