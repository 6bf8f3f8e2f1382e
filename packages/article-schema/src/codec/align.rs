//! Text alignment codec.

/// Canonical paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Markup spelling of the alignment.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Restrict a free-text alignment to left/center/right.
///
/// Anything else, including `justify` and the empty string, becomes
/// `Left`. This never fails.
///
/// # Examples
/// ```
/// use article_schema::codec::{normalize_alignment, Alignment};
///
/// assert_eq!(normalize_alignment(" Center "), Alignment::Center);
/// assert_eq!(normalize_alignment("justify"), Alignment::Left);
/// ```
#[must_use]
pub fn normalize_alignment(input: &str) -> Alignment {
    match input.trim().to_ascii_lowercase().as_str() {
        "center" => Alignment::Center,
        "right" => Alignment::Right,
        _ => Alignment::Left,
    }
}
