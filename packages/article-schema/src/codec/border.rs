//! Divider style codec.

/// Canonical divider style, one of four visual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    One,
    Two,
    Three,
    Four,
}

impl BorderStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
        }
    }
}

/// Restrict a divider style value to `1`..`4`; anything else becomes `1`.
#[must_use]
pub fn normalize_border_style(input: &str) -> BorderStyle {
    match input.trim() {
        "2" => BorderStyle::Two,
        "3" => BorderStyle::Three,
        "4" => BorderStyle::Four,
        _ => BorderStyle::One,
    }
}
