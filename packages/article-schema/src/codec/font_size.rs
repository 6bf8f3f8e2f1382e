//! Font size level codec.

use crate::error::AttributeDecodeFailure;

/// Canonical font size level; level 3 is the body size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSizeLevel {
    One,
    Two,
    #[default]
    Three,
    Four,
    Five,
}

const LEVELS: [(FontSizeLevel, i64, &str); 5] = [
    (FontSizeLevel::One, 1, "60%"),
    (FontSizeLevel::Two, 2, "80%"),
    (FontSizeLevel::Three, 3, "100%"),
    (FontSizeLevel::Four, 4, "120%"),
    (FontSizeLevel::Five, 5, "140%"),
];

impl FontSizeLevel {
    /// Numeric level as stored in canonical attributes.
    #[must_use]
    pub fn number(self) -> i64 {
        LEVELS
            .iter()
            .find(|(level, _, _)| *level == self)
            .map_or(3, |(_, n, _)| *n)
    }

    #[must_use]
    pub fn to_percent(self) -> &'static str {
        LEVELS
            .iter()
            .find(|(level, _, _)| *level == self)
            .map_or("100%", |(_, _, pct)| *pct)
    }

    /// Any percentage outside the table maps to level 3.
    #[must_use]
    pub fn from_percent(input: &str) -> Self {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        LEVELS
            .iter()
            .find(|(_, _, pct)| *pct == compact)
            .map_or(Self::Three, |(level, _, _)| *level)
    }
}

impl TryFrom<i64> for FontSizeLevel {
    type Error = AttributeDecodeFailure;

    /// Levels come from canonical storage; anything outside 1..=5 is a
    /// caller defect, not user input.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        LEVELS
            .iter()
            .find(|(_, n, _)| *n == value)
            .map(|(level, _, _)| *level)
            .ok_or_else(|| AttributeDecodeFailure::Unrecognized(value.to_string()))
    }
}

/// Render a level as the percentage used in `font-size` styles.
#[must_use]
pub fn map_font_size_level_to_percent(level: FontSizeLevel) -> &'static str {
    level.to_percent()
}

/// Map a `font-size` percentage back to its level (default 3).
#[must_use]
pub fn map_percent_to_font_size_level(percent: &str) -> FontSizeLevel {
    FontSizeLevel::from_percent(percent)
}
