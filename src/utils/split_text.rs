//! Split Text - Per-Character Classification
//!
//! Breaks a formatted number into characters tagged as digits or separators,
//! so digits can be animated independently of grouping glyphs.

use serde::{Deserialize, Serialize};

use super::format::FormattedValue;

/// Kind of a split character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharKind {
    Digit,
    Separator,
}

/// A single renderable character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitChar {
    pub value: char,
    pub kind: CharKind,
}

impl SplitChar {
    pub fn is_digit(&self) -> bool {
        self.kind == CharKind::Digit
    }
}

/// Split parts of a [`FormattedValue`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitText {
    pub integer_part: Vec<SplitChar>,
    pub decimal_part: Vec<SplitChar>,
}

/// Classify each character of `text`, left to right.
pub fn split_chars(text: &str) -> Vec<SplitChar> {
    text.chars()
        .map(|value| SplitChar {
            value,
            kind: if value.is_ascii_digit() {
                CharKind::Digit
            } else {
                CharKind::Separator
            },
        })
        .collect()
}

/// Split both parts of a formatted value. A missing decimal part yields an
/// empty sequence.
pub fn split_formatted(value: &FormattedValue) -> SplitText {
    SplitText {
        integer_part: split_chars(&value.integer_part),
        decimal_part: value.decimal_part.as_deref().map(split_chars).unwrap_or_default(),
    }
}
