//! Format - Amount Text Formatting and Parsing
//!
//! Normalizes free-form text typed into an amount input. The output is both
//! the display string and the value fed back into a controlled input, so
//! formatting an already formatted string must return it unchanged.

use serde::{Deserialize, Serialize};

use crate::constants::{AMOUNT_MAX_DECIMAL_LENGTH, AMOUNT_MAX_INTEGER_LENGTH, THOUSANDS_GROUP_SIZE};

/// Character separating the integer and fractional parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecimalSeparator {
    /// `1,234.56`
    #[default]
    #[serde(rename = ".")]
    Dot,
    /// `1 234,56`
    #[serde(rename = ",")]
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(self) -> char {
        match self {
            DecimalSeparator::Dot => '.',
            DecimalSeparator::Comma => ',',
        }
    }

    /// Glyph inserted between thousands groups. Never equal to the decimal
    /// separator itself.
    pub fn group_glyph(self) -> char {
        match self {
            DecimalSeparator::Dot => ',',
            DecimalSeparator::Comma => ' ',
        }
    }
}

/// Where the currency text sits relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    Start,
    End,
}

/// A numeric display value already split into its parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedValue {
    /// Digits, optionally with grouping glyphs
    pub integer_part: String,
    /// Fractional digits, `None` when the value has no fractional part
    pub decimal_part: Option<String>,
    pub currency_text: String,
    pub decimal_separator: DecimalSeparator,
    pub currency_position: Option<CurrencyPosition>,
}

/// Constraints applied by [`format_amount`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountFormatOptions {
    /// Keep a decimal separator and fractional digits
    pub allow_decimals: bool,
    /// Group the integer part every three digits
    pub thousands_separator: bool,
    /// Maximum number of significant integer digits
    pub max_integer_length: usize,
    /// Maximum number of fractional digits
    pub max_decimal_length: usize,
    pub decimal_separator: DecimalSeparator,
}

impl Default for AmountFormatOptions {
    fn default() -> Self {
        Self {
            allow_decimals: true,
            thousands_separator: true,
            max_integer_length: AMOUNT_MAX_INTEGER_LENGTH,
            max_decimal_length: AMOUNT_MAX_DECIMAL_LENGTH,
            decimal_separator: DecimalSeparator::Dot,
        }
    }
}

/// Raw digits of an amount, before truncation and grouping
struct AmountDigits {
    integer: String,
    fraction: String,
    has_separator: bool,
}

/// Keep digits and the first decimal separator; everything else is dropped.
fn scan_digits(raw: &str, separator: char) -> AmountDigits {
    let mut digits = AmountDigits {
        integer: String::new(),
        fraction: String::new(),
        has_separator: false,
    };

    for c in raw.chars() {
        if c.is_ascii_digit() {
            if digits.has_separator {
                digits.fraction.push(c);
            } else {
                digits.integer.push(c);
            }
        } else if c == separator {
            // A second separator is ignored; the first one stays in place.
            digits.has_separator = true;
        }
    }

    digits
}

/// Format raw amount text under the given constraints.
///
/// Strips everything except digits and one decimal separator, truncates both
/// parts to their maximum lengths, collapses leading zeros and optionally
/// groups thousands. Never fails: malformed input degrades to the digits it
/// contains, and an empty string means "no value yet".
///
/// # Example
///
/// ```
/// use design_kit_core::utils::{format_amount, AmountFormatOptions};
///
/// let options = AmountFormatOptions::default();
/// assert_eq!(format_amount("$1234567.891", &options), "1,234,567.89");
/// ```
pub fn format_amount(raw: &str, options: &AmountFormatOptions) -> String {
    let separator = options.decimal_separator.as_char();
    let digits = scan_digits(raw, separator);
    let keep_fraction =
        options.allow_decimals && options.max_decimal_length > 0 && digits.has_separator;

    let significant = digits.integer.trim_start_matches('0');
    let mut integer: String = significant.chars().take(options.max_integer_length).collect();

    // "000" and ".5" both need a single zero in front
    let needs_zero = !digits.integer.is_empty() || keep_fraction;
    if integer.is_empty() && needs_zero && options.max_integer_length > 0 {
        integer.push('0');
    }

    let mut result = if options.thousands_separator {
        group_thousands(&integer, options.decimal_separator.group_glyph())
    } else {
        integer
    };

    if keep_fraction {
        result.push(separator);
        result.extend(digits.fraction.chars().take(options.max_decimal_length));
    }

    result
}

/// Insert `glyph` between every group of three digits, counted from the right.
pub fn group_thousands(digits: &str, glyph: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut result = String::with_capacity(len + len / THOUSANDS_GROUP_SIZE);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (len - i) % THOUSANDS_GROUP_SIZE == 0 {
            result.push(glyph);
        }
        result.push(*c);
    }

    result
}

/// Canonical machine form of an amount: digits and at most one `.`.
///
/// Grouping glyphs are removed and the decimal separator is normalized to
/// `.`, so the result can be parsed or stored independently of locale.
pub fn unformat_amount(text: &str, separator: DecimalSeparator) -> String {
    let digits = scan_digits(text, separator.as_char());
    let mut result = digits.integer;
    if digits.has_separator {
        result.push('.');
        result.push_str(&digits.fraction);
    }
    result
}

/// Parse formatted amount text into a number.
///
/// Returns `None` when the text holds no digits.
pub fn parse_amount(text: &str, separator: DecimalSeparator) -> Option<f64> {
    let canonical = unformat_amount(text, separator);
    let trimmed = canonical.trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    if let Some(fraction) = trimmed.strip_prefix('.') {
        return format!("0.{fraction}").parse().ok();
    }
    trimmed.parse().ok()
}

/// Format raw text and split the result into a [`FormattedValue`].
pub fn to_formatted_value(
    raw: &str,
    options: &AmountFormatOptions,
    currency_text: impl Into<String>,
    currency_position: Option<CurrencyPosition>,
) -> FormattedValue {
    let formatted = format_amount(raw, options);
    let separator = options.decimal_separator.as_char();

    let (integer_part, decimal_part) = match formatted.split_once(separator) {
        Some((integer, fraction)) => (integer.to_string(), Some(fraction.to_string())),
        None => (formatted, None),
    };

    FormattedValue {
        integer_part,
        decimal_part,
        currency_text: currency_text.into(),
        decimal_separator: options.decimal_separator,
        currency_position,
    }
}
