//! AmountInput Component - Headless Model
//!
//! The state behind the amount input: every edit is reformatted through
//! [`format_amount`] before it reaches the value holder, so the display text
//! and the controlled value are always the same normalized string.

use crate::i18n::{Locale, t};
use crate::state::ControlledValue;
use crate::utils::{
    AmountFormatOptions, CurrencyPosition, FormattedValue, SplitText, format_amount, parse_amount,
    split_formatted, to_formatted_value,
};

/// Headless amount input
#[derive(Debug)]
pub struct AmountInput {
    value: ControlledValue<String>,
    options: AmountFormatOptions,
    disabled: bool,
}

impl AmountInput {
    /// Create an uncontrolled amount input
    pub fn new(options: AmountFormatOptions) -> Self {
        Self {
            value: ControlledValue::uncontrolled(String::new()),
            options,
            disabled: false,
        }
    }

    /// Create an input whose value is owned by the caller
    pub fn controlled(value: &str, options: AmountFormatOptions) -> Self {
        let formatted = format_amount(value, &options);
        Self {
            value: ControlledValue::controlled(formatted, String::new()),
            options,
            disabled: false,
        }
    }

    /// Get the formatted value
    pub fn value(&self) -> &str {
        self.value.value()
    }

    /// Get the formatting options
    pub fn options(&self) -> &AmountFormatOptions {
        &self.options
    }

    /// Whether the caller owns the value
    pub fn is_controlled(&self) -> bool {
        self.value.is_externally_controlled()
    }

    /// Set disabled state
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Set the change handler. Receives the formatted text.
    pub fn on_change(&mut self, handler: impl Fn(&String) + Send + Sync + 'static) {
        self.value.on_change(handler);
    }

    /// Replace the value with raw text (paste, programmatic update)
    pub fn set_value(&mut self, raw: &str) {
        if self.disabled {
            return;
        }
        let formatted = format_amount(raw, &self.options);
        if formatted != self.value() {
            self.value.set(formatted);
        }
    }

    /// Pass a new owner value to a controlled input
    pub fn set_external(&mut self, raw: Option<&str>) {
        let formatted = raw.map(|raw| format_amount(raw, &self.options));
        self.value.set_external(formatted);
    }

    /// Handle typed text appended at the end
    pub fn handle_input(&mut self, text: &str) {
        let next = format!("{}{}", self.value(), text);
        self.set_value(&next);
    }

    /// Handle backspace
    pub fn handle_backspace(&mut self) {
        let mut next = self.value().to_string();
        next.pop();
        // Deleting a grouping glyph deletes the digit in front of it
        if next.ends_with(self.options.decimal_separator.group_glyph()) {
            next.pop();
        }
        self.set_value(&next);
    }

    /// Parse the current value
    pub fn parsed(&self) -> Option<f64> {
        parse_amount(self.value(), self.options.decimal_separator)
    }

    /// Split the current value for display with a currency
    pub fn formatted_value(
        &self,
        currency_text: impl Into<String>,
        currency_position: Option<CurrencyPosition>,
    ) -> FormattedValue {
        to_formatted_value(self.value(), &self.options, currency_text, currency_position)
    }

    /// Text announced by screen readers
    pub fn accessibility_value(&self, locale: Locale) -> String {
        if self.value().is_empty() {
            t(locale, "amount-empty")
        } else {
            self.value().to_string()
        }
    }

    /// Split the current value into per-character units
    pub fn split(&self) -> SplitText {
        split_formatted(&self.formatted_value("", None))
    }
}

impl Default for AmountInput {
    fn default() -> Self {
        Self::new(AmountFormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_typing_reformats() {
        let mut input = AmountInput::default();
        for key in ["1", "2", "3", "4", ".", "5", "6", "7"] {
            input.handle_input(key);
        }
        assert_eq!(input.value(), "1,234.56");
        assert_eq!(input.parsed(), Some(1234.56));
    }

    #[test]
    fn test_backspace_over_group_glyph() {
        let mut input = AmountInput::default();
        input.set_value("1234");
        input.handle_backspace();
        assert_eq!(input.value(), "123");

        input.set_value("1234567");
        input.handle_backspace();
        assert_eq!(input.value(), "123,456");
    }

    #[test]
    fn test_on_change_only_fires_on_change() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let mut input = AmountInput::default();
        input.on_change(move |value| sink.lock().expect("lock").push(value.clone()));

        input.set_value("12");
        input.handle_input("x");

        assert_eq!(*calls.lock().expect("lock"), vec!["12".to_string()]);
    }

    #[test]
    fn test_controlled_input_keeps_owner_value() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let mut input = AmountInput::controlled("1000", AmountFormatOptions::default());
        input.on_change(move |value| sink.lock().expect("lock").push(value.clone()));

        input.handle_input("5");

        assert!(input.is_controlled());
        assert_eq!(input.value(), "1,000");
        assert_eq!(*calls.lock().expect("lock"), vec!["10,005".to_string()]);

        input.set_external(Some("10005"));
        assert_eq!(input.value(), "10,005");
    }

    #[test]
    fn test_disabled_ignores_edits() {
        let mut input = AmountInput::default();
        input.set_disabled(true);
        input.handle_input("9");
        assert_eq!(input.value(), "");
        assert_eq!(input.parsed(), None);
        assert_eq!(input.accessibility_value(Locale::EnUS), "No amount entered");
    }

    #[test]
    fn test_split_current_value() {
        let mut input = AmountInput::default();
        input.set_value("1234.5");
        let split = input.split();
        assert_eq!(split.integer_part.len(), 5);
        assert_eq!(split.decimal_part.len(), 1);
    }
}
