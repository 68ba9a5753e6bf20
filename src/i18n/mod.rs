//! i18n - Internationalization Module
//!
//! Simple HashMap-based translations for the few strings the utilities
//! produce themselves (stepper accessibility labels).

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English (US)
    #[default]
    #[serde(rename = "en-US")]
    EnUS,
    /// Chinese (Simplified)
    #[serde(rename = "zh-CN")]
    ZhCN,
}

impl Locale {
    /// Resolve a BCP 47 tag such as `zh-Hans-CN` or `en_GB`
    pub fn from_tag(tag: &str) -> Self {
        if tag.to_ascii_lowercase().starts_with("zh") {
            Locale::ZhCN
        } else {
            Locale::EnUS
        }
    }

    /// Detect the user's locale from the operating system
    pub fn from_system() -> Self {
        let current = locale_config::Locale::user_default();
        current
            .tags()
            .next()
            .map(|(_, tag)| Self::from_tag(&tag.to_string()))
            .unwrap_or_default()
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> = OnceLock::new();

/// Initialize translations (key -> (en, zh))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // Stepper
    map.insert("stepper-progress", ("Step {current} of {total}", "第 {current} 步，共 {total} 步"));
    map.insert("stepper-not-started", ("Not started, {total} steps", "未开始，共 {total} 步"));
    map.insert("stepper-complete", ("All {total} steps complete", "已完成全部 {total} 步"));

    // Amount input
    map.insert("amount-empty", ("No amount entered", "未输入金额"));

    map
}

/// Get translations
fn translations() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

/// Translate a key
pub fn t(locale: Locale, key: &str) -> String {
    if let Some(&(en, zh)) = translations().get(key) {
        match locale {
            Locale::EnUS => en.to_string(),
            Locale::ZhCN => zh.to_string(),
        }
    } else {
        // Fallback: return the key itself
        key.to_string()
    }
}

/// Translate a key and substitute `{name}` placeholders
pub fn t_args(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(locale, key), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}
