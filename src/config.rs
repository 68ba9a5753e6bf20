//! Settings
//!
//! Defaults for the utilities, persisted as `settings.toml` in the platform
//! configuration directory. Every section is optional in the file.

use crate::components::primitives::stepper::StepperInput;
use crate::constants::{
    DEBOUNCE_WAIT_MS, DEFAULT_LOG_FILTER, SETTINGS_FILE_NAME, STEPPER_ARC_PERCENTAGE, STEPPER_SIZE,
    STEPPER_STROKE_WIDTH, THROTTLE_WAIT_MS,
};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;
use crate::i18n::Locale;
use crate::scheduler::{DebounceOptions, ThrottleOptions};
use crate::utils::AmountFormatOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Stepper drawing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperSettings {
    pub size: f64,
    pub stroke_width: f64,
    pub arc_percentage: f64,
}

impl Default for StepperSettings {
    fn default() -> Self {
        Self {
            size: STEPPER_SIZE,
            stroke_width: STEPPER_STROKE_WIDTH,
            arc_percentage: STEPPER_ARC_PERCENTAGE,
        }
    }
}

impl StepperSettings {
    /// Build a geometry input using these defaults
    pub fn input(&self, current_step: i32, total_steps: i32) -> StepperInput {
        StepperInput::new(current_step, total_steps, self.size)
            .stroke_width(self.stroke_width)
            .arc_percentage(self.arc_percentage)
    }
}

/// Debounce defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceSettings {
    pub wait_ms: u64,
    pub leading: bool,
    pub trailing: bool,
    pub max_wait_ms: Option<u64>,
}

impl Default for DebounceSettings {
    fn default() -> Self {
        let options = DebounceOptions::default();
        Self {
            wait_ms: DEBOUNCE_WAIT_MS,
            leading: options.leading,
            trailing: options.trailing,
            max_wait_ms: None,
        }
    }
}

impl DebounceSettings {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn options(&self) -> DebounceOptions {
        DebounceOptions {
            leading: self.leading,
            trailing: self.trailing,
            max_wait: self.max_wait_ms.map(Duration::from_millis),
        }
    }
}

/// Throttle defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleSettings {
    pub wait_ms: u64,
    pub leading: bool,
    pub trailing: bool,
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        let options = ThrottleOptions::default();
        Self {
            wait_ms: THROTTLE_WAIT_MS,
            leading: options.leading,
            trailing: options.trailing,
        }
    }
}

impl ThrottleSettings {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn options(&self) -> ThrottleOptions {
        ThrottleOptions {
            leading: self.leading,
            trailing: self.trailing,
        }
    }
}

/// Logging setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub filter: String,
    /// Also write a daily-rolling log file
    pub file: bool,
    /// Log directory; the data directory when unset
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: false,
            directory: None,
        }
    }
}

/// All persisted settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed locale; follows the system when unset
    pub locale: Option<Locale>,
    pub amount_format: AmountFormatOptions,
    pub stepper: StepperSettings,
    pub debounce: DebounceSettings,
    pub throttle: ThrottleSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parse settings from TOML. Empty input yields the defaults.
    pub fn from_toml_str(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = toml::from_str(value)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the utilities would silently clamp
    pub fn validate(&self) -> Result<()> {
        let stepper = &self.stepper;
        if !(stepper.size.is_finite() && stepper.size > 0.0) {
            return Err(Error::Invalid {
                message: format!("stepper.size must be positive, got {}", stepper.size),
            });
        }
        if !(stepper.stroke_width.is_finite() && (0.0..stepper.size).contains(&stepper.stroke_width)) {
            return Err(Error::Invalid {
                message: format!(
                    "stepper.stroke_width must be in [0, {}), got {}",
                    stepper.size, stepper.stroke_width
                ),
            });
        }
        if !(stepper.arc_percentage > 0.0 && stepper.arc_percentage <= 1.0) {
            return Err(Error::Invalid {
                message: format!(
                    "stepper.arc_percentage must be in (0, 1], got {}",
                    stepper.arc_percentage
                ),
            });
        }
        Ok(())
    }

    /// Effective locale
    pub fn locale(&self) -> Locale {
        self.locale.unwrap_or_else(Locale::from_system)
    }
}

/// Get the settings file path
pub fn settings_path() -> Result<PathBuf> {
    let path = get_or_create_config_dir()?.join(SETTINGS_FILE_NAME);

    #[cfg(debug_assertions)]
    info!("Settings file: {}", path.display());

    Ok(path)
}

/// Load settings, falling back to defaults when the file does not exist
pub fn load_settings() -> Result<Settings> {
    let path = settings_path()?;
    if !path.exists() {
        return Ok(Settings::default());
    }

    let value = std::fs::read_to_string(&path)?;
    Settings::from_toml_str(&value)
}

/// Save settings to the settings file
pub fn save_settings(settings: &Settings) -> Result<()> {
    settings.validate()?;
    let path = settings_path()?;
    std::fs::write(&path, settings.to_toml_string()?)?;
    info!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DecimalSeparator;

    #[test]
    fn test_empty_file_yields_defaults() {
        let settings = Settings::from_toml_str("  \n").expect("parse");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_toml_str(
            r#"
locale = "zh-CN"

[amount_format]
decimal_separator = ","
max_decimal_length = 3

[debounce]
wait_ms = 250
max_wait_ms = 1000
"#,
        )
        .expect("parse");

        assert_eq!(settings.locale(), Locale::ZhCN);
        assert_eq!(settings.amount_format.decimal_separator, DecimalSeparator::Comma);
        assert_eq!(settings.amount_format.max_decimal_length, 3);
        assert!(settings.amount_format.thousands_separator);
        assert_eq!(settings.debounce.wait(), Duration::from_millis(250));
        assert_eq!(
            settings.debounce.options().max_wait,
            Some(Duration::from_millis(1000))
        );
        assert_eq!(settings.throttle, ThrottleSettings::default());
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.locale = Some(Locale::EnUS);
        settings.stepper.size = 64.0;
        settings.logging.file = true;

        let text = settings.to_toml_string().expect("serialize");
        let parsed = Settings::from_toml_str(&text).expect("parse");
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_invalid_stepper_rejected() {
        let result = Settings::from_toml_str("[stepper]\narc_percentage = 1.5\n");
        assert!(matches!(result, Err(Error::Invalid { .. })));

        let result = Settings::from_toml_str("[stepper]\nsize = 10.0\nstroke_width = 12.0\n");
        assert!(matches!(result, Err(Error::Invalid { .. })));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Settings::from_toml_str("[stepper\nsize = 1");
        assert!(matches!(result, Err(Error::TomlDe { .. })));
    }

    #[test]
    fn test_settings_drive_utilities() {
        let settings = Settings::default();
        let input = settings.stepper.input(1, 4);
        assert_eq!(input.stroke_width, Some(STEPPER_STROKE_WIDTH));
        assert_eq!(settings.throttle.options(), ThrottleOptions::default());
        assert_eq!(settings.debounce.options(), DebounceOptions::default());
    }
}
