//! Defaults
//!
//! Centralized default values shared by the utilities and the settings file.

/// Fraction of the circle covered by the stepper track (270°)
pub const STEPPER_ARC_PERCENTAGE: f64 = 0.75;

/// Stepper stroke width in pixels
pub const STEPPER_STROKE_WIDTH: f64 = 4.0;

/// Stepper diameter in pixels
pub const STEPPER_SIZE: f64 = 48.0;

/// Arc length (px) left visible when no step is completed
pub const STEPPER_MINIMAL_DOT_LENGTH: f64 = 2.0;

/// Amount input length limits
pub const AMOUNT_MAX_INTEGER_LENGTH: usize = 15;
pub const AMOUNT_MAX_DECIMAL_LENGTH: usize = 2;

/// Digits per thousands group
pub const THOUSANDS_GROUP_SIZE: usize = 3;

/// Scheduler wait windows
pub const DEBOUNCE_WAIT_MS: u64 = 300;
pub const THROTTLE_WAIT_MS: u64 = 100;

/// Default tracing directive
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Settings file name inside the config directory
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Log file prefix inside the data directory
pub const LOG_FILE_PREFIX: &str = "design-kit.log";
