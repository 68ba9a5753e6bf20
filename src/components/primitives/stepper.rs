//! Stepper Component - Circular Progress Geometry
//!
//! Derives the SVG circle/arc parameters of the circular stepper from step
//! progress. Rendering is left to the web/native layers; both consume the
//! same [`StepperGeometry`].

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{STEPPER_ARC_PERCENTAGE, STEPPER_MINIMAL_DOT_LENGTH, STEPPER_STROKE_WIDTH};
use crate::i18n::{Locale, t_args};

/// Input of the stepper geometry calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepperInput {
    pub current_step: i32,
    pub total_steps: i32,
    /// Outer diameter in pixels
    pub size: f64,
    /// Overrides both the display and the accessibility label
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub stroke_width: Option<f64>,
    /// Fraction of the circle covered by the track
    #[serde(default)]
    pub arc_percentage: Option<f64>,
}

impl StepperInput {
    /// Create an input with default stroke width and arc
    pub fn new(current_step: i32, total_steps: i32, size: f64) -> Self {
        Self {
            current_step,
            total_steps,
            size,
            label: None,
            stroke_width: None,
            arc_percentage: None,
        }
    }

    /// Set the label override
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the stroke width
    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = Some(stroke_width);
        self
    }

    /// Set the arc percentage
    pub fn arc_percentage(mut self, arc_percentage: f64) -> Self {
        self.arc_percentage = Some(arc_percentage);
        self
    }
}

/// Derived drawing parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepperGeometry {
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub stroke_width: f64,
    pub circumference: f64,
    /// Visible length of the track
    pub track_arc_length: f64,
    /// `"{track_arc_length} {circumference}"`
    pub track_dash_array: String,
    pub progress_dash_array: String,
    pub progress_dash_offset: f64,
    /// Rotation that centres the track gap at the bottom
    pub rotation_degrees: f64,
    pub clamped_step: i32,
    /// In `[0, 1]`
    pub progress: f64,
    /// Zero progress is drawn as a short dot instead of no arc
    pub show_minimal_dot: bool,
    pub display_label: String,
    pub accessibility_label: String,
}

fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

/// Compute the stepper geometry with English accessibility labels.
pub fn compute_stepper_geometry(input: &StepperInput) -> StepperGeometry {
    compute_stepper_geometry_localized(input, Locale::EnUS)
}

/// Compute the stepper geometry. Never fails: out-of-range steps are clamped
/// and a zero total yields zero progress.
pub fn compute_stepper_geometry_localized(input: &StepperInput, locale: Locale) -> StepperGeometry {
    let total_steps = input.total_steps.max(0);
    let clamped_step = input.current_step.clamp(0, total_steps);
    let progress = if total_steps <= 0 {
        0.0
    } else {
        f64::from(clamped_step) / f64::from(total_steps)
    };

    let size = finite_or(Some(input.size), 0.0).max(0.0);
    let stroke_width = finite_or(input.stroke_width, STEPPER_STROKE_WIDTH).max(0.0);
    let arc_percentage = finite_or(input.arc_percentage, STEPPER_ARC_PERCENTAGE).clamp(0.0, 1.0);

    let radius = ((size - stroke_width) / 2.0).max(0.0);
    let center = size / 2.0;
    let circumference = 2.0 * PI * radius;
    let track_arc_length = circumference * arc_percentage;

    let show_minimal_dot = clamped_step == 0;
    let progress_dash_offset = if show_minimal_dot {
        (track_arc_length - STEPPER_MINIMAL_DOT_LENGTH).max(0.0)
    } else {
        track_arc_length * (1.0 - progress)
    };

    let dash_array = format!("{track_arc_length} {circumference}");
    let rotation_degrees = 90.0 + 360.0 * (1.0 - arc_percentage) / 2.0;

    let (display_label, accessibility_label) = match &input.label {
        Some(label) => (label.clone(), label.clone()),
        None => (
            format!("{clamped_step}/{total_steps}"),
            accessibility_label(clamped_step, total_steps, locale),
        ),
    };

    StepperGeometry {
        radius,
        center_x: center,
        center_y: center,
        stroke_width,
        circumference,
        track_arc_length,
        track_dash_array: dash_array.clone(),
        progress_dash_array: dash_array,
        progress_dash_offset,
        rotation_degrees,
        clamped_step,
        progress,
        show_minimal_dot,
        display_label,
        accessibility_label,
    }
}

fn accessibility_label(step: i32, total: i32, locale: Locale) -> String {
    let current = step.to_string();
    let total_text = total.to_string();
    let args = [("current", current.as_str()), ("total", total_text.as_str())];

    let key = if step == 0 {
        "stepper-not-started"
    } else if step == total {
        "stepper-complete"
    } else {
        "stepper-progress"
    };
    t_args(locale, key, &args)
}
