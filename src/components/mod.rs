//! Components
//!
//! Framework-independent parts of the UI components. Rendering lives in the
//! web and native layers.

pub mod primitives;

pub use primitives::amount_input::AmountInput;
pub use primitives::stepper::{
    StepperGeometry, StepperInput, compute_stepper_geometry, compute_stepper_geometry_localized,
};
