//! Primitive Components
//!
//! Headless models and geometry behind the basic building blocks.

pub mod amount_input;
pub mod stepper;
