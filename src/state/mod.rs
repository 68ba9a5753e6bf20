//! State Management
//!
//! Small state holders shared by headless component models.

mod controlled;

pub use controlled::*;
