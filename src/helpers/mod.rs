//! Helper Utilities
//!
//! Platform helpers used by the settings and logging layers.

mod fs;

pub use fs::*;
