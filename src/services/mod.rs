//! Services
//!
//! Runtime plumbing shared by the asynchronous utilities.

pub mod runtime;

pub use runtime::*;
