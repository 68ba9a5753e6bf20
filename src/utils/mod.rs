//! Utilities
//!
//! Pure text helpers shared by the web and native components.

mod format;
mod split_text;

pub use format::*;
pub use split_text::*;
