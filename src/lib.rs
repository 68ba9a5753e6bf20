//! Design Kit Core Library
//!
//! Framework-independent utilities shared by the web and native
//! implementations of the design kit: amount text formatting, per-character
//! splitting of formatted numbers, circular stepper geometry and
//! debounce/throttle scheduling.

pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod logging;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod utils;

pub use error::{Error, Result};
