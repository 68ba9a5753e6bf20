//! Scheduler - Debounce and Throttle
//!
//! Wraps a function so bursts of calls collapse into a bounded number of
//! invocations. [`DebounceMachine`] holds the bookkeeping, [`Debounced`]
//! drives it with tokio timers, and [`Throttled`] is a debounce whose
//! max wait equals its wait.

mod debounce;
mod machine;
mod throttle;

use std::time::Duration;

pub use debounce::*;
pub use machine::*;
pub use throttle::*;

/// Timing edges of a debounced function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceOptions {
    /// Invoke at the start of a burst
    pub leading: bool,
    /// Invoke once the burst has been quiet for `wait`
    pub trailing: bool,
    /// Upper bound on how long invocation can be deferred
    pub max_wait: Option<Duration>,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            leading: false,
            trailing: true,
            max_wait: None,
        }
    }
}

/// Timing edges of a throttled function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleOptions {
    pub leading: bool,
    pub trailing: bool,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }
}

impl ThrottleOptions {
    /// The debounce configuration implementing this throttle
    pub fn to_debounce(self, wait: Duration) -> DebounceOptions {
        DebounceOptions {
            leading: self.leading,
            trailing: self.trailing,
            max_wait: Some(wait),
        }
    }
}
