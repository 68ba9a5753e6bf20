//! Tokio Runtime Bridge
//!
//! Scheduler timers need a tokio runtime. UI hosts that already run one get
//! their timers spawned there; everyone else shares a lazily created
//! runtime owned by this module.
//!
//! ## Pattern
//!
//! ```text
//! Debounced::new(...)
//!       │
//!       ▼
//! current_or_shared_handle()
//!       │
//!       ├── inside a runtime ──▶ Handle::current()
//!       │
//!       └── otherwise ─────────▶ shared runtime (OnceLock)
//! ```

use std::sync::OnceLock;
use tokio::runtime::{Handle, Runtime};

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        tracing::debug!("Starting shared tokio runtime for scheduler timers");
        Runtime::new().expect("Failed to create tokio runtime")
    })
}

/// Get a handle to the shared tokio runtime
pub fn runtime_handle() -> Handle {
    get_runtime().handle().clone()
}

/// Handle of the runtime the caller runs in, or of the shared runtime
pub fn current_or_shared_handle() -> Handle {
    Handle::try_current().unwrap_or_else(|_| runtime_handle())
}
