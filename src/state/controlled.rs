//! Controlled Value - External vs Internal Ownership
//!
//! A value an owner may control from outside. When an external value is
//! present it always wins; otherwise the internally held value is used. The
//! change callback fires on every change no matter who owns the value.

use std::fmt;

type ChangeHandler<T> = Box<dyn Fn(&T) + Send + Sync + 'static>;

/// State holder for a possibly externally controlled value
pub struct ControlledValue<T> {
    /// Value supplied by the owner, if any
    external: Option<T>,
    /// Value used while uncontrolled
    internal: T,
    on_change: Option<ChangeHandler<T>>,
}

impl<T> ControlledValue<T> {
    /// Create an uncontrolled value with an initial internal value
    pub fn uncontrolled(initial: T) -> Self {
        Self {
            external: None,
            internal: initial,
            on_change: None,
        }
    }

    /// Create a controlled value. The internal fallback starts from `fallback`.
    pub fn controlled(value: T, fallback: T) -> Self {
        Self {
            external: Some(value),
            internal: fallback,
            on_change: None,
        }
    }

    /// Set the change handler
    pub fn on_change(&mut self, handler: impl Fn(&T) + Send + Sync + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    /// Whether an external source of truth is present
    pub fn is_externally_controlled(&self) -> bool {
        self.external.is_some()
    }

    /// Get the effective value
    pub fn value(&self) -> &T {
        self.external.as_ref().unwrap_or(&self.internal)
    }

    /// Replace (or drop, with `None`) the external value. Does not notify:
    /// the owner already knows the value it passes in.
    pub fn set_external(&mut self, value: Option<T>) {
        self.external = value;
    }

    /// Request a change.
    ///
    /// Uncontrolled values are updated in place. Controlled values keep the
    /// external value until the owner passes a new one through
    /// [`set_external`](Self::set_external). The handler is notified either way.
    pub fn set(&mut self, value: T) {
        if let Some(ref handler) = self.on_change {
            handler(&value);
        }
        if self.external.is_none() {
            self.internal = value;
        }
    }
}

impl<T: Default> Default for ControlledValue<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ControlledValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlledValue")
            .field("external", &self.external)
            .field("internal", &self.internal)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}
