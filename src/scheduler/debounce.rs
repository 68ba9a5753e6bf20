//! Debounced - Timer-Driven Debounce Handle
//!
//! Applies the [`Effect`]s produced by [`DebounceMachine`]: arms and aborts
//! tokio timers and calls the wrapped function.
//!
//! ## Invocation rules
//!
//! - Calls that hit a leading or max-wait edge invoke on the caller's stack,
//!   so a panic in the wrapped function reaches the caller.
//! - Trailing and max-wait timers invoke from a tokio task. The state is
//!   committed before the function runs, so a panic there leaves the handle
//!   consistent; the panic itself is contained in the task.
//! - Invocations never overlap and happen in edge order. The wrapped function
//!   must not call its own handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

use super::{DebounceMachine, DebounceOptions, Effect, TimerId, TimerKind};
use crate::services::current_or_shared_handle;

type Callback<A, R> = Box<dyn Fn(A) -> R + Send + Sync + 'static>;

/// Lock a mutex, recovering the data if a wrapped function panicked while
/// it was held
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Inner<A, R> {
    machine: DebounceMachine<A>,
    /// Running timer tasks by id
    timers: HashMap<TimerId, AbortHandle>,
    result: Option<R>,
}

struct Shared<A, R> {
    func: Callback<A, R>,
    inner: Mutex<Inner<A, R>>,
    /// Held from decision to invocation so edges run one at a time, in order
    gate: Mutex<()>,
    runtime: Handle,
}

impl<A, R> Shared<A, R>
where
    A: Send + 'static,
    R: Send + 'static,
{
    /// Apply timer effects and return the arguments to invoke with
    fn apply(self: &Arc<Self>, inner: &mut Inner<A, R>, effects: Vec<Effect<A>>) -> Vec<A> {
        let mut invocations = Vec::new();

        for effect in effects {
            match effect {
                Effect::Arm { id, kind, delay } => {
                    trace!("Arming {:?} timer {:?} for {:?}", kind, id, delay);
                    let handle = self.spawn_timer(id, kind, delay);
                    inner.timers.insert(id, handle);
                }
                Effect::Disarm(id) => {
                    if let Some(handle) = inner.timers.remove(&id) {
                        trace!("Disarming timer {:?}", id);
                        handle.abort();
                    }
                }
                Effect::Invoke(args) => invocations.push(args),
            }
        }

        invocations
    }

    fn spawn_timer(self: &Arc<Self>, id: TimerId, kind: TimerKind, delay: Duration) -> AbortHandle {
        // A dropped handle must not be kept alive by its own timers
        let shared = Arc::downgrade(self);

        self.runtime
            .spawn(async move {
                tokio::time::sleep(delay).await;
                if let Some(shared) = shared.upgrade() {
                    shared.fire(id, kind);
                }
            })
            .abort_handle()
    }

    fn fire(self: &Arc<Self>, id: TimerId, kind: TimerKind) {
        let _gate = lock(&self.gate);

        let invocations = {
            let mut inner = lock(&self.inner);
            inner.timers.remove(&id);

            let now = Instant::now();
            trace!("{:?} timer {:?} fired", kind, id);
            let effects = match kind {
                TimerKind::Trailing => inner.machine.trailing_timer_expired(id, now),
                TimerKind::MaxWait => inner.machine.max_wait_expired(id, now),
            };
            self.apply(&mut inner, effects)
        };

        self.run(invocations);
    }

    fn run(&self, invocations: Vec<A>) {
        for args in invocations {
            debug!("Invoking debounced function");
            let result = (self.func)(args);
            lock(&self.inner).result = Some(result);
        }
    }
}

impl<A, R> Drop for Shared<A, R> {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in inner.timers.drain() {
            handle.abort();
        }
    }
}

/// A debounced function handle
///
/// Clones share the same instance. Dropping the last clone aborts any
/// pending timers; call [`cancel`](Self::cancel) first to make that explicit.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use design_kit_core::scheduler::{DebounceOptions, debounce};
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let search = debounce(|query: String| query.len(), Duration::from_millis(300), DebounceOptions::default());
///
/// search.call("r".to_string());
/// search.call("ru".to_string());
/// search.call("rust".to_string());
/// assert_eq!(search.result(), None);
///
/// tokio::time::sleep(Duration::from_millis(400)).await;
/// assert_eq!(search.result(), Some(4));
/// # }
/// ```
pub struct Debounced<A, R> {
    shared: Arc<Shared<A, R>>,
}

impl<A, R> Debounced<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Wrap `func`. Timers run on the current tokio runtime, or on the
    /// shared runtime when called outside of one.
    pub fn new<F>(func: F, wait: Duration, options: DebounceOptions) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self::with_runtime(func, wait, options, current_or_shared_handle())
    }

    /// Wrap `func`, running timers on `runtime`
    pub fn with_runtime<F>(func: F, wait: Duration, options: DebounceOptions, runtime: Handle) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                func: Box::new(func),
                inner: Mutex::new(Inner {
                    machine: DebounceMachine::new(wait, &options),
                    timers: HashMap::new(),
                    result: None,
                }),
                gate: Mutex::new(()),
                runtime,
            }),
        }
    }

    /// Call the debounced function.
    ///
    /// Returns the result of the most recent invocation, which is this
    /// call's own result when it hit a leading or max-wait edge.
    pub fn call(&self, args: A) -> Option<R> {
        let shared = &self.shared;
        let _gate = lock(&shared.gate);

        let invocations = {
            let mut inner = lock(&shared.inner);
            let effects = inner.machine.call(Instant::now(), args);
            shared.apply(&mut inner, effects)
        };

        shared.run(invocations);
        self.result()
    }

    /// Drop pending work and timers. Safe to call at any time.
    pub fn cancel(&self) {
        let shared = &self.shared;
        let _gate = lock(&shared.gate);

        let mut inner = lock(&shared.inner);
        let effects = inner.machine.cancel();
        shared.apply(&mut inner, effects);
    }

    /// Run the trailing edge now if anything is pending.
    pub fn flush(&self) -> Option<R> {
        let shared = &self.shared;
        let _gate = lock(&shared.gate);

        let invocations = {
            let mut inner = lock(&shared.inner);
            let effects = inner.machine.flush(Instant::now());
            shared.apply(&mut inner, effects)
        };

        shared.run(invocations);
        self.result()
    }

    /// Whether a timer is armed
    pub fn pending(&self) -> bool {
        lock(&self.shared.inner).machine.pending()
    }

    /// Result of the most recent invocation
    pub fn result(&self) -> Option<R> {
        lock(&self.shared.inner).result.clone()
    }
}

impl<A, R> Clone for Debounced<A, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A, R> fmt::Debug for Debounced<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.shared.inner);
        f.debug_struct("Debounced")
            .field("wait", &inner.machine.wait())
            .field("max_wait", &inner.machine.max_wait())
            .field("pending", &inner.machine.pending())
            .finish()
    }
}

/// Create a debounced function
pub fn debounce<A, R, F>(func: F, wait: Duration, options: DebounceOptions) -> Debounced<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Debounced::new(func, wait, options)
}
