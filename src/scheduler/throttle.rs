//! Throttled - Rate-Limited Function Handle
//!
//! A throttle is a debounce whose max wait equals its wait: at most one
//! invocation per window, leading and trailing edges enabled by default.

use std::time::Duration;

use tokio::runtime::Handle;

use super::{Debounced, ThrottleOptions};

/// A throttled function handle
pub struct Throttled<A, R> {
    inner: Debounced<A, R>,
}

impl<A, R> Throttled<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    pub fn new<F>(func: F, wait: Duration, options: ThrottleOptions) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            inner: Debounced::new(func, wait, options.to_debounce(wait)),
        }
    }

    /// Wrap `func`, running timers on `runtime`
    pub fn with_runtime<F>(func: F, wait: Duration, options: ThrottleOptions, runtime: Handle) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            inner: Debounced::with_runtime(func, wait, options.to_debounce(wait), runtime),
        }
    }

    /// Call the throttled function
    pub fn call(&self, args: A) -> Option<R> {
        self.inner.call(args)
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn flush(&self) -> Option<R> {
        self.inner.flush()
    }

    pub fn pending(&self) -> bool {
        self.inner.pending()
    }

    pub fn result(&self) -> Option<R> {
        self.inner.result()
    }

    /// The underlying debounced handle
    pub fn as_debounced(&self) -> &Debounced<A, R> {
        &self.inner
    }
}

impl<A, R> Clone for Throttled<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A, R> std::fmt::Debug for Throttled<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Throttled").field(&self.inner).finish()
    }
}

/// Create a throttled function
pub fn throttle<A, R, F>(func: F, wait: Duration, options: ThrottleOptions) -> Throttled<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Throttled::new(func, wait, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn(u32) -> u32 + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = count.clone();
        (count, move |value: u32| {
            sink.fetch_add(1, Ordering::SeqCst);
            value
        })
    }

    #[test]
    fn test_throttle_is_debounce_with_max_wait() {
        let options = ThrottleOptions::default().to_debounce(ms(100));
        assert!(options.leading);
        assert!(options.trailing);
        assert_eq!(options.max_wait, Some(ms(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_continuous_calls_are_bounded() {
        let (count, func) = counter();
        let throttled = throttle(func, ms(100), ThrottleOptions::default());

        for value in 0..=25 {
            throttled.call(value);
            tokio::time::sleep(ms(10)).await;
        }
        tokio::time::sleep(ms(300)).await;

        let invocations = count.load(Ordering::SeqCst);
        assert!((2..=4).contains(&invocations), "invoked {invocations} times");
        assert!(!throttled.pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_leading_call_invokes_immediately() {
        let (count, func) = counter();
        let throttled = throttle(func, ms(100), ThrottleOptions::default());

        assert_eq!(throttled.call(1), Some(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Within the window: deferred to the trailing edge
        assert_eq!(throttled.call(2), Some(1));
        tokio::time::sleep(ms(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(throttled.result(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_leading_edge() {
        let (count, func) = counter();
        let options = ThrottleOptions {
            leading: false,
            trailing: true,
        };
        let throttled = throttle(func, ms(100), options);

        assert_eq!(throttled.call(1), None);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(ms(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (count, func) = counter();
        let throttled = throttle(func, ms(100), ThrottleOptions::default());

        throttled.call(1);
        throttled.call(2);
        throttled.cancel();
        throttled.cancel();
        assert!(!throttled.pending());

        tokio::time::sleep(ms(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
