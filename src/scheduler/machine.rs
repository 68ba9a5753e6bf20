//! Debounce State Machine
//!
//! The bookkeeping behind [`Debounced`](super::Debounced), kept free of any
//! runtime. Every operation takes the current instant and returns the
//! [`Effect`]s the driver must apply, in order.
//!
//! ## States
//!
//! ```text
//!            call (leading edge)
//!   Idle ───────────────────────────▶ Pending (+ MaxWaitArmed)
//!    ▲                                   │  │
//!    │  trailing edge / cancel / flush   │  │ call, maxWait elapsed:
//!    └───────────────────────────────────┘  │ invoke, restart timers
//!                                           ▼
//!                                        Pending
//! ```

use std::time::Duration;

use tokio::time::Instant;

use super::DebounceOptions;

/// Identifies one armed timer. Ids are never reused by a machine, so a
/// timer that fires after being disarmed is recognized as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Which timer an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires `wait` after the last call
    Trailing,
    /// Bounds how long invocation can be deferred
    MaxWait,
}

/// Work requested by the machine
#[derive(Debug, PartialEq, Eq)]
pub enum Effect<A> {
    /// Start a timer that reports back after `delay`
    Arm {
        id: TimerId,
        kind: TimerKind,
        delay: Duration,
    },
    /// Stop a previously armed timer
    Disarm(TimerId),
    /// Call the wrapped function
    Invoke(A),
}

/// Explicit debounce state record
#[derive(Debug)]
pub struct DebounceMachine<A> {
    wait: Duration,
    /// Already raised to at least `wait`
    max_wait: Option<Duration>,
    leading: bool,
    trailing: bool,
    last_call: Option<Instant>,
    last_invoke: Option<Instant>,
    /// Arguments of the most recent call not yet passed to the function
    pending_args: Option<A>,
    trailing_timer: Option<TimerId>,
    max_wait_timer: Option<TimerId>,
    next_timer: u64,
}

impl<A> DebounceMachine<A> {
    pub fn new(wait: Duration, options: &DebounceOptions) -> Self {
        Self {
            wait,
            max_wait: options.max_wait.map(|max_wait| max_wait.max(wait)),
            leading: options.leading,
            trailing: options.trailing,
            last_call: None,
            last_invoke: None,
            pending_args: None,
            trailing_timer: None,
            max_wait_timer: None,
            next_timer: 0,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Effective max wait, if configured
    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }

    pub fn trailing_timer(&self) -> Option<TimerId> {
        self.trailing_timer
    }

    pub fn max_wait_timer(&self) -> Option<TimerId> {
        self.max_wait_timer
    }

    /// Whether any timer is armed
    pub fn pending(&self) -> bool {
        self.trailing_timer.is_some() || self.max_wait_timer.is_some()
    }

    /// Whether a call at `now` opens an invocation opportunity
    pub fn should_invoke(&self, now: Instant) -> bool {
        let Some(last_call) = self.last_call else {
            return true;
        };

        // A clock that moved backward counts as a reset
        let Some(since_last_call) = now.checked_duration_since(last_call) else {
            return true;
        };

        if since_last_call >= self.wait {
            return true;
        }

        match (self.max_wait, self.last_invoke) {
            (Some(max_wait), Some(last_invoke)) => now
                .checked_duration_since(last_invoke)
                .is_none_or(|since_invoke| since_invoke >= max_wait),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Record a call at `now` carrying `args`
    pub fn call(&mut self, now: Instant, args: A) -> Vec<Effect<A>> {
        let is_invoking = self.should_invoke(now);
        self.last_call = Some(now);
        self.pending_args = Some(args);

        let mut effects = Vec::new();

        if is_invoking {
            if !self.pending() {
                self.leading_edge(now, &mut effects);
                return effects;
            }
            if self.max_wait.is_some() {
                self.arm(TimerKind::Trailing, self.wait, &mut effects);
                self.invoke(now, &mut effects);
                self.arm_max_wait(now, &mut effects);
                return effects;
            }
        }

        if self.trailing_timer.is_none() {
            self.arm(TimerKind::Trailing, self.wait, &mut effects);
            if self.max_wait_timer.is_none() {
                self.arm_max_wait(now, &mut effects);
            }
        }

        effects
    }

    /// The trailing timer `id` fired at `now`
    pub fn trailing_timer_expired(&mut self, id: TimerId, now: Instant) -> Vec<Effect<A>> {
        let mut effects = Vec::new();
        if self.trailing_timer != Some(id) {
            return effects;
        }
        self.trailing_timer = None;

        if self.should_invoke(now) {
            self.trailing_edge(now, &mut effects);
        } else {
            let since_last_call = self
                .last_call
                .map(|last_call| now.saturating_duration_since(last_call))
                .unwrap_or_default();
            self.arm(TimerKind::Trailing, self.wait.saturating_sub(since_last_call), &mut effects);
        }

        effects
    }

    /// The max-wait timer `id` fired at `now`
    pub fn max_wait_expired(&mut self, id: TimerId, now: Instant) -> Vec<Effect<A>> {
        let mut effects = Vec::new();
        if self.max_wait_timer != Some(id) {
            return effects;
        }
        self.max_wait_timer = None;

        if self.pending_args.is_some() {
            self.arm(TimerKind::Trailing, self.wait, &mut effects);
            self.invoke(now, &mut effects);
            self.arm_max_wait(now, &mut effects);
        }

        effects
    }

    /// Disarm everything and forget pending state
    pub fn cancel(&mut self) -> Vec<Effect<A>> {
        let mut effects = Vec::new();
        self.disarm(TimerKind::Trailing, &mut effects);
        self.disarm(TimerKind::MaxWait, &mut effects);
        self.last_call = None;
        self.last_invoke = None;
        self.pending_args = None;
        effects
    }

    /// Run the trailing edge now if anything is pending
    pub fn flush(&mut self, now: Instant) -> Vec<Effect<A>> {
        let mut effects = Vec::new();
        if self.pending() {
            self.trailing_edge(now, &mut effects);
        }
        effects
    }

    fn leading_edge(&mut self, now: Instant, effects: &mut Vec<Effect<A>>) {
        self.last_invoke = Some(now);
        self.arm(TimerKind::Trailing, self.wait, effects);
        self.arm_max_wait(now, effects);
        if self.leading {
            self.invoke(now, effects);
        }
    }

    fn trailing_edge(&mut self, now: Instant, effects: &mut Vec<Effect<A>>) {
        self.disarm(TimerKind::Trailing, effects);
        self.disarm(TimerKind::MaxWait, effects);

        if self.trailing && self.pending_args.is_some() {
            self.invoke(now, effects);
        } else {
            self.pending_args = None;
        }
    }

    fn invoke(&mut self, now: Instant, effects: &mut Vec<Effect<A>>) {
        if let Some(args) = self.pending_args.take() {
            self.last_invoke = Some(now);
            effects.push(Effect::Invoke(args));
        }
    }

    /// Arm the max-wait timer for the deadline counted from the last invocation
    fn arm_max_wait(&mut self, now: Instant, effects: &mut Vec<Effect<A>>) {
        let Some(max_wait) = self.max_wait else {
            return;
        };
        let since_invoke = self
            .last_invoke
            .map(|last_invoke| now.saturating_duration_since(last_invoke))
            .unwrap_or_default();
        self.arm(TimerKind::MaxWait, max_wait.saturating_sub(since_invoke), effects);
    }

    /// Arm a timer of `kind`, replacing the one already armed
    fn arm(&mut self, kind: TimerKind, delay: Duration, effects: &mut Vec<Effect<A>>) {
        self.disarm(kind, effects);

        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        *self.slot(kind) = Some(id);
        effects.push(Effect::Arm { id, kind, delay });
    }

    fn disarm(&mut self, kind: TimerKind, effects: &mut Vec<Effect<A>>) {
        if let Some(id) = self.slot(kind).take() {
            effects.push(Effect::Disarm(id));
        }
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<TimerId> {
        match kind {
            TimerKind::Trailing => &mut self.trailing_timer,
            TimerKind::MaxWait => &mut self.max_wait_timer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn machine(options: DebounceOptions) -> (DebounceMachine<u32>, Instant) {
        let start = Instant::from_std(std::time::Instant::now());
        (DebounceMachine::new(ms(100), &options), start)
    }

    fn invoked(effects: &[Effect<u32>]) -> Vec<u32> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Invoke(args) => Some(*args),
                _ => None,
            })
            .collect()
    }

    fn armed(effects: &[Effect<u32>]) -> Vec<(TimerKind, Duration)> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Arm { kind, delay, .. } => Some((*kind, *delay)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_trailing_only_defers_to_last_call() {
        let (mut m, t0) = machine(DebounceOptions::default());

        let effects = m.call(t0, 1);
        assert!(invoked(&effects).is_empty());
        assert_eq!(armed(&effects), vec![(TimerKind::Trailing, ms(100))]);

        // Timer already armed: nothing new
        assert!(m.call(t0 + ms(30), 2).is_empty());

        // Fires early relative to the last call: re-armed for the remainder
        let id = m.trailing_timer().expect("armed");
        let effects = m.trailing_timer_expired(id, t0 + ms(100));
        assert_eq!(armed(&effects), vec![(TimerKind::Trailing, ms(30))]);
        assert!(invoked(&effects).is_empty());

        let id = m.trailing_timer().expect("re-armed");
        let effects = m.trailing_timer_expired(id, t0 + ms(130));
        assert_eq!(invoked(&effects), vec![2]);
        assert!(!m.pending());
    }

    #[test]
    fn test_leading_invokes_immediately() {
        let options = DebounceOptions {
            leading: true,
            ..Default::default()
        };
        let (mut m, t0) = machine(options);

        let effects = m.call(t0, 7);
        assert_eq!(invoked(&effects), vec![7]);
        assert!(m.pending());

        // Single call: the trailing edge has nothing left to send
        let id = m.trailing_timer().expect("armed");
        let effects = m.trailing_timer_expired(id, t0 + ms(100));
        assert!(invoked(&effects).is_empty());
        assert!(!m.pending());
    }

    #[test]
    fn test_leading_and_trailing_two_calls() {
        let options = DebounceOptions {
            leading: true,
            trailing: true,
            max_wait: None,
        };
        let (mut m, t0) = machine(options);

        assert_eq!(invoked(&m.call(t0, 1)), vec![1]);
        assert!(invoked(&m.call(t0 + ms(10), 2)).is_empty());

        let id = m.trailing_timer().expect("armed");
        let effects = m.trailing_timer_expired(id, t0 + ms(100));
        assert!(invoked(&effects).is_empty());

        let id = m.trailing_timer().expect("re-armed");
        assert_eq!(invoked(&m.trailing_timer_expired(id, t0 + ms(110))), vec![2]);
    }

    #[test]
    fn test_trailing_disabled_drops_payload() {
        let options = DebounceOptions {
            leading: false,
            trailing: false,
            max_wait: None,
        };
        let (mut m, t0) = machine(options);

        m.call(t0, 1);
        let id = m.trailing_timer().expect("armed");
        let effects = m.trailing_timer_expired(id, t0 + ms(100));
        assert!(invoked(&effects).is_empty());
        assert!(m.flush(t0 + ms(101)).is_empty());
    }

    #[test]
    fn test_max_wait_forces_progress_on_call() {
        let options = DebounceOptions {
            max_wait: Some(ms(150)),
            ..Default::default()
        };
        let (mut m, t0) = machine(options);

        let effects = m.call(t0, 0);
        assert_eq!(
            armed(&effects),
            vec![(TimerKind::Trailing, ms(100)), (TimerKind::MaxWait, ms(150))]
        );

        for step in 1..15 {
            m.call(t0 + ms(step * 10), step as u32);
        }

        // 150ms since the leading edge: the call itself invokes
        let effects = m.call(t0 + ms(150), 15);
        assert_eq!(invoked(&effects), vec![15]);
        assert!(effects.iter().any(|e| matches!(e, Effect::Disarm(_))));
    }

    #[test]
    fn test_max_wait_timer_invokes_pending() {
        let options = DebounceOptions {
            max_wait: Some(ms(150)),
            ..Default::default()
        };
        let (mut m, t0) = machine(options);

        m.call(t0, 1);
        m.call(t0 + ms(90), 2);

        // Quiet for only 10ms since the last call: the trailing timer re-arms
        let id = m.trailing_timer().expect("armed");
        let effects = m.trailing_timer_expired(id, t0 + ms(100));
        assert_eq!(armed(&effects), vec![(TimerKind::Trailing, ms(90))]);

        let id = m.max_wait_timer().expect("armed");
        let effects = m.max_wait_expired(id, t0 + ms(150));
        assert_eq!(invoked(&effects), vec![2]);
        assert!(armed(&effects).contains(&(TimerKind::Trailing, ms(100))));
        assert!(m.max_wait_timer().is_some());
    }

    #[test]
    fn test_max_wait_never_below_wait() {
        let options = DebounceOptions {
            max_wait: Some(ms(10)),
            ..Default::default()
        };
        let (m, _) = machine(options);
        assert_eq!(m.max_wait(), Some(ms(100)));
    }

    #[test]
    fn test_clock_moving_backward_invokes() {
        let (mut m, t0) = machine(DebounceOptions::default());
        m.call(t0 + ms(50), 1);
        assert!(m.should_invoke(t0));
        assert!(!m.should_invoke(t0 + ms(60)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (mut m, t0) = machine(DebounceOptions::default());
        m.call(t0, 1);
        let stale = m.trailing_timer().expect("armed");

        assert_eq!(m.cancel().len(), 1);
        assert!(m.cancel().is_empty());
        assert!(!m.pending());

        // A timer that was already running when cancelled
        assert!(m.trailing_timer_expired(stale, t0 + ms(100)).is_empty());
    }

    #[test]
    fn test_flush() {
        let (mut m, t0) = machine(DebounceOptions::default());
        assert!(m.flush(t0).is_empty());

        m.call(t0, 3);
        let effects = m.flush(t0 + ms(5));
        assert_eq!(invoked(&effects), vec![3]);
        assert!(!m.pending());
    }
}
