//! Trailing-edge debouncing for the search text.
//!
//! [`DebouncedValue`] publishes its input only once the input has stayed
//! unchanged for the configured delay. A zero delay publishes synchronously.
//! The owner drives it by calling [`poll`](DebouncedValue::poll) whenever its
//! event loop wakes up; [`next_deadline`](DebouncedValue::next_deadline) says
//! when that needs to happen.

use std::sync::Arc;
use std::time::Duration;

use horizon_select_core::logging::targets;
use horizon_select_core::{Clock, SystemClock, TimerId, TimerManager};

/// A value whose published form trails its input by a fixed delay.
#[derive(Debug)]
pub struct DebouncedValue<V> {
    delay: Duration,
    value: V,
    pending: Option<(TimerId, V)>,
    timers: TimerManager,
}

impl<V: Clone + PartialEq> DebouncedValue<V> {
    /// Create a tracker that reads time from the system clock.
    pub fn new(initial: V, delay: Duration) -> Self {
        Self::with_clock(initial, delay, Arc::new(SystemClock))
    }

    /// Create a tracker with an injected clock.
    pub fn with_clock(initial: V, delay: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            delay,
            value: initial,
            pending: None,
            timers: TimerManager::with_clock(clock),
        }
    }

    /// The published value.
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the delay. An input already pending keeps its original deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Feed a new input.
    ///
    /// Any pending publish is cancelled and the delay restarts. Returns `true`
    /// if the published value changed synchronously (zero delay).
    pub fn set(&mut self, value: V) -> bool {
        self.stop_pending();

        if self.delay.is_zero() {
            let changed = self.value != value;
            self.value = value;
            return changed;
        }

        let id = self.timers.start_one_shot(self.delay);
        let delay_ms = self.delay.as_millis() as u64;
        tracing::trace!(target: targets::DEBOUNCE, delay_ms, "debounce armed");
        self.pending = Some((id, value));
        false
    }

    /// Publish the pending input if its delay has elapsed.
    ///
    /// Returns `true` if the published value changed.
    pub fn poll(&mut self) -> bool {
        let fired = self.timers.process_expired();
        let Some((id, _)) = &self.pending else {
            return false;
        };
        if !fired.contains(id) {
            return false;
        }

        let Some((_, value)) = self.pending.take() else {
            return false;
        };
        tracing::trace!(target: targets::DEBOUNCE, "debounced value published");
        let changed = self.value != value;
        self.value = value;
        changed
    }

    /// Time until the pending publish is due, `None` if nothing is pending.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        if self.pending.is_none() {
            return None;
        }
        self.timers.time_until_next()
    }

    /// Drop the pending publish. A later `poll` publishes nothing.
    pub fn cancel(&mut self) {
        if self.pending.is_some() {
            tracing::trace!(target: targets::DEBOUNCE, "pending debounce cancelled");
        }
        self.stop_pending();
    }

    fn stop_pending(&mut self) {
        if let Some((id, _)) = self.pending.take() {
            // Already fired timers are gone from the manager; that is fine.
            let _ = self.timers.stop(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_select_core::ManualClock;

    const DELAY: Duration = Duration::from_millis(200);

    fn tracker() -> (Arc<ManualClock>, DebouncedValue<String>) {
        let clock = ManualClock::shared();
        let value = DebouncedValue::with_clock(String::new(), DELAY, clock.clone());
        (clock, value)
    }

    #[test]
    fn test_zero_delay_is_synchronous() {
        let mut value = DebouncedValue::new(String::new(), Duration::ZERO);
        assert!(value.set("a".to_string()));
        assert_eq!(value.value(), "a");
        assert!(!value.is_pending());
        assert!(!value.set("a".to_string()));
    }

    #[test]
    fn test_burst_publishes_once_with_final_value() {
        let (clock, mut value) = tracker();
        let mut publishes = 0;

        for text in ["b", "ba", "ban"] {
            value.set(text.to_string());
            clock.advance(Duration::from_millis(50));
            if value.poll() {
                publishes += 1;
            }
        }
        assert_eq!(value.value(), "");

        // 50ms have passed since the last change.
        clock.advance(Duration::from_millis(149));
        assert!(!value.poll());
        assert_eq!(value.value(), "");

        clock.advance(Duration::from_millis(1));
        if value.poll() {
            publishes += 1;
        }
        assert_eq!(publishes, 1);
        assert_eq!(value.value(), "ban");
        assert!(!value.is_pending());
    }

    #[test]
    fn test_next_deadline() {
        let (clock, mut value) = tracker();
        assert_eq!(value.next_deadline(), None);

        value.set("x".to_string());
        assert_eq!(value.next_deadline(), Some(DELAY));

        clock.advance(Duration::from_millis(120));
        assert_eq!(value.next_deadline(), Some(Duration::from_millis(80)));
    }

    #[test]
    fn test_cancel_prevents_late_publish() {
        let (clock, mut value) = tracker();
        value.set("late".to_string());
        value.cancel();

        clock.advance(DELAY * 2);
        assert!(!value.poll());
        assert_eq!(value.value(), "");
        assert!(!value.is_pending());
    }

    #[test]
    fn test_set_delay_applies_to_next_input() {
        let (clock, mut value) = tracker();
        value.set_delay(Duration::from_millis(50));
        assert_eq!(value.delay(), Duration::from_millis(50));

        value.set("quick".to_string());
        clock.advance(Duration::from_millis(50));
        assert!(value.poll());
        assert_eq!(value.value(), "quick");

        value.set_delay(Duration::ZERO);
        assert!(value.set("now".to_string()));
        assert_eq!(value.value(), "now");
    }
}
