//! Timer system for Horizon Select.
//!
//! Provides one-shot timers keyed by [`TimerId`]. The manager does not run
//! callbacks itself: the owner polls [`TimerManager::process_expired`] and
//! reacts to the ids that fired, the same way a host event loop would
//! dispatch timer events.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// Queue entry, earliest fire time on top.
type QueueEntry = Reverse<(Instant, TimerId)>;

/// Manages one-shot timers against a [`Clock`].
pub struct TimerManager {
    /// Fire time of every armed timer.
    timers: SlotMap<TimerId, Instant>,
    queue: BinaryHeap<QueueEntry>,
    clock: Arc<dyn Clock>,
}

impl TimerManager {
    /// Create a timer manager backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a timer manager backed by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            clock,
        }
    }

    /// The clock this manager reads.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Arm a timer that fires once, `duration` from now.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        let fire_time = self.clock.now() + duration;
        let id = self.timers.insert(fire_time);
        self.queue.push(Reverse((fire_time, id)));

        tracing::trace!(target: targets::TIMER, ?id, ?duration, "timer armed");
        id
    }

    /// Disarm a timer. Fails if it already fired or was stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Stop every pending timer.
    pub fn stop_all(&mut self) {
        self.timers.clear();
        self.queue.clear();
    }

    /// Whether `id` is armed and has not fired yet.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Time left until the earliest armed timer fires.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.discard_stale();
        let Reverse((fire_time, _)) = self.queue.peek()?;
        Some(fire_time.saturating_duration_since(self.clock.now()))
    }

    /// Remove all timers whose fire time has passed.
    ///
    /// Returns the ids that fired, earliest first.
    #[tracing::instrument(skip(self), target = "horizon_select_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        let now = self.clock.now();
        let mut fired = Vec::new();

        while let Some(&Reverse((fire_time, id))) = self.queue.peek() {
            if fire_time > now {
                break;
            }
            self.queue.pop();

            // Stopped timers leave their queue entry behind.
            if self.timers.remove(id).is_some() {
                tracing::trace!(target: targets::TIMER, ?id, "timer fired");
                fired.push(id);
            }
        }

        fired
    }

    /// Number of armed timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse((fire_time, id))) = self.queue.peek() {
            if self.timers.get(*id) == Some(fire_time) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerManager")
            .field("active", &self.timers.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn manager() -> (Arc<ManualClock>, TimerManager) {
        let clock = ManualClock::shared();
        let timers = TimerManager::with_clock(clock.clone());
        (clock, timers)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let (clock, mut timers) = manager();
        let id = timers.start_one_shot(Duration::from_millis(100));

        clock.advance(Duration::from_millis(99));
        assert!(timers.process_expired().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(!timers.is_active(id));
        assert!(timers.process_expired().is_empty());
    }

    #[test]
    fn test_stop_prevents_fire() {
        let (clock, mut timers) = manager();
        let id = timers.start_one_shot(Duration::from_millis(10));
        assert!(timers.stop(id).is_ok());
        assert_eq!(
            timers.stop(id),
            Err(crate::CoreError::Timer(TimerError::InvalidTimerId))
        );

        clock.advance(Duration::from_millis(50));
        assert!(timers.process_expired().is_empty());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_fire_order() {
        let (clock, mut timers) = manager();
        let late = timers.start_one_shot(Duration::from_millis(30));
        let early = timers.start_one_shot(Duration::from_millis(10));

        clock.advance(Duration::from_millis(40));
        assert_eq!(timers.process_expired(), vec![early, late]);
    }

    #[test]
    fn test_time_until_next_skips_stopped() {
        let (clock, mut timers) = manager();
        let first = timers.start_one_shot(Duration::from_millis(10));
        timers.start_one_shot(Duration::from_millis(40));
        timers.stop(first).unwrap();

        clock.advance(Duration::from_millis(15));
        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(25)));
    }

    #[test]
    fn test_stop_all() {
        let (clock, mut timers) = manager();
        timers.start_one_shot(Duration::from_millis(1));
        timers.start_one_shot(Duration::from_millis(2));
        timers.stop_all();

        clock.advance(Duration::from_millis(5));
        assert!(timers.process_expired().is_empty());
        assert_eq!(timers.time_until_next(), None);
    }
}
