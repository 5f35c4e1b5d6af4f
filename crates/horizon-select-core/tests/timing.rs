//! Timer and frame scheduling driven together, as a host event loop would.

use std::sync::Arc;
use std::time::Duration;

use horizon_select_core::{
    CoreError, FrameError, FrameScheduler, ManualClock, ManualFrameScheduler, Signal, TimerManager,
};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("horizon_select_core=trace"))
        .with_test_writer()
        .try_init();
}

#[test]
fn test_event_loop_sleeps_until_next_timer() {
    init_logging();

    let clock = ManualClock::shared();
    let mut timers = TimerManager::with_clock(clock.clone());
    let debounce = timers.start_one_shot(Duration::from_millis(200));
    let tooltip = timers.start_one_shot(Duration::from_millis(500));

    let mut fired = Vec::new();
    while let Some(wait) = timers.time_until_next() {
        clock.advance(wait);
        fired.extend(timers.process_expired());
    }

    assert_eq!(fired, vec![debounce, tooltip]);
    assert_eq!(timers.active_count(), 0);
}

#[test]
fn test_restarted_debounce_fires_once() {
    init_logging();

    let clock = ManualClock::shared();
    let mut timers = TimerManager::with_clock(clock.clone());

    let mut current = timers.start_one_shot(Duration::from_millis(100));
    for _ in 0..3 {
        clock.advance(Duration::from_millis(60));
        timers.stop(current).unwrap();
        current = timers.start_one_shot(Duration::from_millis(100));
        assert!(timers.process_expired().is_empty());
    }

    clock.advance(Duration::from_millis(100));
    assert_eq!(timers.process_expired(), vec![current]);
}

#[test]
fn test_frame_loop_notifies_until_done() {
    init_logging();

    let frames = ManualFrameScheduler::new();
    let progress = Signal::<u32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    progress.connect(move |&step| sink.lock().push(step));

    let mut step = 0;
    frames.request_frame();
    while !frames.take_pending().is_empty() {
        step += 1;
        progress.emit(step);
        if step < 5 {
            frames.request_frame();
        }
    }

    assert_eq!(*seen.lock(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_cancelled_frame_is_not_delivered() {
    let frames = ManualFrameScheduler::new();
    let id = frames.request_frame();
    frames.cancel_frame(id).unwrap();

    assert!(frames.take_pending().is_empty());
    assert_eq!(
        frames.cancel_frame(id),
        Err(CoreError::Frame(FrameError::InvalidFrameId))
    );
}
