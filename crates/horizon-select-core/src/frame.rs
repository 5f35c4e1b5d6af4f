//! Per-frame step scheduling.
//!
//! Animations never hold a callback into the widget. They ask a
//! [`FrameScheduler`] for the next frame and get back a [`FrameId`], which
//! doubles as the cancel token. When the host renders a frame it hands the id
//! back to the animation's owner, which ignores ids it is no longer waiting
//! for. Stale frames after a teardown are therefore harmless.
//!
//! # Example
//!
//! ```
//! use horizon_select_core::{FrameScheduler, ManualFrameScheduler};
//!
//! let frames = ManualFrameScheduler::new();
//! let first = frames.request_frame();
//! let second = frames.request_frame();
//! frames.cancel_frame(second).unwrap();
//!
//! assert_eq!(frames.take_pending(), vec![first]);
//! ```

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{FrameError, Result};
use crate::logging::targets;

new_key_type! {
    /// Identifies one requested frame step. Also the cancel token for it.
    pub struct FrameId;
}

/// Something that can run a step on the next rendered frame.
pub trait FrameScheduler: Send + Sync {
    /// Request that the owner be stepped on the next frame.
    fn request_frame(&self) -> FrameId;

    /// Cancel a previously requested frame.
    ///
    /// Returns an error if the frame was already delivered or cancelled.
    fn cancel_frame(&self, id: FrameId) -> Result<()>;
}

#[derive(Debug, Default)]
struct PendingFrames {
    frames: SlotMap<FrameId, u64>,
    next_sequence: u64,
}

/// A frame scheduler driven explicitly by its owner.
///
/// Hosts without a compositor call [`take_pending`](Self::take_pending) once
/// per frame; tests call it in a loop to run an animation to completion
/// synchronously.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    pending: Mutex<PendingFrames>,
}

impl ManualFrameScheduler {
    /// Create a scheduler with no pending frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending frame, oldest request first.
    pub fn take_pending(&self) -> Vec<FrameId> {
        let mut pending = self.pending.lock();
        let mut frames: Vec<(FrameId, u64)> = pending.frames.drain().collect();
        frames.sort_by_key(|&(_, sequence)| sequence);
        frames.into_iter().map(|(id, _)| id).collect()
    }

    /// Number of frames requested and not yet taken or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().frames.len()
    }

    /// Whether a frame is still waiting to be delivered.
    pub fn is_pending(&self, id: FrameId) -> bool {
        self.pending.lock().frames.contains_key(id)
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self) -> FrameId {
        let mut pending = self.pending.lock();
        let sequence = pending.next_sequence;
        pending.next_sequence += 1;
        let id = pending.frames.insert(sequence);
        tracing::trace!(target: targets::FRAME, ?id, "frame requested");
        id
    }

    fn cancel_frame(&self, id: FrameId) -> Result<()> {
        if self.pending.lock().frames.remove(id).is_some() {
            tracing::trace!(target: targets::FRAME, ?id, "frame cancelled");
            Ok(())
        } else {
            Err(FrameError::InvalidFrameId.into())
        }
    }
}
