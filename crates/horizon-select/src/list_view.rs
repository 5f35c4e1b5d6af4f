//! The virtualized list the menu rows render into.
//!
//! Row rendering and recycling belong to the host. The engine only projects
//! [`ListViewProps`] for it and asks it to bring the focused row into view.

use parking_lot::Mutex;

/// Virtualized list operations the engine drives.
pub trait ListView: Send + Sync {
    /// Scroll so that the row at `index` is visible.
    fn scroll_to_item(&self, index: usize);
}

/// Sizing inputs for the virtualized list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListViewProps {
    /// Number of rows in the current derived option list.
    pub item_count: usize,
    /// Fixed height of one row.
    pub item_size: f32,
    /// Current menu height, already clamped to the configured maximum.
    pub max_height: f32,
    /// Rows rendered beyond the visible window on each side.
    pub overscan_count: usize,
}

impl ListViewProps {
    /// Rendered list height: the rows' total height, capped at `max_height`.
    pub fn height(&self) -> f32 {
        (self.item_count as f32 * self.item_size).min(self.max_height)
    }
}

/// A [`ListView`] that records every scroll request.
#[derive(Debug, Default)]
pub struct RecordingListView {
    requests: Mutex<Vec<usize>>,
}

impl RecordingListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every index passed to `scroll_to_item`, oldest first.
    pub fn requests(&self) -> Vec<usize> {
        self.requests.lock().clone()
    }

    /// The most recent scroll request.
    pub fn last_request(&self) -> Option<usize> {
        self.requests.lock().last().copied()
    }

    /// Forget recorded requests.
    pub fn clear(&self) {
        self.requests.lock().clear();
    }
}

impl ListView for RecordingListView {
    fn scroll_to_item(&self, index: usize) {
        self.requests.lock().push(index);
    }
}
