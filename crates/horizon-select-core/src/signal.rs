//! Observer notifications for select widgets.
//!
//! A [`Signal<Args>`] holds a set of slots and calls each of them, oldest
//! connection first, whenever it is emitted. A widget publishes events such
//! as "menu opened" as public signal fields and the host subscribes to the
//! ones it renders.
//!
//! ```
//! use horizon_select_core::Signal;
//!
//! let menu_opened = Signal::<()>::new();
//! let id = menu_opened.connect(|_| println!("menu is open"));
//!
//! menu_opened.emit(());
//! assert!(menu_opened.disconnect(id));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle returned by [`Signal::connect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

struct Connections<Args> {
    slots: SlotMap<ConnectionId, (u64, Slot<Args>)>,
    next_sequence: u64,
}

/// A list of slots notified with `&Args` on every emit.
///
/// Use `()` for notifications without a payload.
pub struct Signal<Args> {
    connections: Mutex<Connections<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections {
                slots: SlotMap::with_key(),
                next_sequence: 0,
            }),
        }
    }

    /// Subscribe `slot` to every future emission.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let sequence = connections.next_sequence;
        connections.next_sequence += 1;
        connections.slots.insert((sequence, Arc::new(slot)))
    }

    /// Remove one subscription. Returns `false` if `id` was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().slots.remove(id).is_some()
    }

    pub fn disconnect_all(&self) {
        self.connections.lock().slots.clear();
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// Call every slot with `args`, oldest connection first.
    ///
    /// Slots run after the connection table is released, so a slot may
    /// connect to or disconnect from this same signal.
    pub fn emit(&self, args: Args) {
        let mut ordered: Vec<(u64, Slot<Args>)> = self
            .connections
            .lock()
            .slots
            .values()
            .map(|(sequence, slot)| (*sequence, slot.clone()))
            .collect();
        ordered.sort_by_key(|(sequence, _)| *sequence);
        tracing::trace!(target: targets::SIGNAL, slots = ordered.len(), "emit");

        for (_, slot) in ordered {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.connections.lock().slots.len())
            .finish()
    }
}
