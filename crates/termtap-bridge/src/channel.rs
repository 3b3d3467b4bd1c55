//! The event channel: one replaceable observer slot and its dispatch rule.
//!
//! The channel is strictly one-directional notification. No return value
//! flows from the observer back to the terminal engine; the tap is not a
//! filter or transform hook. Delivery is at-most-once per event: a
//! panicking observer loses that one notification and nothing else.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use termtap_core::{EventKind, TapEvent};

/// Observer of tapped terminal I/O.
///
/// A single method keeps the hot-path call shape fixed and inlinable
/// whether or not an observer is attached. Implementations must be fast:
/// both interception points run synchronously on the engine's data-path
/// thread, so a slow observer is directly visible as terminal latency.
/// Copy the bytes and hand off to a worker if you need to do real work.
pub trait TapObserver: Send + Sync {
    /// Called once per tapped byte run, in engine processing order.
    ///
    /// `event.data` is only valid until this method returns.
    fn on_event(&self, event: &TapEvent<'_>);
}

/// The process-wide observer slot, held as an injectable handle.
///
/// At most one observer is active at a time; [`register`](TapSlot::register)
/// replaces any previous one. The slot is cloneable and cheap to clone;
/// the terminal engine and the embedding host each hold a clone of the
/// same slot. An empty slot makes [`notify`](TapSlot::notify) a single
/// atomic load and branch.
#[derive(Clone, Default)]
pub struct TapSlot {
    inner: Arc<SlotInner>,
}

#[derive(Default)]
struct SlotInner {
    // Fast-path occupancy flag, kept in sync with `observer` under its
    // write lock. notify() checks this before touching the lock.
    occupied: AtomicBool,
    observer: RwLock<Option<Arc<dyn TapObserver>>>,
}

impl TapSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an observer, replacing any previous one.
    ///
    /// Must not be called from inside an observer callback.
    pub fn register(&self, observer: Arc<dyn TapObserver>) {
        let mut slot = self.inner.observer.write().unwrap();
        let replaced = slot.replace(observer).is_some();
        self.inner.occupied.store(true, Ordering::Release);
        debug!(replaced, "tap observer registered");
    }

    /// Clear the slot.
    ///
    /// Once this returns, no further notifications are delivered, even if
    /// the engine is producing events concurrently: dispatch holds the
    /// slot's read lock, so this call blocks until any in-flight callback
    /// finishes. Must not be called from inside an observer callback.
    pub fn unregister(&self) {
        let mut slot = self.inner.observer.write().unwrap();
        self.inner.occupied.store(false, Ordering::Release);
        if slot.take().is_some() {
            debug!("tap observer unregistered");
        }
    }

    /// Whether an observer is currently installed.
    pub fn is_registered(&self) -> bool {
        self.inner.occupied.load(Ordering::Acquire)
    }

    /// Deliver one event to the installed observer, if any.
    ///
    /// Called only from the two interception points. Synchronous: the
    /// observer runs to completion on the caller's thread before this
    /// returns. An observer panic is contained here and must never reach
    /// the engine's data path.
    #[inline]
    pub fn notify(&self, kind: EventKind, data: &[u8]) {
        if !self.inner.occupied.load(Ordering::Acquire) {
            return;
        }
        self.dispatch(kind, data);
    }

    #[cold]
    fn dispatch(&self, kind: EventKind, data: &[u8]) {
        let slot = self.inner.observer.read().unwrap();
        if let Some(observer) = slot.as_ref() {
            let event = TapEvent::new(kind, data);
            let result = panic::catch_unwind(AssertUnwindSafe(|| observer.on_event(&event)));
            if result.is_err() {
                warn!(%kind, len = data.len(), "tap observer panicked; event dropped");
            }
        }
    }
}

impl std::fmt::Debug for TapSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapSlot")
            .field("registered", &self.is_registered())
            .finish()
    }
}
