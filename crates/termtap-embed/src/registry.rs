//! Surface handle registry.
//!
//! A single slot through which the terminal engine publishes the native
//! handle of its drawable region. The registry exposes read access only;
//! ownership of the window stays with the engine.
//!
//! The slot is read from the embedding host's thread while the engine may
//! retract it from its own, so a handle returned by [`current`]
//! (SurfaceRegistry::current) is only trustworthy until control next
//! returns to the engine's event loop. Consumers re-query instead of
//! caching; a destroyed surface reads back as `None`, never as a stale
//! value.

use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use termtap_core::RawSurfaceHandle;

/// Shared slot holding the terminal's current surface handle.
///
/// Cloneable and cheap to clone; the engine and the embedding host each
/// hold a clone of the same registry.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    slot: Arc<RwLock<Option<RawSurfaceHandle>>>,
}

impl SurfaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the surface handle. Called by the terminal engine when its
    /// window is constructed; replaces any previous handle.
    pub fn publish(&self, handle: RawSurfaceHandle) {
        let mut slot = self.slot.write().unwrap();
        let replaced = slot.replace(handle);
        match replaced {
            Some(old) if old != handle => {
                info!(%old, new = %handle, "surface handle replaced");
            }
            Some(_) => {}
            None => info!(%handle, "surface handle published"),
        }
    }

    /// Retract the handle. Called by the terminal engine when its window
    /// is destroyed; subsequent queries return `None`.
    pub fn retract(&self) {
        let mut slot = self.slot.write().unwrap();
        if let Some(handle) = slot.take() {
            debug!(%handle, "surface handle retracted");
        }
    }

    /// The current surface handle, or `None` before the terminal window
    /// exists and after it is destroyed.
    pub fn current(&self) -> Option<RawSurfaceHandle> {
        *self.slot.read().unwrap()
    }
}
