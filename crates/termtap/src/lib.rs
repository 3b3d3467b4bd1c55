//! # termtap
//!
//! Terminal I/O tap and window-embedding bridge.
//!
//! termtap sits between a terminal engine and a host application. It does
//! two unrelated-looking things that ship together because embedding
//! hosts need both:
//!
//! - **I/O tap**: a synchronous, fire-and-forget observer of the bytes a
//!   terminal engine renders (output) and transmits (input), inserted at
//!   two fixed points in the engine's data path. The tap never blocks,
//!   buffers, or mutates the data it observes.
//! - **Window embedding**: a registry through which the engine publishes
//!   its native surface handle, and a protocol for a host application to
//!   reparent, resize and focus that surface as a child of its own
//!   window.
//!
//! The engine side holds a [`TapSlot`] clone and the two taps; the host
//! side registers a [`TapObserver`] and drives an [`Embedder`].
//!
//! ## Tapping a session
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use termtap::{EventKind, InputTap, OutputTap, TapEvent, TapObserver, TapSlot};
//!
//! struct AuditLog(Mutex<Vec<(EventKind, Vec<u8>)>>);
//!
//! impl TapObserver for AuditLog {
//!     fn on_event(&self, event: &TapEvent<'_>) {
//!         // The view is only valid for this call; copy what we keep.
//!         self.0.lock().unwrap().push((event.kind, event.data.to_vec()));
//!     }
//! }
//!
//! let slot = TapSlot::new();
//! let log = Arc::new(AuditLog(Mutex::new(Vec::new())));
//! slot.register(log.clone());
//!
//! // Inside the engine: output fires after processing, input before send.
//! let output_tap = OutputTap::new(slot.clone());
//! let input_tap = InputTap::new(slot.clone());
//! output_tap.data_processed(b"$ ");
//! input_tap.before_send(b"ls -la\n");
//!
//! assert_eq!(log.0.lock().unwrap().len(), 2);
//! ```
//!
//! ## Embedding the surface
//!
//! ```
//! use termtap::{
//!     EmbedState, Embedder, RawSurfaceHandle, SurfaceBounds, SurfaceRegistry, WindowSystem,
//! };
//! use termtap::testing::MockSurfaceOps;
//!
//! let registry = SurfaceRegistry::new();
//! // The engine publishes its window handle once the window exists.
//! registry.publish(RawSurfaceHandle::x11(0x3a00007));
//!
//! // The host attaches the surface under its own container window.
//! let mut embedder = Embedder::new(MockSurfaceOps::new(WindowSystem::X11), registry);
//! embedder
//!     .attach(RawSurfaceHandle::x11(0x1c00001), SurfaceBounds::fill(800, 600))
//!     .unwrap();
//! assert_eq!(embedder.state(), EmbedState::Attached);
//!
//! // On every container resize:
//! embedder.sync_bounds(SurfaceBounds::fill(1280, 720)).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use termtap_core::{
    EmbedConfig, Error, EventKind, Platform, RawSurfaceHandle, Result, SurfaceBounds, TapEvent,
    WindowSystem,
};

pub use termtap_bridge::{InputTap, OutputTap, TapObserver, TapSlot};

pub use termtap_embed::ops::detect_backend;
pub use termtap_embed::{EmbedState, Embedder, SurfaceOps, SurfaceRegistry};

/// Test-support backends re-exported for downstream integration tests.
pub mod testing {
    pub use termtap_embed::testing::{MockOp, MockSurfaceOps};
}
