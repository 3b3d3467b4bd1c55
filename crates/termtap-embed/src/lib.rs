//! # termtap-embed
//!
//! Surface handle registry and window-embedding protocol.
//!
//! This crate provides:
//! - The surface registry: the terminal engine publishes its native
//!   window handle here, embedding hosts query it
//! - The embedding protocol: a Detached / Attached / Destroyed state
//!   machine driving native reparent, resize and focus operations
//! - Native-ops backends (xdotool on X11, PowerShell interop on Windows)
//!   behind a single trait so the protocol is testable with fakes
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on termtap-core and is
//! used by the embedding host, on the host's own thread. The terminal
//! engine only touches the registry (publish/retract); everything else
//! belongs to the host.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod embedder;
pub mod ops;
pub mod registry;
pub mod testing;

// Re-export commonly used types
pub use embedder::{EmbedState, Embedder};
pub use ops::SurfaceOps;
pub use registry::SurfaceRegistry;
