//! Error types for the termtap bridge.

use thiserror::Error;

use crate::surface::WindowSystem;

/// Main error type for termtap operations.
///
/// The tap side of the bridge deliberately produces no errors at all:
/// notification is fire-and-forget and an absent observer is a no-op, not a
/// failure. Everything here belongs to the embedding side.
#[derive(Debug, Error)]
pub enum Error {
    /// The terminal surface no longer exists (or was never published)
    #[error("Terminal surface is gone or not yet published")]
    SurfaceGone,

    /// Operation requires the surface to be attached to a parent
    #[error("Surface is not attached to a parent container")]
    NotAttached,

    /// The embedder has observed surface destruction; no further operations
    #[error("Surface was destroyed; re-embed is required")]
    SurfaceDestroyed,

    /// A native window operation reported failure
    #[error("Native window operation failed: {0}")]
    NativeOp(String),

    /// No embedding backend exists for this window system
    #[error("Embedding is not supported on {0}")]
    Unsupported(WindowSystem),

    /// The native-ops helper binary is missing from the host
    #[error("Required helper '{0}' not found in PATH")]
    HelperMissing(String),

    /// Handle belongs to a different window system than the backend
    #[error("Handle window system mismatch: expected {expected}, got {actual}")]
    SystemMismatch {
        /// Window system the backend operates on
        expected: WindowSystem,
        /// Window system of the handle that was passed in
        actual: WindowSystem,
    },

    /// IO error (helper process spawn/communication)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
