//! # termtap-core
//!
//! Core types for the termtap bridge.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other termtap crates. It provides:
//!
//! - Event types for the I/O tap (EventKind, TapEvent)
//! - Surface handle types for window embedding
//! - Geometry types for surface layout
//! - Platform detection
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other termtap crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod platform;
pub mod surface;

// Re-export commonly used types
pub use config::EmbedConfig;
pub use error::{Error, Result};
pub use event::{EventKind, TapEvent};
pub use geometry::SurfaceBounds;
pub use platform::Platform;
pub use surface::{RawSurfaceHandle, WindowSystem};
