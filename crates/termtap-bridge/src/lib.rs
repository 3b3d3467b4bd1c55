//! # termtap-bridge
//!
//! Synchronous I/O tap for a terminal engine's data path.
//!
//! This crate provides:
//! - The event channel: a single replaceable observer slot and its
//!   fire-and-forget dispatch rule
//! - The two interception points a terminal engine wires into its data
//!   path (post-output-processing, pre-input-transmission)
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on termtap-core and is
//! called from inside the terminal engine's own thread. It never spawns,
//! queues, or defers work; observers that need asynchrony hand off
//! themselves after copying the event bytes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod tap;

// Re-export commonly used types
pub use channel::{TapObserver, TapSlot};
pub use tap::{InputTap, OutputTap};
