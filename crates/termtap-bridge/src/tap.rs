//! The two interception points a terminal engine wires into its data path.
//!
//! Each point is one branch and one call on the hot path. No allocation,
//! no buffering, no copying happens here; an observer that needs the bytes
//! past the callback copies them itself.
//!
//! With the `intercept` feature disabled both taps compile to empty
//! methods and the engine behaves exactly as if the bridge did not exist.

use crate::channel::TapSlot;

#[cfg(feature = "intercept")]
use termtap_core::EventKind;

/// Output-side interception point.
///
/// The engine calls [`data_processed`](OutputTap::data_processed) *after*
/// it has fully processed and queued a run of remote output for rendering.
/// The observer therefore sees only data the user will also see: no
/// partial frames, no speculative bytes.
#[derive(Debug, Clone)]
pub struct OutputTap {
    #[cfg_attr(not(feature = "intercept"), allow(dead_code))]
    slot: TapSlot,
}

impl OutputTap {
    /// Create an output tap delivering into the given slot.
    pub fn new(slot: TapSlot) -> Self {
        Self { slot }
    }

    /// Notify the channel of one fully processed output run.
    ///
    /// `data` must be the exact bytes the engine consumed, unmodified.
    /// Strictly observational: nothing the observer does affects rendering.
    #[inline]
    pub fn data_processed(&self, data: &[u8]) {
        #[cfg(feature = "intercept")]
        self.slot.notify(EventKind::Output, data);
        #[cfg(not(feature = "intercept"))]
        let _ = data;
    }
}

/// Input-side interception point.
///
/// The engine calls [`before_send`](InputTap::before_send) *before* its
/// line-discipline layer transmits a run of user input onward. The
/// observer sees every byte before it can reach the remote host, but
/// cannot block or alter transmission; this is a tap, not a gate.
#[derive(Debug, Clone)]
pub struct InputTap {
    #[cfg_attr(not(feature = "intercept"), allow(dead_code))]
    slot: TapSlot,
}

impl InputTap {
    /// Create an input tap delivering into the given slot.
    pub fn new(slot: TapSlot) -> Self {
        Self { slot }
    }

    /// Notify the channel of one input run about to be transmitted.
    ///
    /// `data` must be the exact bytes about to leave the process. The
    /// engine must continue transmission after this returns regardless of
    /// what the observer did.
    #[inline]
    pub fn before_send(&self, data: &[u8]) {
        #[cfg(feature = "intercept")]
        self.slot.notify(EventKind::Input, data);
        #[cfg(not(feature = "intercept"))]
        let _ = data;
    }
}
