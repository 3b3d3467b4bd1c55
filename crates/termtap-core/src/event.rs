//! Event types for the terminal I/O tap.
//!
//! A [`TapEvent`] is a transient, non-owning view of the bytes flowing
//! through one of the two interception points. It is only valid for the
//! duration of the synchronous observer callback; observers that need the
//! bytes afterwards must copy them, since the underlying buffer belongs to
//! the terminal engine and may be reused as soon as the callback returns.

use serde::{Deserialize, Serialize};

/// Which side of the session a tapped byte run belongs to.
///
/// The discriminant values are part of the wire-level contract with
/// embedding hosts and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EventKind {
    /// Bytes received from the remote host, destined for rendering.
    Output = 1,
    /// Bytes produced locally (keystrokes), destined for transmission.
    Input = 2,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Output => write!(f, "output"),
            EventKind::Input => write!(f, "input"),
        }
    }
}

/// A borrowed view of one tapped byte run.
///
/// Carries no sequence number and no identity; ordering is implied purely
/// by call order on the engine's data-path thread.
#[derive(Debug, Clone, Copy)]
pub struct TapEvent<'a> {
    /// Output or input.
    pub kind: EventKind,
    /// The exact bytes the engine processed (output) or is about to
    /// transmit (input). Valid only for the callback's duration.
    pub data: &'a [u8],
}

impl<'a> TapEvent<'a> {
    /// Create a new event over a borrowed byte run.
    pub fn new(kind: EventKind, data: &'a [u8]) -> Self {
        Self { kind, data }
    }

    /// Length of the tapped byte run.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tapped byte run is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy the bytes into an owned buffer for retention past the callback.
    pub fn to_owned_bytes(&self) -> Vec<u8> {
        self.data.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_discriminants() {
        assert_eq!(EventKind::Output as u8, 1);
        assert_eq!(EventKind::Input as u8, 2);
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::Output.to_string(), "output");
        assert_eq!(EventKind::Input.to_string(), "input");
    }

    #[test]
    fn test_event_kind_serde() {
        let json = serde_json::to_string(&EventKind::Output).unwrap();
        assert_eq!(json, "\"output\"");
        let kind: EventKind = serde_json::from_str("\"input\"").unwrap();
        assert_eq!(kind, EventKind::Input);
    }

    #[test]
    fn test_tap_event_view() {
        let buf = b"ls -la\n";
        let event = TapEvent::new(EventKind::Input, buf);
        assert_eq!(event.len(), 7);
        assert!(!event.is_empty());
        assert_eq!(event.data, b"ls -la\n");
    }

    #[test]
    fn test_tap_event_to_owned() {
        let buf = b"hello";
        let event = TapEvent::new(EventKind::Output, buf);
        let owned = event.to_owned_bytes();
        assert_eq!(owned, b"hello");
    }

    #[test]
    fn test_tap_event_empty() {
        let event = TapEvent::new(EventKind::Output, &[]);
        assert!(event.is_empty());
        assert_eq!(event.len(), 0);
    }
}
