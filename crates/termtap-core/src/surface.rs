//! Opaque native surface handles.
//!
//! A [`RawSurfaceHandle`] identifies the terminal's drawable region to the
//! window system. It is strictly non-owning: the terminal engine owns the
//! window, and a handle held past the window's destruction is stale. Holders
//! must re-query the registry rather than cache a handle long-term.

use serde::{Deserialize, Serialize};

/// The window system a surface handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSystem {
    /// X11 window id
    X11,
    /// Win32 HWND
    Win32,
    /// AppKit NSView pointer
    AppKit,
    /// Wayland surface (embedding unsupported, carried for diagnostics)
    Wayland,
}

impl std::fmt::Display for WindowSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowSystem::X11 => write!(f, "x11"),
            WindowSystem::Win32 => write!(f, "win32"),
            WindowSystem::AppKit => write!(f, "appkit"),
            WindowSystem::Wayland => write!(f, "wayland"),
        }
    }
}

/// A non-owning reference to the terminal's drawable region.
///
/// The raw id is whatever the window system uses to name a window: an X11
/// window id, a Win32 HWND widened to 64 bits, or an NSView pointer. The
/// bridge never dereferences the id; it only passes it to native window
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawSurfaceHandle {
    /// Window-system discriminant for the raw id
    pub system: WindowSystem,
    /// The native window identifier, widened to 64 bits
    pub raw: u64,
}

impl RawSurfaceHandle {
    /// Create a handle from a native id.
    pub fn new(system: WindowSystem, raw: u64) -> Self {
        Self { system, raw }
    }

    /// Create an X11 handle.
    pub fn x11(window_id: u64) -> Self {
        Self::new(WindowSystem::X11, window_id)
    }

    /// Create a Win32 handle from an HWND value.
    pub fn win32(hwnd: u64) -> Self {
        Self::new(WindowSystem::Win32, hwnd)
    }

    /// Create an AppKit handle from an NSView pointer value.
    pub fn appkit(view_ptr: u64) -> Self {
        Self::new(WindowSystem::AppKit, view_ptr)
    }
}

impl std::fmt::Display for RawSurfaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:0x{:x}", self.system, self.raw)
    }
}
