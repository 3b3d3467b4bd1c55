//! Platform detection for selecting an embedding backend.
//!
//! The embedding protocol talks to the window system through a native-ops
//! backend; which backend applies is decided at runtime from the host
//! platform and, on Linux, from the session's display server.

use serde::{Deserialize, Serialize};

use crate::surface::WindowSystem;

/// Host platforms the bridge can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Native Linux (not WSL)
    Linux,
    /// macOS
    MacOS,
    /// Native Windows
    Windows,
    /// Windows Subsystem for Linux
    WSL,
}

impl Platform {
    /// Detect the current platform at runtime.
    ///
    /// WSL is distinguished from native Linux by checking `/proc/version`
    /// for a Microsoft kernel string and the WSLInterop binfmt entry.
    pub fn detect() -> Self {
        #[cfg(target_os = "linux")]
        {
            if Self::is_wsl() {
                return Platform::WSL;
            }
            Platform::Linux
        }

        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }

        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            compile_error!("Unsupported platform - only Linux, macOS, and Windows are supported")
        }
    }

    #[cfg(target_os = "linux")]
    fn is_wsl() -> bool {
        if let Ok(version) = std::fs::read_to_string("/proc/version") {
            if version.to_lowercase().contains("microsoft") {
                return true;
            }
        }

        if std::path::Path::new("/proc/sys/fs/binfmt_misc/WSLInterop").exists() {
            return true;
        }

        false
    }

    /// The window system terminal surfaces use on this platform.
    ///
    /// Linux reports Wayland only for pure Wayland sessions, where
    /// `WAYLAND_DISPLAY` is set and `DISPLAY` is not; any session with
    /// `DISPLAY` set (XWayland and WSLg included), and bare sessions with
    /// neither variable, report X11.
    pub fn window_system(&self) -> WindowSystem {
        match self {
            Platform::Linux | Platform::WSL => {
                if std::env::var_os("WAYLAND_DISPLAY").is_some()
                    && std::env::var_os("DISPLAY").is_none()
                {
                    WindowSystem::Wayland
                } else {
                    WindowSystem::X11
                }
            }
            Platform::MacOS => WindowSystem::AppKit,
            Platform::Windows => WindowSystem::Win32,
        }
    }

    /// Get the platform name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::MacOS => "macOS",
            Platform::Windows => "Windows",
            Platform::WSL => "WSL",
        }
    }

    /// Check if this is a Unix-like platform.
    pub fn is_unix(&self) -> bool {
        matches!(self, Platform::Linux | Platform::MacOS | Platform::WSL)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
