//! Native window operations behind a single trait.
//!
//! The embedding protocol never talks to the window system directly; it
//! goes through a [`SurfaceOps`] backend. Real backends shell out to
//! platform helpers (`xdotool` on X11, PowerShell user32 interop on
//! Windows); tests substitute [`crate::testing::MockSurfaceOps`].

use termtap_core::{EmbedConfig, Error, Platform, RawSurfaceHandle, Result, SurfaceBounds, WindowSystem};

#[cfg(target_os = "linux")]
pub mod x11;

#[cfg(target_os = "windows")]
pub mod win32;

/// Platform-agnostic native window operations.
///
/// All operations take non-owning handles; a backend must make operations
/// on a dead handle fail with [`Error::NativeOp`] (or report it dead via
/// [`is_alive`](SurfaceOps::is_alive)), never crash the process.
pub trait SurfaceOps: Send + Sync {
    /// The window system this backend operates on.
    fn system(&self) -> WindowSystem;

    /// Whether the backend's helper is present on this host.
    fn is_available(&self) -> bool;

    /// Backend name for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Make `child` a child window of `parent`.
    fn reparent(&self, child: RawSurfaceHandle, parent: RawSurfaceHandle) -> Result<()>;

    /// Position and size `child` within its parent's client area.
    fn set_bounds(&self, child: RawSurfaceHandle, bounds: SurfaceBounds) -> Result<()>;

    /// Give keyboard focus to `child`.
    fn focus(&self, child: RawSurfaceHandle) -> Result<()>;

    /// Whether the window behind `child` still exists.
    fn is_alive(&self, child: RawSurfaceHandle) -> bool;
}

impl std::fmt::Debug for dyn SurfaceOps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceOps")
            .field("name", &self.name())
            .field("system", &self.system())
            .finish()
    }
}

/// Reject handles from a different window system than the backend's.
pub(crate) fn check_system(ops: &dyn SurfaceOps, handle: RawSurfaceHandle) -> Result<()> {
    if handle.system != ops.system() {
        return Err(Error::SystemMismatch {
            expected: ops.system(),
            actual: handle.system,
        });
    }
    Ok(())
}

/// Select the native-ops backend per the host's configuration.
///
/// `config.backend` of `"auto"` picks by window system; an explicit
/// backend name is honored or rejected with [`Error::Config`] when it
/// cannot run on this platform. Wayland has no cross-process reparenting
/// protocol, and macOS forbids reparenting NSViews across processes; auto
/// selection reports both as [`Error::Unsupported`].
pub fn detect_backend(platform: Platform, config: &EmbedConfig) -> Result<Box<dyn SurfaceOps>> {
    match config.backend.as_str() {
        "auto" => auto_backend(platform.window_system()),
        "xdotool" => xdotool_backend(),
        "powershell" => powershell_backend(),
        other => Err(Error::Config(format!("unknown backend '{other}'"))),
    }
}

fn auto_backend(system: WindowSystem) -> Result<Box<dyn SurfaceOps>> {
    match system {
        #[cfg(target_os = "linux")]
        WindowSystem::X11 => xdotool_backend(),

        #[cfg(target_os = "windows")]
        WindowSystem::Win32 => powershell_backend(),

        other => Err(Error::Unsupported(other)),
    }
}

#[cfg(target_os = "linux")]
fn xdotool_backend() -> Result<Box<dyn SurfaceOps>> {
    let ops = x11::XdotoolOps::new();
    if !ops.is_available() {
        return Err(Error::HelperMissing("xdotool".to_string()));
    }
    Ok(Box::new(ops))
}

#[cfg(not(target_os = "linux"))]
fn xdotool_backend() -> Result<Box<dyn SurfaceOps>> {
    Err(Error::Config(
        "backend 'xdotool' requires an X11 host".to_string(),
    ))
}

#[cfg(target_os = "windows")]
fn powershell_backend() -> Result<Box<dyn SurfaceOps>> {
    Ok(Box::new(win32::PowerShellOps::new()))
}

#[cfg(not(target_os = "windows"))]
fn powershell_backend() -> Result<Box<dyn SurfaceOps>> {
    Err(Error::Config(
        "backend 'powershell' requires a Windows host".to_string(),
    ))
}
