//! X11 native-ops backend, shelling out to `xdotool`.
//!
//! `xdotool windowreparent` performs the actual `XReparentWindow` call;
//! move/size/activate cover the remaining protocol operations. Helper
//! failures are reported verbatim through [`Error::NativeOp`], never
//! wrapped away.

use std::process::Command;

use tracing::trace;

use termtap_core::{Error, RawSurfaceHandle, Result, SurfaceBounds, WindowSystem};

use super::{check_system, SurfaceOps};

/// Check if a command exists in PATH.
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run one xdotool subcommand, mapping a non-zero exit to `NativeOp`.
fn xdotool(args: &[String]) -> Result<()> {
    trace!(?args, "xdotool");
    let output = Command::new("xdotool").args(args).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::NativeOp(format!(
            "xdotool {} failed ({}): {}",
            args.first().map(String::as_str).unwrap_or(""),
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}

/// X11 backend driving `xdotool`.
#[derive(Debug, Default)]
pub struct XdotoolOps;

impl XdotoolOps {
    /// Create the backend. Availability is checked separately.
    pub fn new() -> Self {
        Self
    }
}

impl SurfaceOps for XdotoolOps {
    fn system(&self) -> WindowSystem {
        WindowSystem::X11
    }

    fn is_available(&self) -> bool {
        command_exists("xdotool")
    }

    fn name(&self) -> &'static str {
        "xdotool"
    }

    fn reparent(&self, child: RawSurfaceHandle, parent: RawSurfaceHandle) -> Result<()> {
        check_system(self, child)?;
        check_system(self, parent)?;
        xdotool(&[
            "windowreparent".to_string(),
            child.raw.to_string(),
            parent.raw.to_string(),
        ])
    }

    fn set_bounds(&self, child: RawSurfaceHandle, bounds: SurfaceBounds) -> Result<()> {
        check_system(self, child)?;
        xdotool(&[
            "windowmove".to_string(),
            child.raw.to_string(),
            bounds.x.to_string(),
            bounds.y.to_string(),
        ])?;
        xdotool(&[
            "windowsize".to_string(),
            child.raw.to_string(),
            bounds.width.to_string(),
            bounds.height.to_string(),
        ])
    }

    fn focus(&self, child: RawSurfaceHandle) -> Result<()> {
        check_system(self, child)?;
        xdotool(&["windowfocus".to_string(), child.raw.to_string()])
    }

    fn is_alive(&self, child: RawSurfaceHandle) -> bool {
        if child.system != WindowSystem::X11 {
            return false;
        }
        // getwindowgeometry exits non-zero for unknown window ids
        xdotool(&["getwindowgeometry".to_string(), child.raw.to_string()]).is_ok()
    }
}
