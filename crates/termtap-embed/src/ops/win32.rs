//! Win32 native-ops backend, shelling out to PowerShell user32 interop.
//!
//! Each operation runs a small `Add-Type` P/Invoke script. Slower than
//! linking user32 directly, but it keeps the crate free of raw FFI and the
//! operations are infrequent (attach, container resize, focus).

use std::process::Command;

use tracing::trace;

use termtap_core::{Error, RawSurfaceHandle, Result, SurfaceBounds, WindowSystem};

use super::{check_system, SurfaceOps};

// SWP_NOZORDER | SWP_SHOWWINDOW
const SET_WINDOW_POS_FLAGS: u32 = 0x0004 | 0x0040;

const USER32_TYPE: &str = r#"
using System;
using System.Runtime.InteropServices;
public static class TermtapUser32 {
    [DllImport("user32.dll", SetLastError = true)]
    public static extern IntPtr SetParent(IntPtr hWndChild, IntPtr hWndNewParent);
    [DllImport("user32.dll", SetLastError = true)]
    public static extern bool SetWindowPos(IntPtr hWnd, IntPtr hWndInsertAfter,
        int X, int Y, int cx, int cy, uint uFlags);
    [DllImport("user32.dll")]
    public static extern IntPtr SetFocus(IntPtr hWnd);
    [DllImport("user32.dll")]
    public static extern bool IsWindow(IntPtr hWnd);
}
"#;

/// Run a PowerShell expression after loading the user32 wrapper type.
///
/// The expression must write `True` on success; anything else is treated
/// as the native operation's own failure report.
fn powershell(expr: &str) -> Result<()> {
    trace!(expr, "powershell user32");
    let script = format!("Add-Type -TypeDefinition @'\n{USER32_TYPE}\n'@; {expr}");
    let output = Command::new("powershell.exe")
        .arg("-NoProfile")
        .arg("-NonInteractive")
        .arg("-Command")
        .arg(&script)
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() || !stdout.trim().ends_with("True") {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::NativeOp(format!(
            "powershell user32 call failed ({}): {} {}",
            output.status,
            stdout.trim(),
            stderr.trim()
        )));
    }
    Ok(())
}

/// Win32 backend driving user32 through PowerShell interop.
#[derive(Debug, Default)]
pub struct PowerShellOps;

impl PowerShellOps {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

impl SurfaceOps for PowerShellOps {
    fn system(&self) -> WindowSystem {
        WindowSystem::Win32
    }

    fn is_available(&self) -> bool {
        Command::new("where")
            .arg("powershell.exe")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "powershell-user32"
    }

    fn reparent(&self, child: RawSurfaceHandle, parent: RawSurfaceHandle) -> Result<()> {
        check_system(self, child)?;
        check_system(self, parent)?;
        powershell(&format!(
            "[TermtapUser32]::SetParent([IntPtr]{}, [IntPtr]{}) -ne [IntPtr]::Zero",
            child.raw, parent.raw
        ))
    }

    fn set_bounds(&self, child: RawSurfaceHandle, bounds: SurfaceBounds) -> Result<()> {
        check_system(self, child)?;
        powershell(&format!(
            "[TermtapUser32]::SetWindowPos([IntPtr]{}, [IntPtr]::Zero, {}, {}, {}, {}, {})",
            child.raw, bounds.x, bounds.y, bounds.width, bounds.height, SET_WINDOW_POS_FLAGS
        ))
    }

    fn focus(&self, child: RawSurfaceHandle) -> Result<()> {
        check_system(self, child)?;
        powershell(&format!(
            "[TermtapUser32]::SetFocus([IntPtr]{}) -ne [IntPtr]::Zero",
            child.raw
        ))
    }

    fn is_alive(&self, child: RawSurfaceHandle) -> bool {
        if child.system != WindowSystem::Win32 {
            return false;
        }
        powershell(&format!("[TermtapUser32]::IsWindow([IntPtr]{})", child.raw)).is_ok()
    }
}
