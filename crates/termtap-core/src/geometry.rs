//! Geometry types for surface layout within a host container.

use serde::{Deserialize, Serialize};

/// Pixel-space bounds of the embedded surface, relative to its parent
/// container's client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceBounds {
    /// Horizontal offset from the container's left edge
    pub x: i32,
    /// Vertical offset from the container's top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl SurfaceBounds {
    /// Create new bounds.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds filling a container of the given size, anchored at the origin.
    pub fn fill(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Whether the bounds enclose zero area.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for SurfaceBounds {
    fn default() -> Self {
        // 80x24 cells at a typical 8x16 pixel glyph
        Self::fill(640, 384)
    }
}

impl std::fmt::Display for SurfaceBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
