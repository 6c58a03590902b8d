//! Geometric primitives and the viewport fitter.

use bytemuck::{Pod, Zeroable};
use glam::Vec2 as GlamVec2;
use serde::{Deserialize, Serialize};

/// 2D vector.
pub type Vec2 = GlamVec2;

/// Axis-aligned rectangle in display-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Minimum corner (top-left).
    #[inline]
    pub fn min(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Maximum corner (bottom-right).
    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Center point.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Size as a vector.
    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Check if `other` lies entirely within this rectangle.
    pub fn encloses(self, other: Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width + f32::EPSILON * self.width.abs()
            && other.y + other.height <= self.y + self.height + f32::EPSILON * self.height.abs()
    }
}

/// Fit a source image of `source_width` × `source_height` into `display`,
/// preserving the source aspect ratio.
///
/// A wider source fills the display width and is pillarboxed (centered
/// vertically); a taller source fills the display height and is letterboxed
/// (centered horizontally). Matching aspects return `display` exactly. Any
/// non-positive dimension short-circuits to the full display rect, so no
/// division by zero can occur.
pub fn fit_viewport(display: Rect, source_width: f32, source_height: f32) -> Rect {
    if display.width <= 0.0 || display.height <= 0.0 || source_width <= 0.0 || source_height <= 0.0
    {
        return display;
    }

    let display_aspect = display.width / display.height;
    let source_aspect = source_width / source_height;

    if source_aspect == display_aspect {
        return display;
    }

    if source_aspect > display_aspect {
        // Source is wider: full width, reduced height.
        let height = display.height * display_aspect / source_aspect;
        Rect::new(
            display.x,
            display.y + (display.height - height) * 0.5,
            display.width,
            height,
        )
    } else {
        // Source is taller: full height, reduced width.
        let width = display.width * source_aspect / display_aspect;
        Rect::new(
            display.x + (display.width - width) * 0.5,
            display.y,
            width,
            display.height,
        )
    }
}
