//! Pixel-space geometry shared by the window manager, gesture controller and
//! frame chrome, plus the metrics that map pixels onto terminal cells.

use ratatui::prelude::Rect;

/// Smallest width a window may be resized to, in pixels.
pub const MIN_WIDTH: u16 = 320;
/// Smallest height a window may be resized to, in pixels.
pub const MIN_HEIGHT: u16 = 200;

/// Signed rectangle origin with unsigned size, in pixel space.
///
/// The origin is signed so gesture math can pass through negative
/// intermediates before clamping; committed geometry always lands in
/// `[0, viewport)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PxRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl PxRect {
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Host-provided viewport dimensions, read fresh at every clamp computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Clamp a window origin so the full `width x height` rectangle stays inside
/// the viewport. Oversized windows pin to the origin.
pub fn clamp_position(x: i32, y: i32, width: u16, height: u16, viewport: Viewport) -> (i32, i32) {
    let max_x = (viewport.width as i32 - width as i32).max(0);
    let max_y = (viewport.height as i32 - height as i32).max(0);
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

/// Clamp a whole rectangle: size to the minimum floors and the viewport, then
/// origin so the rect stays on-screen.
pub fn clamp_rect(rect: PxRect, viewport: Viewport) -> PxRect {
    let width = rect.width.max(MIN_WIDTH).min(viewport.width.max(MIN_WIDTH));
    let height = rect
        .height
        .max(MIN_HEIGHT)
        .min(viewport.height.max(MIN_HEIGHT));
    let (x, y) = clamp_position(rect.x, rect.y, width, height, viewport);
    PxRect {
        x,
        y,
        width,
        height,
    }
}

/// Conversion between the abstract pixel space the manager runs in and the
/// terminal cell grid the renderer draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub px_per_col: u16,
    pub px_per_row: u16,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            px_per_col: 8,
            px_per_row: 16,
        }
    }
}

impl CellMetrics {
    /// Pixel coordinates for a pointer event in the given cell, taken at the
    /// cell center so hits land inside the cell's pixel span.
    pub fn pointer_px(&self, column: u16, row: u16) -> (i32, i32) {
        (
            column as i32 * self.px_per_col as i32 + self.px_per_col as i32 / 2,
            row as i32 * self.px_per_row as i32 + self.px_per_row as i32 / 2,
        )
    }

    /// Viewport covering a cell area.
    pub fn viewport(&self, area: Rect) -> Viewport {
        Viewport {
            width: area.width.saturating_mul(self.px_per_col),
            height: area.height.saturating_mul(self.px_per_row),
        }
    }

    /// Convert a pixel rect to the cell rect that covers it, offset into the
    /// given cell area. Off-screen pixels clip to the area edge.
    pub fn to_cells(&self, rect: PxRect, area: Rect) -> Rect {
        let ppc = self.px_per_col.max(1) as i32;
        let ppr = self.px_per_row.max(1) as i32;
        let left = (rect.x.max(0) / ppc) as u16;
        let top = (rect.y.max(0) / ppr) as u16;
        let right = ((rect.right().max(0) + ppc - 1) / ppc) as u16;
        let bottom = ((rect.bottom().max(0) + ppr - 1) / ppr) as u16;
        let left = left.min(area.width);
        let top = top.min(area.height);
        let right = right.min(area.width);
        let bottom = bottom.min(area.height);
        Rect {
            x: area.x + left,
            y: area.y + top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }
}
