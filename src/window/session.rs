//! Per-gesture drag/resize state machine.
//!
//! A gesture session exists only between pointer-down and pointer-up. The
//! shell routes global pointer events here only while a session is active,
//! so the session value's lifetime doubles as the listener subscription.

use super::{WindowId, WindowManager};
use crate::geometry::{MIN_HEIGHT, MIN_WIDTH, PxRect, Viewport, clamp_position};

/// The eight resize hit-regions along a window's edges and corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// Ephemeral state of one title-bar drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub id: WindowId,
    start_px: i32,
    start_py: i32,
    origin_x: i32,
    origin_y: i32,
}

/// Ephemeral state of one edge/corner resize.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    pub id: WindowId,
    edge: ResizeEdge,
    start_px: i32,
    start_py: i32,
    start: PxRect,
}

// Drag and resize are mutually exclusive: one pointer stream cannot mean
// both at once.
#[derive(Debug)]
enum Gesture {
    Drag(DragSession),
    Resize(ResizeSession),
}

/// Converts a stream of pointer events into committed geometry updates,
/// honoring per-window permission flags at transition time.
#[derive(Debug, Default)]
pub struct GestureController {
    active: Option<Gesture>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_window(&self) -> Option<&WindowId> {
        match &self.active {
            Some(Gesture::Drag(d)) => Some(&d.id),
            Some(Gesture::Resize(r)) => Some(&r.id),
            None => None,
        }
    }

    /// Idle -> Dragging. Refused (returns false) for locked, permanently
    /// non-draggable, or maximized windows, so forbidden gestures never
    /// start rather than starting and aborting.
    pub fn begin_drag(&mut self, wm: &mut WindowManager, id: &WindowId, px: i32, py: i32) -> bool {
        let Some(record) = wm.record(id) else {
            return false;
        };
        if !record.can_manipulate() {
            return false;
        }
        let session = DragSession {
            id: id.clone(),
            start_px: px,
            start_py: py,
            origin_x: record.x,
            origin_y: record.y,
        };
        wm.focus(id);
        tracing::trace!(window = %id, "drag start");
        self.active = Some(Gesture::Drag(session));
        true
    }

    /// Idle -> Resizing(edge), gated like [`Self::begin_drag`].
    pub fn begin_resize(
        &mut self,
        wm: &mut WindowManager,
        id: &WindowId,
        edge: ResizeEdge,
        px: i32,
        py: i32,
    ) -> bool {
        let Some(record) = wm.record(id) else {
            return false;
        };
        if !record.can_manipulate() {
            return false;
        }
        let session = ResizeSession {
            id: id.clone(),
            edge,
            start_px: px,
            start_py: py,
            start: record.rect(),
        };
        wm.focus(id);
        tracing::trace!(window = %id, ?edge, "resize start");
        self.active = Some(Gesture::Resize(session));
        true
    }

    /// Pointer-move while a session is active: compute the new geometry and
    /// commit it synchronously so updates apply in arrival order. The commit
    /// is a no-op if the window was closed mid-gesture.
    pub fn pointer_move(&mut self, wm: &mut WindowManager, px: i32, py: i32, viewport: Viewport) {
        match &self.active {
            Some(Gesture::Drag(drag)) => {
                let Some(record) = wm.record(&drag.id) else {
                    return;
                };
                let x = drag.origin_x + (px - drag.start_px);
                let y = drag.origin_y + (py - drag.start_py);
                let (x, y) = clamp_position(x, y, record.width, record.height, viewport);
                let id = drag.id.clone();
                wm.move_to(&id, x, y);
            }
            Some(Gesture::Resize(resize)) => {
                let rect = apply_resize(
                    resize.start,
                    resize.edge,
                    px - resize.start_px,
                    py - resize.start_py,
                    viewport,
                );
                let id = resize.id.clone();
                wm.set_geometry(&id, rect);
            }
            None => {}
        }
    }

    /// Pointer-up: discard the session. Always safe to call, even when the
    /// gesture target disappeared mid-drag.
    pub fn pointer_up(&mut self) {
        self.active = None;
    }
}

/// Apply one resize tick to the gesture-start rect.
///
/// Right/bottom edges grow by the pointer delta, clamped between the minimum
/// size and the viewport edge. Left/top edges shift the origin while shrinking
/// the size; when that would drop below the minimum the axis keeps its
/// gesture-start value for this tick instead of snapping to the floor.
/// Corners combine both axes independently.
pub fn apply_resize(
    start: PxRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    viewport: Viewport,
) -> PxRect {
    let min_w = MIN_WIDTH as i32;
    let min_h = MIN_HEIGHT as i32;
    let mut x = start.x;
    let mut y = start.y;
    let mut width = start.width as i32;
    let mut height = start.height as i32;

    if edge.moves_right() {
        let available = (viewport.width as i32 - x).max(min_w);
        width = (width + dx).clamp(min_w, available);
    } else if edge.moves_left() {
        let shrunk = width - dx;
        if shrunk >= min_w {
            x += dx;
            width = shrunk;
        }
        if x < 0 {
            // Keep the right edge fixed while recovering the origin.
            width += x;
            x = 0;
        }
    }

    if edge.moves_bottom() {
        let available = (viewport.height as i32 - y).max(min_h);
        height = (height + dy).clamp(min_h, available);
    } else if edge.moves_top() {
        let shrunk = height - dy;
        if shrunk >= min_h {
            y += dy;
            height = shrunk;
        }
        if y < 0 {
            height += y;
            y = 0;
        }
    }

    PxRect {
        x,
        y,
        width: width.max(min_w).min(u16::MAX as i32) as u16,
        height: height.max(min_h).min(u16::MAX as i32) as u16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowRegistry;
    use crate::window::test_support::definition;

    const VP: Viewport = Viewport {
        width: 1920,
        height: 1080,
    };

    fn manager() -> WindowManager {
        let registry = WindowRegistry::new(vec![
            definition("tasks", 400, 400),
            definition("calendar", 480, 360),
        ])
        .unwrap();
        WindowManager::new(registry)
    }

    fn id(s: &str) -> WindowId {
        WindowId::new(s)
    }

    #[test]
    fn resize_right_hits_min_floor_exactly() {
        let start = PxRect::new(100, 100, 400, 400);
        let r = apply_resize(start, ResizeEdge::Right, -200, 0, VP);
        assert_eq!(r.width, 320);
        // Further negative delta has no additional effect.
        let r = apply_resize(start, ResizeEdge::Right, -1000, 0, VP);
        assert_eq!(r.width, 320);
        assert_eq!((r.x, r.y, r.height), (100, 100, 400));
    }

    #[test]
    fn resize_right_clamps_to_viewport_edge() {
        let start = PxRect::new(1600, 100, 320, 400);
        let r = apply_resize(start, ResizeEdge::Right, 5000, 0, VP);
        assert_eq!(r.width, 320);
        assert_eq!(r.right(), 1920);
    }

    #[test]
    fn resize_left_shifts_origin_and_freezes_below_min() {
        let start = PxRect::new(500, 100, 400, 400);
        let r = apply_resize(start, ResizeEdge::Left, -60, 0, VP);
        assert_eq!((r.x, r.width), (440, 460));
        let r = apply_resize(start, ResizeEdge::Left, 60, 0, VP);
        assert_eq!((r.x, r.width), (560, 340));
        // 400 - 120 = 280 < MIN_WIDTH: axis frozen at the gesture start.
        let r = apply_resize(start, ResizeEdge::Left, 120, 0, VP);
        assert_eq!((r.x, r.width), (500, 400));
    }

    #[test]
    fn resize_left_past_viewport_keeps_right_edge() {
        let start = PxRect::new(100, 100, 400, 400);
        let r = apply_resize(start, ResizeEdge::Left, -300, 0, VP);
        assert_eq!(r.x, 0);
        assert_eq!(r.right(), 500);
    }

    #[test]
    fn resize_top_family_mirrors_left_semantics() {
        let start = PxRect::new(100, 300, 400, 400);
        let r = apply_resize(start, ResizeEdge::Top, -50, -80, VP);
        // Horizontal axis untouched for a pure top handle.
        assert_eq!((r.x, r.width), (100, 400));
        assert_eq!((r.y, r.height), (220, 480));
        let r = apply_resize(start, ResizeEdge::Top, 0, 250, VP);
        // 400 - 250 = 150 < MIN_HEIGHT: frozen.
        assert_eq!((r.y, r.height), (300, 400));
    }

    #[test]
    fn corner_combines_axes_independently() {
        let start = PxRect::new(200, 200, 400, 400);
        let r = apply_resize(start, ResizeEdge::TopLeft, 30, -40, VP);
        assert_eq!((r.x, r.width), (230, 370));
        assert_eq!((r.y, r.height), (160, 440));
        // One axis frozen, the other still applies.
        let r = apply_resize(start, ResizeEdge::BottomLeft, 200, 50, VP);
        assert_eq!((r.x, r.width), (200, 400));
        assert_eq!(r.height, 450);
    }

    #[test]
    fn min_size_holds_for_every_intermediate_tick() {
        let start = PxRect::new(100, 100, 400, 400);
        for dx in (-1000..1000).step_by(37) {
            for edge in [ResizeEdge::Left, ResizeEdge::Right, ResizeEdge::BottomRight] {
                let r = apply_resize(start, edge, dx, dx / 2, VP);
                assert!(r.width >= MIN_WIDTH, "{edge:?} dx={dx} -> {}", r.width);
                assert!(r.height >= MIN_HEIGHT, "{edge:?} dx={dx} -> {}", r.height);
            }
        }
    }

    #[test]
    fn drag_moves_and_clamps() {
        let mut wm = manager();
        let tasks = id("tasks");
        wm.open_or_restore(&tasks);
        wm.set_geometry(&tasks, PxRect::new(100, 100, 400, 400));
        let mut gc = GestureController::new();
        assert!(gc.begin_drag(&mut wm, &tasks, 150, 120));
        gc.pointer_move(&mut wm, 200, 150, VP);
        let w = wm.record(&tasks).unwrap();
        assert_eq!((w.x, w.y), (150, 130));
        // Pointer flies far off-screen: window pins to the viewport edge.
        gc.pointer_move(&mut wm, 50_000, 50_000, VP);
        let w = wm.record(&tasks).unwrap();
        assert_eq!((w.x, w.y), (1520, 680));
        gc.pointer_up();
        assert!(!gc.is_active());
    }

    #[test]
    fn drag_refused_for_locked_and_maximized() {
        let mut wm = manager();
        let tasks = id("tasks");
        wm.open_or_restore(&tasks);
        wm.toggle_lock(&tasks);
        let mut gc = GestureController::new();
        assert!(!gc.begin_drag(&mut wm, &tasks, 10, 10));
        assert!(!gc.begin_resize(&mut wm, &tasks, ResizeEdge::Right, 10, 10));
        wm.toggle_lock(&tasks);
        wm.toggle_maximize(&tasks);
        assert!(!gc.begin_drag(&mut wm, &tasks, 10, 10));
        assert!(!gc.is_active());
    }

    #[test]
    fn gesture_survives_close_of_target() {
        let mut wm = manager();
        let tasks = id("tasks");
        wm.open_or_restore(&tasks);
        let mut gc = GestureController::new();
        assert!(gc.begin_drag(&mut wm, &tasks, 10, 10));
        wm.close(&tasks);
        // Commits become no-ops; the session still tears down on pointer-up.
        gc.pointer_move(&mut wm, 500, 500, VP);
        assert!(!wm.exists(&tasks));
        gc.pointer_up();
        assert!(!gc.is_active());
    }

    #[test]
    fn resize_commits_are_atomic_per_tick() {
        let mut wm = manager();
        let tasks = id("tasks");
        wm.open_or_restore(&tasks);
        wm.set_geometry(&tasks, PxRect::new(500, 300, 400, 400));
        let mut gc = GestureController::new();
        assert!(gc.begin_resize(&mut wm, &tasks, ResizeEdge::TopLeft, 500, 300));
        gc.pointer_move(&mut wm, 460, 340, VP);
        let w = wm.record(&tasks).unwrap();
        assert_eq!((w.x, w.y, w.width, w.height), (460, 340, 440, 360));
    }
}
