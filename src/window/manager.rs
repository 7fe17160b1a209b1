//! The desktop window manager: sole owner of the [`WindowRecord`] collection.
//!
//! Every operation is a no-op on an unknown id. That tolerates races between
//! a closing window and pointer events still queued for it, so callers never
//! need a cancellation path.

use std::collections::BTreeMap;

use ratatui::Frame;
use ratatui::prelude::Rect;

use super::{WindowContent, WindowId, WindowRecord, WindowRegistry};
use crate::geometry::{PxRect, Viewport};

/// Origin of the first cascaded window, in pixels.
pub const CASCADE_BASE_X: i32 = 60;
pub const CASCADE_BASE_Y: i32 = 40;
/// Offset applied per already-open window so new windows do not overlap
/// exactly.
pub const CASCADE_STEP: i32 = 30;

pub struct WindowManager {
    registry: WindowRegistry,
    windows: BTreeMap<WindowId, WindowRecord>,
    contents: BTreeMap<WindowId, Box<dyn WindowContent>>,
    // Monotonic; never reset or renumbered, so the most recently focused
    // window always holds the strictly largest z_index.
    z_counter: u64,
}

impl WindowManager {
    pub fn new(registry: WindowRegistry) -> Self {
        Self {
            registry,
            windows: BTreeMap::new(),
            contents: BTreeMap::new(),
            z_counter: 1,
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn record(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.get(id)
    }

    /// True when a record exists, minimized or not.
    pub fn exists(&self, id: &WindowId) -> bool {
        self.windows.contains_key(id)
    }

    /// True when a record exists and is not minimized.
    pub fn is_open(&self, id: &WindowId) -> bool {
        self.windows.get(id).is_some_and(|w| !w.minimized)
    }

    /// All records, minimized included, in ascending z order.
    pub fn windows_by_z(&self) -> Vec<&WindowRecord> {
        let mut records: Vec<&WindowRecord> = self.windows.values().collect();
        records.sort_by_key(|w| w.z_index);
        records
    }

    /// Render order: non-minimized records, back to front.
    pub fn visible_windows_by_z(&self) -> Vec<&WindowRecord> {
        let mut records: Vec<&WindowRecord> =
            self.windows.values().filter(|w| !w.minimized).collect();
        records.sort_by_key(|w| w.z_index);
        records
    }

    /// The visible window holding the highest z index.
    pub fn top_window(&self) -> Option<&WindowRecord> {
        self.windows
            .values()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
    }

    /// Topmost visible window whose display rect contains the point.
    pub fn topmost_at(&self, px: i32, py: i32, viewport: Viewport) -> Option<&WindowRecord> {
        self.visible_windows_by_z()
            .into_iter()
            .rev()
            .find(|w| w.display_rect(viewport).contains(px, py))
    }

    /// Taskbar semantics: restore a minimized window, minimize an open one,
    /// open a fresh record otherwise.
    ///
    /// The focus-mode window is exempt from the minimize arm: toggling it
    /// while open re-focuses it instead, so the taskbar cannot silently leave
    /// focus mode. Its own minimize button still works.
    pub fn toggle(&mut self, id: &WindowId) {
        match self.windows.get(id) {
            Some(w) if w.minimized => self.restore(id),
            Some(w) if w.focus_mode => self.focus(id),
            Some(_) => self.minimize(id),
            None => self.open_or_restore(id),
        }
    }

    /// Open a fresh record from the definition, or restore-and-focus an
    /// existing one. Unknown definition ids are ignored.
    pub fn open_or_restore(&mut self, id: &WindowId) {
        if self.windows.contains_key(id) {
            self.restore(id);
            return;
        }
        let n = self.windows.len() as i32;
        let z = self.z_counter;
        let Some(def) = self.registry.get(id) else {
            tracing::debug!(window = %id, "open requested for unknown definition");
            return;
        };
        let record = if def.focus_mode {
            // Focus mode overrides cascading defaults: origin-anchored,
            // maximized, never draggable or resizable.
            let mut record = WindowRecord::from_definition(def, 0, 0, z);
            record.maximized = true;
            record
        } else {
            let x = CASCADE_BASE_X + n * CASCADE_STEP;
            let y = CASCADE_BASE_Y + n * CASCADE_STEP;
            WindowRecord::from_definition(def, x, y, z)
        };
        let content = def.mount();
        self.z_counter += 1;
        tracing::debug!(window = %id, x = record.x, y = record.y, z = record.z_index, "opened window");
        self.contents.insert(id.clone(), content);
        self.windows.insert(id.clone(), record);
    }

    /// Bump the window to the top of the stack. No-op while minimized so a
    /// stale click on a just-minimized window cannot resurface it.
    pub fn focus(&mut self, id: &WindowId) {
        let z = self.z_counter;
        if let Some(w) = self.windows.get_mut(id)
            && !w.minimized
        {
            w.z_index = z;
            self.z_counter += 1;
        }
    }

    /// Replace the position unconditionally; clamping happens upstream in the
    /// gesture controller.
    pub fn move_to(&mut self, id: &WindowId, x: i32, y: i32) {
        if let Some(w) = self.windows.get_mut(id) {
            w.x = x;
            w.y = y;
        }
    }

    /// Replace the size unconditionally; clamping happens upstream.
    pub fn resize_to(&mut self, id: &WindowId, width: u16, height: u16) {
        if let Some(w) = self.windows.get_mut(id) {
            w.width = width;
            w.height = height;
        }
    }

    /// Combined position + size commit so a renderer never observes a torn
    /// intermediate frame during a resize gesture.
    pub fn set_geometry(&mut self, id: &WindowId, rect: PxRect) {
        if let Some(w) = self.windows.get_mut(id) {
            w.x = rect.x;
            w.y = rect.y;
            w.width = rect.width;
            w.height = rect.height;
        }
    }

    /// Hide the window, leaving geometry and z index untouched so restoring
    /// returns it exactly where it was.
    pub fn minimize(&mut self, id: &WindowId) {
        if let Some(w) = self.windows.get_mut(id) {
            w.minimized = true;
            tracing::debug!(window = %id, "minimized");
        }
    }

    pub fn restore(&mut self, id: &WindowId) {
        if let Some(w) = self.windows.get_mut(id) {
            w.minimized = false;
        }
        self.focus(id);
    }

    pub fn toggle_minimize(&mut self, id: &WindowId) {
        match self.windows.get(id) {
            Some(w) if w.minimized => self.restore(id),
            Some(_) => self.minimize(id),
            None => {}
        }
    }

    pub fn toggle_maximize(&mut self, id: &WindowId) {
        if let Some(w) = self.windows.get_mut(id) {
            w.maximized = !w.maximized;
        }
    }

    pub fn toggle_lock(&mut self, id: &WindowId) {
        if let Some(w) = self.windows.get_mut(id) {
            w.locked = !w.locked;
        }
    }

    /// Remove the record and drop its mounted content. Irreversible:
    /// reopening creates a fresh record from the definition defaults.
    pub fn close(&mut self, id: &WindowId) {
        if self.windows.remove(id).is_some() {
            tracing::debug!(window = %id, "closed window");
        }
        self.contents.remove(id);
    }

    /// True iff the focus-mode record exists and is not minimized. While
    /// true, consumers must treat all non-focus windows as inert; the manager
    /// does not hide them.
    pub fn focus_mode_active(&self) -> bool {
        self.windows.values().any(|w| w.focus_mode && !w.minimized)
    }

    /// Render the mounted content for a window into the given cell area.
    pub fn render_content(
        &mut self,
        id: &WindowId,
        frame: &mut Frame<'_>,
        area: Rect,
        focused: bool,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if let Some(content) = self.contents.get_mut(id) {
            content.render(frame, area, focused);
        }
    }
}
