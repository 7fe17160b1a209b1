//! Desktop shell: translates terminal mouse events into frame intents and
//! drives the manager and gesture controller, then paints the desktop.
//!
//! Pointer-move and pointer-up events reach the gesture controller only
//! while a session is active, mirroring listeners that are attached for the
//! lifetime of one gesture and torn down on pointer-up.

use crossterm::event::{Event, MouseEventKind};
use ratatui::Frame;
use ratatui::prelude::Rect;

use crate::geometry::CellMetrics;
use crate::taskbar::Taskbar;
use crate::window::{FrameIntent, FrameLayout, GestureController, WindowManager, WindowRegistry};

pub struct Shell {
    wm: WindowManager,
    controller: GestureController,
    taskbar: Taskbar,
    metrics: CellMetrics,
    desktop_area: Rect,
}

impl Shell {
    pub fn new(registry: WindowRegistry) -> Self {
        Self {
            wm: WindowManager::new(registry),
            controller: GestureController::new(),
            taskbar: Taskbar::new(),
            metrics: CellMetrics::default(),
            desktop_area: Rect::default(),
        }
    }

    pub fn wm(&self) -> &WindowManager {
        &self.wm
    }

    pub fn wm_mut(&mut self) -> &mut WindowManager {
        &mut self.wm
    }

    /// Handle one input event. Returns true when consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        match mouse.kind {
            MouseEventKind::Down(_) => self.pointer_down(mouse.column, mouse.row),
            MouseEventKind::Drag(_) => {
                if !self.controller.is_active() {
                    return false;
                }
                let (px, py) = self.pointer_px(mouse.column, mouse.row);
                let viewport = self.metrics.viewport(self.desktop_area);
                self.controller.pointer_move(&mut self.wm, px, py, viewport);
                true
            }
            MouseEventKind::Up(_) => {
                if !self.controller.is_active() {
                    return false;
                }
                self.controller.pointer_up();
                true
            }
            _ => false,
        }
    }

    fn pointer_px(&self, column: u16, row: u16) -> (i32, i32) {
        self.metrics.pointer_px(
            column.saturating_sub(self.desktop_area.x),
            row.saturating_sub(self.desktop_area.y),
        )
    }

    fn pointer_down(&mut self, column: u16, row: u16) -> bool {
        if self.taskbar.contains(column, row) {
            if let Some(id) = self.taskbar.hit_test(column, row).cloned() {
                self.wm.toggle(&id);
            }
            return true;
        }

        let (px, py) = self.pointer_px(column, row);
        let viewport = self.metrics.viewport(self.desktop_area);
        let Some(record) = self.wm.topmost_at(px, py, viewport) else {
            return false;
        };
        // Focus mode makes every sibling window inert: their frames swallow
        // clicks without reacting.
        if self.wm.focus_mode_active() && !record.focus_mode {
            return true;
        }
        let layout = FrameLayout::new(record, viewport);
        let id = record.id.clone();
        match layout.hit_test(px, py) {
            Some(FrameIntent::DragStart) => {
                self.controller.begin_drag(&mut self.wm, &id, px, py);
            }
            Some(FrameIntent::ResizeStart(edge)) => {
                self.controller.begin_resize(&mut self.wm, &id, edge, px, py);
            }
            Some(FrameIntent::Minimize) => {
                self.wm.focus(&id);
                self.wm.minimize(&id);
            }
            Some(FrameIntent::Maximize) => {
                self.wm.focus(&id);
                self.wm.toggle_maximize(&id);
            }
            Some(FrameIntent::Lock) => {
                self.wm.focus(&id);
                self.wm.toggle_lock(&id);
            }
            Some(FrameIntent::Close) => {
                self.wm.close(&id);
            }
            Some(FrameIntent::Focus) => {
                self.wm.focus(&id);
            }
            None => return false,
        }
        true
    }

    /// Paint the desktop back to front, then the taskbar on top.
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        self.desktop_area = self.taskbar.split_area(frame.area());
        let viewport = self.metrics.viewport(self.desktop_area);
        let focus_mode = self.wm.focus_mode_active();
        let top = self.wm.top_window().map(|w| w.id.clone());
        let records: Vec<_> = self
            .wm
            .visible_windows_by_z()
            .into_iter()
            .cloned()
            .collect();
        for record in records {
            let layout = FrameLayout::new(&record, viewport);
            let dimmed = focus_mode && !record.focus_mode;
            let focused = !dimmed && top.as_ref() == Some(&record.id);
            let title = self
                .wm
                .registry()
                .get(&record.id)
                .map(|def| def.title.clone())
                .unwrap_or_else(|| record.id.to_string());
            let content_area = crate::window::frame::render(
                frame,
                &layout,
                &record,
                &title,
                focused,
                dimmed,
                self.metrics,
                self.desktop_area,
            );
            self.wm.render_content(&record.id, frame, content_area, focused);
        }
        self.taskbar.render(frame, &self.wm);
    }
}
