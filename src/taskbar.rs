//! Bottom launcher bar: one entry per registry definition, doubling as the
//! open/hide toggle for each window.

use ratatui::Frame;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::window::{WindowId, WindowManager};

pub const TASKBAR_HEIGHT: u16 = 1;

/// Hit rects are rebuilt on every render, so stale clicks after a relayout
/// resolve against the latest frame.
#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    hits: Vec<(WindowId, Rect)>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Reserve the bottom row of `area` for the bar; the rest is the desktop.
    pub fn split_area(&mut self, area: Rect) -> Rect {
        let bar_height = TASKBAR_HEIGHT.min(area.height);
        self.area = Rect {
            x: area.x,
            y: area.y + area.height - bar_height,
            width: area.width,
            height: bar_height,
        };
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height - bar_height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.height > 0
            && column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// The definition id under the pointer, if any. Entries for non-focus
    /// windows report no hit while focus mode is active.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<&WindowId> {
        self.hits
            .iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(id, _)| id)
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, wm: &WindowManager) {
        self.hits.clear();
        if self.area.height == 0 {
            return;
        }
        let focus_mode = wm.focus_mode_active();
        let buffer = frame.buffer_mut();
        let bar_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in self.area.x..self.area.x + self.area.width {
            if let Some(cell) = buffer.cell_mut((x, self.area.y)) {
                cell.set_symbol(" ");
                cell.set_style(bar_style);
            }
        }

        let mut x = self.area.x + 1;
        for def in wm.registry().definitions() {
            let open = wm.is_open(&def.id);
            let minimized = wm.exists(&def.id) && !open;
            let disabled = focus_mode && !def.focus_mode;
            let marker = if open {
                "▪"
            } else if minimized {
                "▫"
            } else {
                " "
            };
            let label = format!(" {}{} ", marker, def.title);
            let width = label.chars().count() as u16;
            if x + width >= self.area.x + self.area.width {
                break;
            }
            let style = if disabled {
                Style::default().bg(Color::DarkGray).fg(Color::Black)
            } else if open {
                bar_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else if minimized {
                bar_style.add_modifier(Modifier::DIM)
            } else {
                bar_style
            };
            for (idx, ch) in label.chars().enumerate() {
                if let Some(cell) = buffer.cell_mut((x + idx as u16, self.area.y)) {
                    cell.set_symbol(&ch.to_string());
                    cell.set_style(style);
                }
            }
            if !disabled {
                self.hits.push((
                    def.id.clone(),
                    Rect {
                        x,
                        y: self.area.y,
                        width,
                        height: 1,
                    },
                ));
            }
            x += width + 1;
        }
    }
}
