//! Window chrome: title bar, control buttons and the eight resize
//! hit-regions, plus the terminal renderer for it all.
//!
//! The frame owns no geometry. It is computed fresh from a [`WindowRecord`]
//! every time it is needed, and translates raw pointer coordinates into
//! semantic intents for the shell. Minimized records never get a frame.

use ratatui::Frame;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Clear;

use super::session::ResizeEdge;
use super::{WindowId, WindowRecord};
use crate::geometry::{CellMetrics, PxRect, Viewport};

/// Title bar height in pixels (two terminal rows at default metrics: border
/// plus header).
pub const TITLE_BAR_PX: u16 = 32;
/// Thickness of the edge/corner resize hit-regions, in pixels.
pub const HANDLE_PX: u16 = 8;
/// Width of one title-bar button hit-region, in pixels.
pub const BUTTON_PX: u16 = 16;

/// Semantic intent reported by a pointer-down inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameIntent {
    DragStart,
    ResizeStart(ResizeEdge),
    Minimize,
    Maximize,
    Lock,
    Close,
    Focus,
}

/// Hit-regions for one window, derived from its record and the viewport.
#[derive(Debug, Clone)]
pub struct FrameLayout {
    pub id: WindowId,
    rect: PxRect,
    title_bar: PxRect,
    buttons: Vec<(FrameIntent, PxRect)>,
    handles: Vec<(ResizeEdge, PxRect)>,
    draggable: bool,
}

impl FrameLayout {
    pub fn new(record: &WindowRecord, viewport: Viewport) -> Self {
        let rect = record.display_rect(viewport);
        let title_bar = PxRect::new(rect.x, rect.y, rect.width, TITLE_BAR_PX.min(rect.height));
        let buttons = button_rects(record, title_bar);
        let handles = if record.can_manipulate() {
            resize_handles(rect)
        } else {
            Vec::new()
        };
        Self {
            id: record.id.clone(),
            rect,
            title_bar,
            buttons,
            handles,
            draggable: record.can_manipulate(),
        }
    }

    pub fn rect(&self) -> PxRect {
        self.rect
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        self.rect.contains(px, py)
    }

    /// Translate a pointer-down into an intent. Buttons win over resize
    /// handles, handles over the title bar; anything else inside the frame
    /// is a plain focus click.
    pub fn hit_test(&self, px: i32, py: i32) -> Option<FrameIntent> {
        if !self.rect.contains(px, py) {
            return None;
        }
        for (intent, rect) in &self.buttons {
            if rect.contains(px, py) {
                return Some(*intent);
            }
        }
        for (edge, rect) in &self.handles {
            if rect.contains(px, py) {
                return Some(FrameIntent::ResizeStart(*edge));
            }
        }
        if self.title_bar.contains(px, py) && self.draggable {
            return Some(FrameIntent::DragStart);
        }
        Some(FrameIntent::Focus)
    }
}

fn button_rects(record: &WindowRecord, title_bar: PxRect) -> Vec<(FrameIntent, PxRect)> {
    // Right-to-left from the frame corner, close always outermost.
    let order: &[FrameIntent] = if record.only_close_button {
        &[FrameIntent::Close]
    } else {
        &[
            FrameIntent::Close,
            FrameIntent::Maximize,
            FrameIntent::Minimize,
            FrameIntent::Lock,
        ]
    };
    let mut right = title_bar.right() - HANDLE_PX as i32;
    let mut buttons = Vec::with_capacity(order.len());
    for &intent in order {
        let left = right - BUTTON_PX as i32;
        if left <= title_bar.x {
            break;
        }
        buttons.push((
            intent,
            PxRect::new(left, title_bar.y, BUTTON_PX, title_bar.height),
        ));
        right = left;
    }
    buttons
}

fn resize_handles(rect: PxRect) -> Vec<(ResizeEdge, PxRect)> {
    let h = HANDLE_PX;
    let hi = h as i32;
    let mut handles = vec![
        (ResizeEdge::TopLeft, PxRect::new(rect.x, rect.y, h, h)),
        (
            ResizeEdge::TopRight,
            PxRect::new(rect.right() - hi, rect.y, h, h),
        ),
        (
            ResizeEdge::BottomLeft,
            PxRect::new(rect.x, rect.bottom() - hi, h, h),
        ),
        (
            ResizeEdge::BottomRight,
            PxRect::new(rect.right() - hi, rect.bottom() - hi, h, h),
        ),
    ];
    if rect.width > 2 * h {
        let span = rect.width - 2 * h;
        handles.push((
            ResizeEdge::Top,
            PxRect::new(rect.x + hi, rect.y, span, h),
        ));
        handles.push((
            ResizeEdge::Bottom,
            PxRect::new(rect.x + hi, rect.bottom() - hi, span, h),
        ));
    }
    if rect.height > 2 * h {
        let span = rect.height - 2 * h;
        handles.push((
            ResizeEdge::Left,
            PxRect::new(rect.x, rect.y + hi, h, span),
        ));
        handles.push((
            ResizeEdge::Right,
            PxRect::new(rect.right() - hi, rect.y + hi, h, span),
        ));
    }
    handles
}

/// Draw one window's chrome into the terminal. Windows are painted back to
/// front, so no occlusion masking is needed here.
pub fn render(
    frame: &mut Frame<'_>,
    layout: &FrameLayout,
    record: &WindowRecord,
    title: &str,
    focused: bool,
    dimmed: bool,
    metrics: CellMetrics,
    area: Rect,
) -> Rect {
    let cells = metrics.to_cells(layout.rect, area);
    if cells.width < 3 || cells.height < 3 {
        return Rect::default();
    }
    frame.render_widget(Clear, cells);

    let header_style = if dimmed {
        Style::default().bg(Color::Black).fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    };
    let border_style = if dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };

    let left = cells.x;
    let top = cells.y;
    let right = cells.x + cells.width - 1;
    let bottom = cells.y + cells.height - 1;
    let buffer = frame.buffer_mut();

    for x in left..=right {
        if let Some(cell) = buffer.cell_mut((x, top)) {
            let glyph = if x == left {
                "┌"
            } else if x == right {
                "┐"
            } else {
                "─"
            };
            cell.set_symbol(glyph);
            cell.set_style(border_style);
        }
        if let Some(cell) = buffer.cell_mut((x, bottom)) {
            let glyph = if x == left {
                "└"
            } else if x == right {
                "┘"
            } else {
                "─"
            };
            cell.set_symbol(glyph);
            cell.set_style(border_style);
        }
    }
    for y in top + 1..bottom {
        for x in [left, right] {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol("│");
                cell.set_style(border_style);
            }
        }
    }

    // Header row sits just under the top border.
    let header_y = top + 1;
    if header_y < bottom {
        for x in left + 1..right {
            if let Some(cell) = buffer.cell_mut((x, header_y)) {
                cell.set_symbol(" ");
                cell.set_style(header_style);
            }
        }
        let header_width = right.saturating_sub(left + 1);
        let title_len = title.chars().count() as u16;
        if title_len < header_width {
            let start_x = left + 1 + (header_width - title_len) / 2;
            for (idx, ch) in title.chars().enumerate() {
                let x = start_x + idx as u16;
                if x < right
                    && let Some(cell) = buffer.cell_mut((x, header_y))
                {
                    cell.set_symbol(&ch.to_string());
                    cell.set_style(header_style);
                }
            }
        }
        for (intent, rect) in &layout.buttons {
            let glyph = match intent {
                FrameIntent::Lock if record.locked => "●",
                FrameIntent::Lock => "○",
                FrameIntent::Minimize => "_",
                FrameIntent::Maximize => "□",
                FrameIntent::Close => "×",
                _ => continue,
            };
            let button_cells = metrics.to_cells(*rect, area);
            if button_cells.width == 0 {
                continue;
            }
            let x = button_cells.x + button_cells.width / 2;
            if x > left
                && x < right
                && let Some(cell) = buffer.cell_mut((x, header_y))
            {
                cell.set_symbol(glyph);
                cell.set_style(header_style);
            }
        }
    }

    // Content area inside the border and header.
    Rect {
        x: cells.x + 1,
        y: cells.y + 2,
        width: cells.width.saturating_sub(2),
        height: cells.height.saturating_sub(3),
    }
}
