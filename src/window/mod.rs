//! Window data model: identifiers, records, definitions and the registry.

pub mod frame;
pub mod manager;
pub mod session;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use ratatui::Frame;
use ratatui::prelude::Rect;
use thiserror::Error;

use crate::geometry::{PxRect, Viewport};

pub use frame::{FrameIntent, FrameLayout};
pub use manager::WindowManager;
pub use session::{DragSession, GestureController, ResizeEdge, ResizeSession};

/// Stable window identifier, unique within a manager, also the key into the
/// definition registry. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(Arc<str>);

impl WindowId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Content hosted inside a window. The manager mounts one instance per open
/// window and never inspects what it renders.
pub trait WindowContent {
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, focused: bool);
}

type ContentBuilder = Box<dyn Fn() -> Box<dyn WindowContent>>;

/// Immutable template used to instantiate a [`WindowRecord`].
pub struct WindowDefinition {
    pub id: WindowId,
    pub title: String,
    pub default_width: u16,
    pub default_height: u16,
    pub disable_drag_resize: bool,
    pub only_close_button: bool,
    pub focus_mode: bool,
    content: ContentBuilder,
}

impl WindowDefinition {
    pub fn new(
        id: impl Into<WindowId>,
        title: impl Into<String>,
        default_width: u16,
        default_height: u16,
        content: ContentBuilder,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            default_width,
            default_height,
            disable_drag_resize: false,
            only_close_button: false,
            focus_mode: false,
            content,
        }
    }

    pub fn with_disable_drag_resize(mut self) -> Self {
        self.disable_drag_resize = true;
        self
    }

    pub fn with_only_close_button(mut self) -> Self {
        self.only_close_button = true;
        self
    }

    /// Mark this definition as the distinguished focus-mode window: it opens
    /// maximized at the origin and disables interaction with its siblings
    /// while open.
    pub fn with_focus_mode(mut self) -> Self {
        self.focus_mode = true;
        self.disable_drag_resize = true;
        self
    }

    pub(crate) fn mount(&self) -> Box<dyn WindowContent> {
        (self.content)()
    }
}

impl fmt::Debug for WindowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("default_width", &self.default_width)
            .field("default_height", &self.default_height)
            .field("disable_drag_resize", &self.disable_drag_resize)
            .field("only_close_button", &self.only_close_button)
            .field("focus_mode", &self.focus_mode)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate window definition id `{0}`")]
    DuplicateId(String),
    #[error("multiple focus-mode definitions: `{first}` and `{second}`")]
    MultipleFocusMode { first: String, second: String },
}

/// Host-supplied list of window definitions. Ids are unique and at most one
/// definition carries the focus-mode flag.
#[derive(Debug)]
pub struct WindowRegistry {
    defs: Vec<WindowDefinition>,
}

impl WindowRegistry {
    pub fn new(defs: Vec<WindowDefinition>) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        let mut focus: Option<&WindowId> = None;
        for def in &defs {
            if !seen.insert(def.id.clone()) {
                return Err(RegistryError::DuplicateId(def.id.to_string()));
            }
            if def.focus_mode {
                if let Some(first) = focus {
                    return Err(RegistryError::MultipleFocusMode {
                        first: first.to_string(),
                        second: def.id.to_string(),
                    });
                }
                focus = Some(&def.id);
            }
        }
        Ok(Self { defs })
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowDefinition> {
        self.defs.iter().find(|def| def.id == *id)
    }

    pub fn definitions(&self) -> &[WindowDefinition] {
        &self.defs
    }

    /// Id of the focus-mode definition, if the registry has one.
    pub fn focus_id(&self) -> Option<&WindowId> {
        self.defs
            .iter()
            .find(|def| def.focus_mode)
            .map(|def| &def.id)
    }
}

/// Authoritative mutable state of one open window.
///
/// Records are owned by the [`WindowManager`] and only mutated through its
/// operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
    /// Strictly highest among open windows for the most recently focused one.
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
    pub locked: bool,
    pub disable_drag_resize: bool,
    pub only_close_button: bool,
    pub focus_mode: bool,
}

impl WindowRecord {
    pub(crate) fn from_definition(def: &WindowDefinition, x: i32, y: i32, z_index: u64) -> Self {
        Self {
            id: def.id.clone(),
            x,
            y,
            width: def.default_width.max(crate::geometry::MIN_WIDTH),
            height: def.default_height.max(crate::geometry::MIN_HEIGHT),
            z_index,
            minimized: false,
            maximized: false,
            locked: false,
            disable_drag_resize: def.disable_drag_resize,
            only_close_button: def.only_close_button,
            focus_mode: def.focus_mode,
        }
    }

    pub fn rect(&self) -> PxRect {
        PxRect::new(self.x, self.y, self.width, self.height)
    }

    /// Rect the window is shown at: stored geometry, or the full viewport
    /// while maximized. Stored geometry survives maximize untouched so
    /// restoring needs no extra state.
    pub fn display_rect(&self, viewport: Viewport) -> PxRect {
        if self.maximized {
            PxRect::new(0, 0, viewport.width, viewport.height)
        } else {
            self.rect()
        }
    }

    /// Whether drag and resize gestures may start on this window.
    pub fn can_manipulate(&self) -> bool {
        !self.locked && !self.disable_drag_resize && !self.maximized
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    struct Blank;

    impl WindowContent for Blank {
        fn render(&mut self, _frame: &mut Frame<'_>, _area: Rect, _focused: bool) {}
    }

    pub(crate) fn definition(id: &str, width: u16, height: u16) -> WindowDefinition {
        WindowDefinition::new(
            id,
            id.to_uppercase(),
            width,
            height,
            Box::new(|| Box::new(Blank)),
        )
    }
}
