//! A floating window manager for terminal dashboards.
//!
//! State lives in an abstract pixel space and is mapped onto the terminal
//! cell grid at render time, so geometry rules (minimum sizes, clamping,
//! resize anchoring) hold independently of the font cell the terminal
//! happens to use.
//!
//! The crate splits into:
//! - [`window`]: the data model (records, registry), the manager that owns
//!   all window state, gesture sessions and frame chrome.
//! - [`geometry`]: pixel rects, clamping and cell metrics.
//! - [`shell`]: event routing and desktop painting.
//! - [`taskbar`]: the bottom launcher bar.
//! - [`event_loop`]: the synchronous input pump.

pub mod event_loop;
pub mod geometry;
pub mod shell;
pub mod taskbar;
pub mod tracing_sub;
pub mod window;

pub use shell::Shell;
pub use window::{
    WindowContent, WindowDefinition, WindowId, WindowManager, WindowRegistry,
};
