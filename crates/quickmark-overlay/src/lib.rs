//! Quick-open overlay for the Quickmark bookmark palette.
//!
//! This crate provides the overlay side of the palette:
//! - OverlayController, the per-page event loop
//! - Visibility, query and selection state
//! - Debounced search dispatch
//! - The message bridge to the host
//! - Pure result rendering and the Surface it is drawn on
//! - Key bindings

pub mod actions;
pub mod bridge;
pub mod controller;
pub mod debounce;
pub mod keymap;
pub mod model;
pub mod render;
pub mod surface;

// Re-export commonly used types
pub use actions::OverlayAction;
pub use bridge::{Bridge, HostBridge};
pub use controller::{ControllerEvent, OverlayController};
pub use debounce::Debouncer;
pub use keymap::{normalize_keystroke, Key, KeyEvent, Keymap, Modifiers};
pub use model::{HideReason, OverlayState, Selection, Visibility};
pub use render::{render_results, ResultRow, Row};
pub use surface::{format_rows, Surface, TerminalSurface};
