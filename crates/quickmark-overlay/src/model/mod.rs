//! State model for the Quickmark overlay.
//!
//! This module contains the visibility state machine and the selection model.
//! All types are surface-independent for testability.

mod selection;
mod state;

pub use selection::Selection;
pub use state::{HideReason, OverlayState, Visibility};
