//! Centralized actions for the Quickmark overlay.
//!
//! Key bindings resolve to these actions; the controller applies them.

/// An action the overlay can perform in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayAction {
    /// Highlight the previous result.
    CursorUp,
    /// Highlight the next result.
    CursorDown,
    /// Open the highlighted result in the current tab.
    Submit,
    /// Open the highlighted result in a new tab.
    SubmitNewTab,
    /// Hide the overlay.
    Dismiss,
}

impl OverlayAction {
    /// Name used in key bindings.
    pub fn name(self) -> &'static str {
        match self {
            OverlayAction::CursorUp => "cursor_up",
            OverlayAction::CursorDown => "cursor_down",
            OverlayAction::Submit => "submit",
            OverlayAction::SubmitNewTab => "submit_new_tab",
            OverlayAction::Dismiss => "dismiss",
        }
    }
}

/// Look up an action by its binding name.
pub fn action_from_name(name: &str) -> Option<OverlayAction> {
    match name {
        "cursor_up" => Some(OverlayAction::CursorUp),
        "cursor_down" => Some(OverlayAction::CursorDown),
        "submit" => Some(OverlayAction::Submit),
        "submit_new_tab" => Some(OverlayAction::SubmitNewTab),
        "dismiss" => Some(OverlayAction::Dismiss),
        _ => None,
    }
}

/// Get all available action names.
pub fn available_actions() -> &'static [&'static str] {
    &[
        "cursor_up",
        "cursor_down",
        "submit",
        "submit_new_tab",
        "dismiss",
    ]
}
