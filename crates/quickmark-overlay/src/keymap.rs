//! Key events and the overlay keymap.
//!
//! ## Keystroke Strings
//!
//! Bindings are written as `modifier+...+key`, e.g. `"ctrl+enter"` or
//! `"cmd-enter"`. They are normalized to lowercase with modifiers in a fixed
//! order (`ctrl`, `alt`, `shift`, `cmd`), so `"Enter+Ctrl"` and
//! `"ctrl-enter"` name the same binding.
//!
//! Later bindings for the same keystroke replace earlier ones. Keys with no
//! binding (printable characters) are left to the search field.

use std::collections::HashMap;

use crate::actions::{action_from_name, available_actions, OverlayAction};

// =============================================================================
// Key Events
// =============================================================================

/// A physical key, as reported by the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowUp,
    ArrowDown,
    Enter,
    Char(char),
    Other(String),
}

impl Key {
    fn name(&self) -> String {
        match self {
            Key::Escape => "escape".to_string(),
            Key::ArrowUp => "up".to_string(),
            Key::ArrowDown => "down".to_string(),
            Key::Enter => "enter".to_string(),
            Key::Char(c) => c.to_lowercase().collect(),
            Key::Other(name) => canonical_key(&name.to_lowercase()).to_string(),
        }
    }
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Command on macOS, Super/Windows elsewhere.
    pub cmd: bool,
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_cmd(mut self) -> Self {
        self.modifiers.cmd = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Canonical keystroke string for this event.
    pub fn keystroke(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(5);
        let m = self.modifiers;
        for (held, name) in [
            (m.ctrl, "ctrl"),
            (m.alt, "alt"),
            (m.shift, "shift"),
            (m.cmd, "cmd"),
        ] {
            if held {
                parts.push(name.to_string());
            }
        }
        parts.push(self.key.name());
        parts.join("+")
    }
}

// =============================================================================
// Keystroke Parsing
// =============================================================================

fn canonical_modifier(part: &str) -> Option<&'static str> {
    match part {
        "ctrl" | "control" => Some("ctrl"),
        "alt" | "option" | "opt" => Some("alt"),
        "shift" => Some("shift"),
        "cmd" | "command" | "meta" | "super" | "win" => Some("cmd"),
        _ => None,
    }
}

fn canonical_key(part: &str) -> &str {
    match part {
        "esc" => "escape",
        "return" => "enter",
        "arrowup" => "up",
        "arrowdown" => "down",
        other => other,
    }
}

/// Normalize a user-written keystroke.
///
/// Returns `None` for strings with no key or more than one non-modifier key.
pub fn normalize_keystroke(s: &str) -> Option<String> {
    let lowered = s.trim().to_lowercase();
    let mut modifiers = [false; 4];
    let mut key: Option<&str> = None;

    for part in lowered.split(['+', '-']).filter(|p| !p.is_empty()) {
        match canonical_modifier(part) {
            Some("ctrl") => modifiers[0] = true,
            Some("alt") => modifiers[1] = true,
            Some("shift") => modifiers[2] = true,
            Some(_) => modifiers[3] = true,
            None if key.is_none() => key = Some(canonical_key(part)),
            None => return None,
        }
    }

    let key = key?;
    let mut parts: Vec<&str> = ["ctrl", "alt", "shift", "cmd"]
        .iter()
        .zip(modifiers)
        .filter_map(|(name, held)| held.then_some(*name))
        .collect();
    parts.push(key);
    Some(parts.join("+"))
}

// =============================================================================
// Keymap
// =============================================================================

/// Action name that removes a binding.
pub const UNBIND: &str = "none";

/// Keystroke-to-action bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, OverlayAction>,
}

impl Keymap {
    /// A keymap with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to the action called `action`.
    ///
    /// Returns false (and binds nothing) for an unknown action or an
    /// unparseable keystroke.
    pub fn set(&mut self, key: &str, action: &str) -> bool {
        let Some(action) = action_from_name(action) else {
            tracing::warn!(
                "Unknown action: {} (available: {})",
                action,
                available_actions().join(", ")
            );
            return false;
        };
        let Some(keystroke) = normalize_keystroke(key) else {
            tracing::warn!("Invalid keystroke: '{}'", key);
            return false;
        };
        tracing::debug!("Registered binding: {} -> {}", keystroke, action.name());
        self.bindings.insert(keystroke, action);
        true
    }

    /// Remove the binding for `key`. Returns whether one existed.
    pub fn del(&mut self, key: &str) -> bool {
        normalize_keystroke(key)
            .and_then(|k| self.bindings.remove(&k))
            .is_some()
    }

    /// Apply user bindings on top of the current ones.
    ///
    /// An action of `"none"` removes the binding. Returns how many entries
    /// were applied.
    pub fn apply_overrides<'a, I>(&mut self, bindings: I) -> usize
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut applied = 0;
        for (key, action) in bindings {
            let ok = if action == UNBIND {
                self.del(key)
            } else {
                self.set(key, action)
            };
            if ok {
                applied += 1;
            } else {
                tracing::warn!("Ignoring key binding '{}' = '{}'", key, action);
            }
        }
        applied
    }

    /// Action bound to this key press, if any.
    pub fn resolve(&self, event: &KeyEvent) -> Option<OverlayAction> {
        self.bindings.get(&event.keystroke()).copied()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

impl Default for Keymap {
    /// The overlay's standard bindings.
    fn default() -> Self {
        let mut keymap = Self::empty();
        for (key, action) in [
            ("escape", "dismiss"),
            ("down", "cursor_down"),
            ("up", "cursor_up"),
            ("enter", "submit"),
            ("ctrl+enter", "submit_new_tab"),
            ("cmd+enter", "submit_new_tab"),
        ] {
            keymap.set(key, action);
        }
        keymap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_normalize_keystroke() {
        assert_eq!(normalize_keystroke("ctrl+enter").as_deref(), Some("ctrl+enter"));
        assert_eq!(normalize_keystroke("Enter+Ctrl").as_deref(), Some("ctrl+enter"));
        assert_eq!(normalize_keystroke("cmd-shift-k").as_deref(), Some("shift+cmd+k"));
        assert_eq!(normalize_keystroke("Meta+Return").as_deref(), Some("cmd+enter"));
        assert_eq!(normalize_keystroke("esc").as_deref(), Some("escape"));
        assert_eq!(normalize_keystroke("ctrl"), None);
        assert_eq!(normalize_keystroke("a+b"), None);
    }

    #[test]
    fn test_event_keystroke() {
        assert_eq!(KeyEvent::new(Key::Enter).keystroke(), "enter");
        assert_eq!(KeyEvent::new(Key::Enter).with_cmd().keystroke(), "cmd+enter");
        assert_eq!(
            KeyEvent::new(Key::Char('K')).with_shift().with_ctrl().keystroke(),
            "ctrl+shift+k"
        );
        assert_eq!(KeyEvent::new(Key::Other("ArrowDown".into())).keystroke(), "down");
    }

    #[test]
    fn test_default_bindings() {
        let keymap = Keymap::default();
        assert_eq!(keymap.binding_count(), 6);

        let resolve = |event: KeyEvent| keymap.resolve(&event);
        assert_eq!(resolve(KeyEvent::new(Key::Escape)), Some(OverlayAction::Dismiss));
        assert_eq!(resolve(KeyEvent::new(Key::ArrowDown)), Some(OverlayAction::CursorDown));
        assert_eq!(resolve(KeyEvent::new(Key::ArrowUp)), Some(OverlayAction::CursorUp));
        assert_eq!(resolve(KeyEvent::new(Key::Enter)), Some(OverlayAction::Submit));
        assert_eq!(
            resolve(KeyEvent::new(Key::Enter).with_ctrl()),
            Some(OverlayAction::SubmitNewTab)
        );
        assert_eq!(
            resolve(KeyEvent::new(Key::Enter).with_cmd()),
            Some(OverlayAction::SubmitNewTab)
        );
        // Printable input belongs to the search field.
        assert_eq!(resolve(KeyEvent::new(Key::Char('b'))), None);
    }

    #[test]
    fn test_later_binding_wins() {
        let mut keymap = Keymap::default();
        assert!(keymap.set("Ctrl-Enter", "submit"));
        assert_eq!(
            keymap.resolve(&KeyEvent::new(Key::Enter).with_ctrl()),
            Some(OverlayAction::Submit)
        );
        assert_eq!(keymap.binding_count(), 6);
    }

    #[test]
    fn test_apply_overrides() {
        let overrides: BTreeMap<String, String> = [
            ("ctrl+j", "cursor_down"),
            ("cmd+enter", "none"),
            ("ctrl+k", "fly_away"),
        ]
        .into_iter()
        .map(|(k, a)| (k.to_string(), a.to_string()))
        .collect();

        let mut keymap = Keymap::default();
        assert_eq!(keymap.apply_overrides(&overrides), 2);
        assert_eq!(keymap.binding_count(), 6);
        assert_eq!(
            keymap.resolve(&KeyEvent::new(Key::Char('j')).with_ctrl()),
            Some(OverlayAction::CursorDown)
        );
        assert_eq!(keymap.resolve(&KeyEvent::new(Key::Enter).with_cmd()), None);
        assert_eq!(keymap.resolve(&KeyEvent::new(Key::Char('k')).with_ctrl()), None);
    }

    #[test]
    fn test_set_and_del() {
        let mut keymap = Keymap::empty();
        assert!(!keymap.set("ctrl+j", "scroll_somewhere"));
        assert!(!keymap.set("ctrl", "cursor_down"));
        assert!(keymap.set("ctrl+j", "cursor_down"));
        assert_eq!(
            keymap.resolve(&KeyEvent::new(Key::Char('j')).with_ctrl()),
            Some(OverlayAction::CursorDown)
        );

        assert!(keymap.del("CTRL+J"));
        assert!(!keymap.del("ctrl+j"));
        assert_eq!(keymap.binding_count(), 0);
    }
}
