//! The overlay controller.
//!
//! One `OverlayController` owns one page's overlay. It processes events one
//! at a time from its queue. Searches, opens and the debounce timer run as
//! spawned tasks that post a completion event back to the queue; they never
//! touch controller state.
//!
//! ## Ordering
//!
//! Every dispatched search and open is stamped with a sequence number. A
//! completion whose number is not the latest one dispatched is dropped, so a
//! slow reply can never overwrite a newer result set. Hiding also retires
//! any pending open, so its acknowledgement cannot hide a reopened overlay.

use std::sync::Arc;
use std::time::Duration;

use quickmark_core::{
    Broadcast, BridgeError, Disposition, OpenFailurePolicy, SearchResult, DEFAULT_DEBOUNCE_MS,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::actions::OverlayAction;
use crate::bridge::Bridge;
use crate::debounce::Debouncer;
use crate::keymap::{Key, KeyEvent, Keymap};
use crate::model::{HideReason, OverlayState};
use crate::render::render_results;
use crate::surface::Surface;

// =============================================================================
// Events
// =============================================================================

/// Everything the controller reacts to.
#[derive(Debug)]
pub enum ControllerEvent {
    /// Message pushed by the host.
    Broadcast(Broadcast),
    /// The search field's text changed.
    InputChanged(String),
    /// A key was pressed in the overlay.
    Key(KeyEvent),
    /// The pointer moved onto result row `k`.
    PointerEnter(usize),
    /// Result row `k` was clicked.
    Click(usize),
    /// A pointer action landed outside the panel.
    ClickOutside,
    /// The debounce timer fired.
    DebounceElapsed { generation: u64 },
    /// A search finished.
    SearchCompleted {
        seq: u64,
        result: Result<Vec<SearchResult>, BridgeError>,
    },
    /// An open finished.
    OpenCompleted {
        seq: u64,
        result: Result<bool, BridgeError>,
    },
    /// Stop `run`.
    Shutdown,
}

// =============================================================================
// Controller
// =============================================================================

/// Controller for one page's overlay.
pub struct OverlayController<S: Surface> {
    /// Created on first show.
    state: Option<OverlayState>,
    surface: S,
    bridge: Arc<dyn Bridge>,
    keymap: Keymap,
    debouncer: Debouncer,
    debounce: Duration,
    open_failure: OpenFailurePolicy,
    events: UnboundedSender<ControllerEvent>,
    search_seq: u64,
    open_seq: u64,
}

impl<S: Surface> OverlayController<S> {
    /// Create a controller. Completions are posted to `events`.
    pub fn new(bridge: Arc<dyn Bridge>, surface: S, events: UnboundedSender<ControllerEvent>) -> Self {
        Self {
            state: None,
            surface,
            bridge,
            keymap: Keymap::default(),
            debouncer: Debouncer::new(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            open_failure: OpenFailurePolicy::default(),
            events,
            search_seq: 0,
            open_seq: 0,
        }
    }

    /// Set the quiet period before a typed query is searched.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set what happens when the host refuses to open a bookmark.
    pub fn with_open_failure(mut self, policy: OpenFailurePolicy) -> Self {
        self.open_failure = policy;
        self
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn state(&self) -> Option<&OverlayState> {
        self.state.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.state.as_ref().is_some_and(OverlayState::is_visible)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Process events until `Shutdown` arrives or every sender is gone.
    pub async fn run(mut self, mut events: UnboundedReceiver<ControllerEvent>) {
        while let Some(event) = events.recv().await {
            if matches!(event, ControllerEvent::Shutdown) {
                break;
            }
            self.handle(event);
        }
        self.debouncer.cancel_pending();
        tracing::info!("Overlay controller stopped");
    }

    /// Apply one event.
    pub fn handle(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Broadcast(Broadcast::TogglePalette) => self.toggle(),
            ControllerEvent::InputChanged(text) => self.on_input(text),
            ControllerEvent::Key(key) => self.on_key(&key),
            ControllerEvent::PointerEnter(index) => {
                if self.select_row(index) {
                    self.render();
                }
            }
            ControllerEvent::Click(index) => {
                if self.select_row(index) {
                    self.open_selected(Disposition::CurrentTab);
                }
            }
            ControllerEvent::ClickOutside => self.hide(HideReason::OutsideClick),
            ControllerEvent::DebounceElapsed { generation } => self.on_debounce(generation),
            ControllerEvent::SearchCompleted { seq, result } => self.on_search_completed(seq, result),
            ControllerEvent::OpenCompleted { seq, result } => self.on_open_completed(seq, result),
            ControllerEvent::Shutdown => self.debouncer.cancel_pending(),
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    fn toggle(&mut self) {
        if self.is_visible() {
            self.hide(HideReason::Toggle);
        } else {
            self.show();
        }
    }

    fn show(&mut self) {
        if self.state.is_none() {
            self.surface.mount();
            self.state = Some(OverlayState::default());
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !state.show() {
            return;
        }

        let query = state.query().to_string();
        let rows = render_results(state.results(), state.selected_index());
        self.surface.show(&query);
        self.surface.render(&rows);
        tracing::debug!("Overlay shown with query '{}'", query);

        // Reopening refreshes the retained query without waiting.
        self.debouncer.cancel_pending();
        self.search_or_clear(query);
    }

    fn hide(&mut self, reason: HideReason) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.hide() {
            // Acks for opens sent before this hide are stale.
            self.open_seq += 1;
            self.surface.hide();
            tracing::debug!("Overlay hidden ({:?})", reason);
        }
    }

    fn render(&mut self) {
        if let Some(state) = self.state.as_ref().filter(|s| s.is_visible()) {
            let rows = render_results(state.results(), state.selected_index());
            self.surface.render(&rows);
        }
    }

    // =========================================================================
    // Input and Search
    // =========================================================================

    fn on_input(&mut self, text: String) {
        let Some(state) = self.state.as_mut().filter(|s| s.is_visible()) else {
            return;
        };
        state.set_query(text.as_str());

        if text.trim().is_empty() {
            self.clear_results();
            return;
        }

        let events = self.events.clone();
        self.debouncer.schedule(self.debounce, move |generation| {
            let _ = events.send(ControllerEvent::DebounceElapsed { generation });
        });
    }

    fn on_debounce(&mut self, generation: u64) {
        if !self.debouncer.take_elapsed(generation) {
            tracing::debug!("Ignoring superseded debounce timer {}", generation);
            return;
        }
        let Some(query) = self.state.as_ref().map(|s| s.query().to_string()) else {
            return;
        };
        self.search_or_clear(query);
    }

    fn search_or_clear(&mut self, query: String) {
        if query.trim().is_empty() {
            self.clear_results();
        } else {
            self.search_now(query);
        }
    }

    /// Empty the result set without asking the host. In-flight searches are
    /// invalidated.
    fn clear_results(&mut self) {
        self.debouncer.cancel_pending();
        self.search_seq += 1;
        if let Some(state) = self.state.as_mut() {
            state.set_results(Vec::new());
        }
        self.render();
    }

    fn search_now(&mut self, query: String) {
        self.search_seq += 1;
        let seq = self.search_seq;
        tracing::debug!("Searching '{}' (seq {})", query, seq);

        let search = self.bridge.search(query);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = search.await;
            let _ = events.send(ControllerEvent::SearchCompleted { seq, result });
        });
    }

    fn on_search_completed(&mut self, seq: u64, result: Result<Vec<SearchResult>, BridgeError>) {
        if seq != self.search_seq {
            tracing::debug!("Discarding stale search response (seq {} < {})", seq, self.search_seq);
            return;
        }

        let results = match result {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Search failed: {}", e);
                Vec::new()
            }
        };

        if let Some(state) = self.state.as_mut() {
            state.set_results(results);
        }
        self.render();
    }

    // =========================================================================
    // Keys and Pointer
    // =========================================================================

    fn on_key(&mut self, key: &KeyEvent) {
        if !self.is_visible() {
            return;
        }
        // Unbound keys are text input; the field reports them as InputChanged.
        // Enter opens with any modifier combination.
        let Some(action) = self.keymap.resolve(key) else {
            if key.key == Key::Enter {
                let new_tab = key.modifiers.ctrl || key.modifiers.cmd;
                self.open_selected(Disposition::from_modifier(new_tab));
            }
            return;
        };
        self.apply(action);
    }

    fn apply(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::Dismiss => self.hide(HideReason::Escape),
            OverlayAction::CursorUp => {
                if let Some(state) = self.state.as_mut() {
                    state.move_up();
                }
                self.render();
            }
            OverlayAction::CursorDown => {
                if let Some(state) = self.state.as_mut() {
                    state.move_down();
                }
                self.render();
            }
            OverlayAction::Submit => self.open_selected(Disposition::CurrentTab),
            OverlayAction::SubmitNewTab => self.open_selected(Disposition::NewTab),
        }
    }

    /// Highlight row `index`. Returns false if there is no such row.
    fn select_row(&mut self, index: usize) -> bool {
        match self.state.as_mut().filter(|s| s.is_visible()) {
            Some(state) if index < state.results().len() => {
                state.select(index);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Opening
    // =========================================================================

    fn open_selected(&mut self, disposition: Disposition) {
        let Some(url) = self
            .state
            .as_ref()
            .and_then(|s| s.selected_result())
            .map(|r| r.url.clone())
        else {
            tracing::debug!("Nothing selected to open");
            return;
        };

        self.open_seq += 1;
        let seq = self.open_seq;
        tracing::debug!("Opening {} ({:?}, seq {})", url, disposition, seq);

        let open = self.bridge.open(url, disposition);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = open.await;
            let _ = events.send(ControllerEvent::OpenCompleted { seq, result });
        });
    }

    fn on_open_completed(&mut self, seq: u64, result: Result<bool, BridgeError>) {
        if seq != self.open_seq {
            tracing::debug!("Discarding stale open acknowledgement (seq {})", seq);
            return;
        }

        let ok = match result {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!("Open failed: {}", e);
                false
            }
        };

        if ok || self.open_failure == OpenFailurePolicy::Hide {
            self.hide(HideReason::Opened);
        } else {
            tracing::debug!("Open rejected, overlay stays open");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
