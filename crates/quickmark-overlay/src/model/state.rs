//! UI state model for the Quickmark overlay.
//!
//! These types are rendering-independent so transitions can be tested
//! without a surface.

use quickmark_core::{SearchResult, DEFAULT_MAX_RESULTS};

use super::Selection;

// =============================================================================
// Visibility State Machine
// =============================================================================

/// Overlay visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// Why the overlay was hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    /// Toggle broadcast while visible.
    Toggle,
    /// Escape key.
    Escape,
    /// Pointer action outside the panel.
    OutsideClick,
    /// A bookmark was opened.
    Opened,
}

// =============================================================================
// Overlay State
// =============================================================================

/// Everything the controller knows about one page's overlay.
///
/// `query` and `results` survive hide/show so reopening resumes the previous
/// search. The selection is always valid for the current results.
#[derive(Debug, Default)]
pub struct OverlayState {
    visibility: Visibility,
    query: String,
    results: Vec<SearchResult>,
    selection: Selection,
}

impl OverlayState {
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// `Hidden → Visible`. Returns false if already visible.
    pub fn show(&mut self) -> bool {
        if self.is_visible() {
            return false;
        }
        self.visibility = Visibility::Visible;
        true
    }

    /// `Visible → Hidden`. Returns false if already hidden.
    pub fn hide(&mut self) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.visibility = Visibility::Hidden;
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Replace the result set. Selection returns to the first row.
    pub fn set_results(&mut self, mut results: Vec<SearchResult>) {
        results.truncate(DEFAULT_MAX_RESULTS);
        self.results = results;
        self.selection.reset();
        self.selection.clamp_to_bounds(self.results.len());
    }

    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    /// The highlighted result, if there are any results.
    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.selection.index())
    }

    pub fn move_up(&mut self) {
        self.selection.move_up();
        self.selection.clamp_to_bounds(self.results.len());
    }

    pub fn move_down(&mut self) {
        self.selection.move_down(self.results.len());
        self.selection.clamp_to_bounds(self.results.len());
    }

    /// Highlight row `index` (clamped).
    pub fn select(&mut self, index: usize) {
        self.selection.set(index, self.results.len());
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn results(n: usize) -> Vec<SearchResult> {
        (0..n)
            .map(|i| SearchResult::new(i.to_string(), format!("Item {i}"), format!("https://{i}.test/")))
            .collect()
    }

    #[test]
    fn test_visibility_transitions() {
        let mut state = OverlayState::default();
        assert_eq!(state.visibility(), Visibility::Hidden);

        assert!(!state.hide());
        assert!(state.show());
        assert!(state.is_visible());
        assert!(!state.show());
        assert!(state.hide());
        assert!(!state.is_visible());
    }

    #[test]
    fn test_hide_keeps_query_and_results() {
        let mut state = OverlayState::default();
        state.show();
        state.set_query("rust");
        state.set_results(results(3));
        state.move_down();

        state.hide();
        assert_eq!(state.query(), "rust");
        assert_eq!(state.results().len(), 3);
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn test_new_results_reset_selection() {
        let mut state = OverlayState::default();
        state.set_results(results(5));
        state.select(4);
        assert_eq!(state.selected_index(), 4);

        state.set_results(results(2));
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.selected_result().unwrap().url, "https://0.test/");
    }

    #[test]
    fn test_results_are_capped() {
        let mut state = OverlayState::default();
        state.set_results(results(DEFAULT_MAX_RESULTS + 10));
        assert_eq!(state.results().len(), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_empty_results_have_no_selection() {
        let mut state = OverlayState::default();
        state.set_results(Vec::new());
        state.move_down();
        state.select(3);
        assert_eq!(state.selected_index(), 0);
        assert!(state.selected_result().is_none());
    }

    #[test]
    fn test_select_clamps() {
        let mut state = OverlayState::default();
        state.set_results(results(2));
        state.select(9);
        assert_eq!(state.selected_index(), 1);
    }
}
