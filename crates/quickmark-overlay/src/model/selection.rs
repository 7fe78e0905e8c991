//! Highlighted-row index.

/// Index of the highlighted result.
///
/// Moves saturate at both ends; there is no wraparound. After the result set
/// changes, `clamp_to_bounds` restores `index < len` (or `index == 0` when
/// the set is empty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: usize,
}

impl Selection {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move up one row, stopping at the first.
    pub fn move_up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Move down one row, stopping at the last of `len` rows.
    pub fn move_down(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    /// Back to the first row.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Force the index into `0..len`, or 0 for an empty set.
    pub fn clamp_to_bounds(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    /// Jump to `index`, clamped to `len` rows.
    pub fn set(&mut self, index: usize, len: usize) {
        self.index = index;
        self.clamp_to_bounds(len);
    }
}
