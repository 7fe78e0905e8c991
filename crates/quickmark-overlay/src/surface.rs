//! Where the overlay is drawn.
//!
//! The controller drives a `Surface`; it never reads back from it. Input
//! arrives separately as controller events.

use std::io::Write;

use crate::render::Row;

/// Drawing target for one overlay.
pub trait Surface {
    /// Create the overlay elements. Called once, on first show.
    fn mount(&mut self);

    /// Make the overlay visible with `query` in the focused input.
    fn show(&mut self, query: &str);

    /// Remove the overlay from view. The elements stay mounted.
    fn hide(&mut self);

    /// Replace the result list.
    fn render(&mut self, rows: &[Row]);
}

/// Format rows as plain text, one line per field.
pub fn format_rows(rows: &[Row]) -> String {
    let mut lines = Vec::new();
    for row in rows {
        match row {
            Row::Placeholder { message } => lines.push(format!("  {message}")),
            Row::Result(row) => {
                let marker = if row.selected { ">" } else { " " };
                lines.push(format!("{marker} {}", row.title));
                if let Some(meta) = &row.meta {
                    lines.push(format!("    {meta}"));
                }
                lines.push(format!("    {}", row.url));
            }
        }
    }
    lines.join("\n")
}

/// Surface that prints to stdout.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    mounted: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn print(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl Surface for TerminalSurface {
    fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::debug!("Terminal surface mounted");
    }

    fn show(&mut self, query: &str) {
        self.print(&format!("── quickmark ──\nsearch: {query}"));
    }

    fn hide(&mut self) {
        self.print("── hidden ──");
    }

    fn render(&mut self, rows: &[Row]) {
        self.print(&format_rows(rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_results;
    use insta::assert_snapshot;
    use quickmark_core::SearchResult;

    #[test]
    fn test_terminal_mount_is_idempotent() {
        let mut surface = TerminalSurface::new();
        assert!(!surface.is_mounted());
        surface.mount();
        surface.mount();
        assert!(surface.is_mounted());
    }

    #[test]
    fn test_format_placeholder() {
        assert_eq!(format_rows(&render_results(&[], 0)), "  No results");
    }

    #[test]
    fn test_format_results() {
        let results = vec![
            SearchResult::new("1", "Tracker", "https://www.tracker.test/board")
                .with_domain("tracker.test")
                .with_path(["Work"]),
            SearchResult::new("2", "about:blank", "about:blank"),
        ];

        assert_snapshot!(format_rows(&render_results(&results, 0)), @r"
        > Tracker
            Work • tracker.test
            https://www.tracker.test/board
          about:blank
            about:blank
        ");
    }
}
