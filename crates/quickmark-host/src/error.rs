//! Host error types.

use thiserror::Error;

use crate::TabId;

/// Errors raised by host collaborators.
///
/// None of these reach the user; callers log them and carry on.
#[derive(Debug, Error)]
pub enum HostError {
    /// No page is active, so there is nothing to toggle.
    #[error("No active tab")]
    NoActiveTab,

    /// The overlay could not be injected into the page.
    #[error("Injection into tab {tab} failed: {message}")]
    Injection { tab: TabId, message: String },

    /// The toggle message could not be delivered.
    #[error("Delivery to tab {tab} failed: {message}")]
    Delivery { tab: TabId, message: String },

    /// A navigation call failed.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Bookmark file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bookmark file is not valid JSON.
    #[error("Invalid bookmark file: {0}")]
    Parse(#[from] serde_json::Error),
}
