//! Message protocol between the overlay and the host.
//!
//! Requests carry a `type` tag on the wire:
//!
//! ```text
//! {"type":"SEARCH","query":"rust"}                              -> {"results":[...]}
//! {"type":"OPEN","url":"https://…","disposition":"newTab"}      -> {"ok":true}
//! {"type":"TOGGLE_PALETTE"}                                     (broadcast, no reply)
//! ```

use serde::{Deserialize, Serialize};

use crate::SearchResult;

/// Where an opened bookmark should load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Disposition {
    /// Replace the page the overlay is shown on.
    #[default]
    CurrentTab,
    /// Open a new, active tab.
    NewTab,
}

impl Disposition {
    /// Pick the disposition for an Enter press.
    pub fn from_modifier(new_tab: bool) -> Self {
        if new_tab {
            Disposition::NewTab
        } else {
            Disposition::CurrentTab
        }
    }
}

/// Request sent from the overlay to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Resolve a free-text query to ranked bookmarks.
    Search {
        #[serde(default)]
        query: String,
    },

    /// Navigate to a URL.
    Open {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default)]
        disposition: Disposition,
    },
}

/// Reply to a `Search` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Reply to an `Open` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenResponse {
    pub ok: bool,
}

impl OpenResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }

    pub fn rejected() -> Self {
        Self { ok: false }
    }
}

/// Reply to any request.
///
/// `Open` is listed first: an untagged `{"ok":…}` would otherwise decode as
/// an empty search reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Open(OpenResponse),
    Search(SearchResponse),
}

/// Message pushed from the host to the overlay with no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Broadcast {
    /// Show the overlay if hidden, hide it if visible.
    TogglePalette,
}
