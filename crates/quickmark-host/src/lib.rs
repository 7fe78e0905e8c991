//! Host side of the Quickmark bookmark palette.
//!
//! This crate provides everything the overlay talks to through messages:
//! - Bookmark storage and the search provider
//! - URL normalization and folder breadcrumbs
//! - `SEARCH`/`OPEN` request handling and tab navigation
//! - Routing of the global toggle command

pub mod background;
pub mod bookmarks;
pub mod error;
pub mod navigation;
pub mod provider;

// Re-export commonly used types
pub use background::Background;
pub use bookmarks::{BookmarkNode, BookmarkStore, BookmarkTree};
pub use error::HostError;
pub use navigation::{Navigator, PageHost, TabId};
pub use provider::{node_path, normalize_url, search_bookmarks, BookmarkProvider};
