//! Search result types returned by the bookmark provider.

use serde::{Deserialize, Serialize};

/// Stable bookmark identifier assigned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkId(pub String);

impl From<String> for BookmarkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BookmarkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for BookmarkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One matched bookmark.
///
/// `title` and `url` are never empty. `domain` is empty when the URL could
/// not be parsed, and `path` is empty for bookmarks without titled folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Provider identifier.
    pub id: BookmarkId,

    /// Display text. Falls back to the URL when the bookmark has no title.
    pub title: String,

    /// Normalized absolute URL.
    pub url: String,

    /// Hostname without a leading `www.`.
    #[serde(default)]
    pub domain: String,

    /// Ancestor folder titles, root first.
    #[serde(default)]
    pub path: Vec<String>,
}

impl SearchResult {
    /// Create a result with no domain or folder path.
    pub fn new(
        id: impl Into<BookmarkId>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            domain: String::new(),
            path: Vec::new(),
        }
    }

    /// Set the domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the folder path.
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Folder path joined with the breadcrumb separator, if any.
    pub fn breadcrumb(&self) -> Option<String> {
        if self.path.is_empty() {
            None
        } else {
            Some(self.path.join(BREADCRUMB_SEPARATOR))
        }
    }
}

/// Separator between folder titles in a breadcrumb.
pub const BREADCRUMB_SEPARATOR: &str = " › ";
