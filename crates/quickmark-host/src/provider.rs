//! Bookmark search provider.
//!
//! Turns raw store matches into `SearchResult`s: bookmarks only, capped,
//! with normalized URLs, bare domains and root-first folder paths.

use std::collections::HashSet;
use std::sync::Arc;

use quickmark_core::{SearchResult, DEFAULT_MAX_RESULTS};
use url::Url;

use crate::bookmarks::BookmarkStore;

/// Parse and re-serialize a URL, returning it with its `www.`-less host.
///
/// Unparseable input is returned unchanged with an empty domain.
pub fn normalize_url(raw: &str) -> (String, String) {
    match Url::parse(raw) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            let domain = match host.get(..4) {
                Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &host[4..],
                _ => host,
            };
            (url.to_string(), domain.to_string())
        }
        Err(_) => (raw.to_string(), String::new()),
    }
}

/// Titles of the folders above a node, root first.
///
/// Walks from `parent_id` to the root and skips untitled folders. A cycle in
/// the parent links ends the walk.
pub fn node_path(store: &dyn BookmarkStore, parent_id: Option<&str>) -> Vec<String> {
    let mut segments = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = parent_id.map(str::to_string);

    while let Some(id) = cursor {
        if !seen.insert(id.clone()) {
            tracing::warn!("Cycle in bookmark parents at node {}", id);
            break;
        }
        let Some(node) = store.get(&id) else {
            break;
        };
        let title = node.title.trim();
        if !title.is_empty() {
            segments.push(title.to_string());
        }
        cursor = node.parent_id;
    }

    segments.reverse();
    segments
}

/// Resolve `query` against `store`.
///
/// Empty or whitespace-only queries return no results without touching the
/// store. Folders are dropped and the rest truncated to `max_results` before
/// paths are resolved.
pub fn search_bookmarks(
    store: &dyn BookmarkStore,
    query: &str,
    max_results: usize,
) -> Vec<SearchResult> {
    let raw = query.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    store
        .search(raw)
        .into_iter()
        .filter(|node| {
            node.url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty())
        })
        .take(max_results)
        .map(|node| {
            let (url, domain) = normalize_url(node.url.as_deref().unwrap_or_default().trim());
            let path = node_path(store, node.parent_id.as_deref());
            let title = match node.title.trim() {
                "" => url.trim().to_string(),
                title => title.to_string(),
            };
            SearchResult {
                id: node.id.into(),
                title,
                url,
                domain,
                path,
            }
        })
        .collect()
}

/// A store plus its result cap.
#[derive(Clone)]
pub struct BookmarkProvider {
    store: Arc<dyn BookmarkStore>,
    max_results: usize,
}

impl BookmarkProvider {
    /// Create a provider with the default cap.
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self {
            store,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Override the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Run a search.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let results = search_bookmarks(self.store.as_ref(), query, self.max_results);
        tracing::debug!("search '{}': {} results", query.trim(), results.len());
        results
    }
}
