//! Bookmark storage.
//!
//! `BookmarkStore` is the read-only view the provider needs. `BookmarkTree`
//! is an in-memory implementation loaded from a nested JSON file:
//!
//! ```json
//! [
//!   { "title": "Bookmarks Bar", "children": [
//!       { "title": "Rust", "children": [
//!           { "title": "The Book", "url": "https://doc.rust-lang.org/book/" }
//!       ]}
//!   ]}
//! ]
//! ```
//!
//! Nodes without an `id` are numbered in document order.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::HostError;

/// A bookmark or folder. Folders have no URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub url: Option<String>,
}

impl BookmarkNode {
    /// Whether this node is a bookmark rather than a folder.
    pub fn is_bookmark(&self) -> bool {
        self.url.is_some()
    }
}

/// Read access to a bookmark collection.
pub trait BookmarkStore: Send + Sync {
    /// Nodes matching every whitespace-separated term of `query`, in store
    /// order. Folders may be included.
    fn search(&self, query: &str) -> Vec<BookmarkNode>;

    /// Look up a node by id.
    fn get(&self, id: &str) -> Option<BookmarkNode>;
}

/// In-memory bookmark tree.
#[derive(Debug, Default)]
pub struct BookmarkTree {
    nodes: Vec<BookmarkNode>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    children: Vec<RawNode>,
}

impl BookmarkTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a nested JSON bookmark file.
    pub fn from_json(text: &str) -> Result<Self, HostError> {
        let roots: Vec<RawNode> = serde_json::from_str(text)?;
        let mut tree = Self::new();
        for root in roots {
            tree.add_raw(root, None);
        }
        Ok(tree)
    }

    /// Read and parse a JSON bookmark file.
    pub fn load(path: &Path) -> Result<Self, HostError> {
        let text = std::fs::read_to_string(path)?;
        let tree = Self::from_json(&text)?;
        tracing::info!("Loaded {} bookmark nodes from {}", tree.len(), path.display());
        Ok(tree)
    }

    /// Append a node. A node with an existing id replaces the old one.
    pub fn insert(&mut self, node: BookmarkNode) {
        match self.index.get(&node.id) {
            Some(&i) => self.nodes[i] = node,
            None => {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Number of nodes, folders included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn add_raw(&mut self, raw: RawNode, parent_id: Option<String>) {
        let id = raw
            .id
            .unwrap_or_else(|| (self.nodes.len() + 1).to_string());
        self.insert(BookmarkNode {
            id: id.clone(),
            parent_id,
            title: raw.title,
            url: raw.url,
        });
        for child in raw.children {
            self.add_raw(child, Some(id.clone()));
        }
    }
}

impl BookmarkStore for BookmarkTree {
    fn search(&self, query: &str) -> Vec<BookmarkNode> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Vec::new();
        }

        self.nodes
            .iter()
            .filter(|node| {
                let title = node.title.to_lowercase();
                let url = node.url.as_deref().unwrap_or_default().to_lowercase();
                terms
                    .iter()
                    .all(|term| title.contains(term.as_str()) || url.contains(term.as_str()))
            })
            .cloned()
            .collect()
    }

    fn get(&self, id: &str) -> Option<BookmarkNode> {
        self.index.get(id).map(|&i| self.nodes[i].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": "1", "title": "Bookmarks Bar", "children": [
            {"id": "10", "title": "Rust", "children": [
                {"id": "100", "title": "The Rust Book", "url": "https://doc.rust-lang.org/book/"},
                {"id": "101", "title": "Docs.rs", "url": "https://docs.rs/"}
            ]},
            {"id": "11", "title": "Crates", "url": "https://crates.io/"}
        ]}
    ]"#;

    #[test]
    fn test_from_json_links_parents() {
        let tree = BookmarkTree::from_json(SAMPLE).unwrap();
        assert_eq!(tree.len(), 5);

        let book = tree.get("100").unwrap();
        assert_eq!(book.parent_id.as_deref(), Some("10"));
        assert!(book.is_bookmark());

        let folder = tree.get("10").unwrap();
        assert_eq!(folder.parent_id.as_deref(), Some("1"));
        assert!(!folder.is_bookmark());
    }

    #[test]
    fn test_generated_ids() {
        let tree = BookmarkTree::from_json(
            r#"[{"title": "Root", "children": [{"title": "A", "url": "https://a.test"}]}]"#,
        )
        .unwrap();
        assert_eq!(tree.get("1").unwrap().title, "Root");
        assert_eq!(tree.get("2").unwrap().parent_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_search_requires_every_term() {
        let tree = BookmarkTree::from_json(SAMPLE).unwrap();

        let ids: Vec<_> = tree.search("rust").into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["10", "100"]);

        let ids: Vec<_> = tree.search("RUST book").into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["100"]);

        assert!(tree.search("   ").is_empty());
        assert!(tree.search("python").is_empty());
    }

    #[test]
    fn test_insert_replaces_existing_id() {
        let mut tree = BookmarkTree::new();
        tree.insert(BookmarkNode {
            id: "1".to_string(),
            parent_id: None,
            title: "Old".to_string(),
            url: None,
        });
        tree.insert(BookmarkNode {
            id: "1".to_string(),
            parent_id: None,
            title: "New".to_string(),
            url: None,
        });
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("1").unwrap().title, "New");
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(BookmarkTree::load(&path), Err(HostError::Parse(_))));
    }
}
