//! Host collaborators: tab navigation and page plumbing.
//!
//! These traits are the seams to the browser (or whatever hosts the pages).
//! They are mocked in tests.

use async_trait::async_trait;
use quickmark_core::Broadcast;
use std::fmt;

use crate::HostError;

/// Identifier of a page/tab known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opens URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Load `url` in an existing tab, replacing its page.
    async fn update(&self, tab: TabId, url: &str) -> Result<(), HostError>;

    /// Open `url` in a new tab.
    async fn create(&self, url: &str, active: bool) -> Result<TabId, HostError>;
}

/// Page-level plumbing used when routing the toggle command.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageHost: Send + Sync {
    /// The tab the user is looking at, if any.
    async fn active_tab(&self) -> Option<TabId>;

    /// Make sure the overlay surface exists in `tab`.
    async fn ensure_injected(&self, tab: TabId) -> Result<(), HostError>;

    /// Deliver a broadcast to the overlay in `tab`.
    async fn broadcast(&self, tab: TabId, message: Broadcast) -> Result<(), HostError>;
}
