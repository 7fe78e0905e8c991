//! Request handling and command routing.
//!
//! `Background` answers the overlay's `SEARCH` and `OPEN` requests and turns
//! the toggle command into a `TOGGLE_PALETTE` broadcast for the active tab.

use std::sync::Arc;

use quickmark_core::{
    Broadcast, Disposition, OpenResponse, Request, Response, SearchResponse, TOGGLE_COMMAND,
};

use crate::navigation::{Navigator, PageHost, TabId};
use crate::provider::BookmarkProvider;
use crate::HostError;

/// The host side of the palette.
pub struct Background {
    provider: BookmarkProvider,
    navigator: Arc<dyn Navigator>,
    pages: Arc<dyn PageHost>,
}

impl Background {
    pub fn new(
        provider: BookmarkProvider,
        navigator: Arc<dyn Navigator>,
        pages: Arc<dyn PageHost>,
    ) -> Self {
        Self {
            provider,
            navigator,
            pages,
        }
    }

    /// Answer a request sent from the overlay in `sender`.
    pub async fn handle_request(&self, request: Request, sender: Option<TabId>) -> Response {
        match request {
            Request::Search { query } => Response::Search(SearchResponse {
                results: self.provider.search(&query),
            }),
            Request::Open { url, disposition } => {
                Response::Open(self.open(url.as_deref(), disposition, sender).await)
            }
        }
    }

    /// Wire-level entry point: decode, handle, encode.
    ///
    /// Anything that does not decode as a request gets `{"ok":false}`.
    pub async fn handle_json(&self, payload: &str, sender: Option<TabId>) -> String {
        let response = match serde_json::from_str::<Request>(payload) {
            Ok(request) => self.handle_request(request, sender).await,
            Err(e) => {
                tracing::debug!("Rejecting malformed request: {}", e);
                Response::Open(OpenResponse::rejected())
            }
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            tracing::error!("Failed to encode response: {}", e);
            r#"{"ok":false}"#.to_string()
        })
    }

    async fn open(
        &self,
        url: Option<&str>,
        disposition: Disposition,
        sender: Option<TabId>,
    ) -> OpenResponse {
        let (Some(tab), Some(url)) = (sender, url.filter(|u| !u.is_empty())) else {
            tracing::debug!("Open rejected: sender={:?} url={:?}", sender, url);
            return OpenResponse::rejected();
        };

        let result = match disposition {
            Disposition::NewTab => self.navigator.create(url, true).await.map(|_| ()),
            Disposition::CurrentTab => self.navigator.update(tab, url).await,
        };

        match result {
            Ok(()) => {
                tracing::info!("Opened {} ({:?})", url, disposition);
                OpenResponse::ok()
            }
            Err(e) => {
                tracing::warn!("Open {} failed: {}", url, e);
                OpenResponse::rejected()
            }
        }
    }

    /// Route a global command.
    ///
    /// Returns the tab the toggle was delivered to, or `None` for commands
    /// other than the toggle.
    pub async fn on_command(&self, command: &str) -> Result<Option<TabId>, HostError> {
        if command != TOGGLE_COMMAND {
            return Ok(None);
        }

        let tab = self.pages.active_tab().await.ok_or(HostError::NoActiveTab)?;
        self.pages.ensure_injected(tab).await?;
        self.pages.broadcast(tab, Broadcast::TogglePalette).await?;

        tracing::debug!("Toggle delivered to tab {}", tab);
        Ok(Some(tab))
    }
}
