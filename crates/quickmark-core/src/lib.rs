//! Core types for the Quickmark bookmark palette.
//!
//! This crate contains data structures shared by the host and the overlay:
//! - Search result types
//! - The request/response/broadcast wire protocol
//! - Configuration types
//! - Error types

mod config;
mod error;
mod protocol;
mod result;

pub use config::{
    config_dir, config_path, BehaviorConfig, HotkeyConfig, OpenFailurePolicy,
    QuickmarkConfig, SearchConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT_MS,
    TOGGLE_COMMAND,
};
pub use error::{BridgeError, ConfigError};
pub use protocol::{Broadcast, Disposition, OpenResponse, Request, Response, SearchResponse};
pub use result::{BookmarkId, SearchResult, BREADCRUMB_SEPARATOR};
