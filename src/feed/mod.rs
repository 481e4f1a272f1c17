//! Activity Feeds
//!
//! Pages of activity records come from the off-chain feed service, which is
//! an external collaborator reached through [`FeedService`].
//!
//! ## Architecture
//!
//! - **HttpFeedService**: REST client for the off-chain service
//! - **MemoryFeed**: canned pages for tests and demos
//! - **FeedLoader**: per-component accumulator with a cursor and a derived
//!   end-of-feed signal

mod client;
mod loader;
mod memory;

pub use client::{FeedClientConfig, HttpFeedService};
pub use loader::{FeedLoader, FeedSnapshot, PageOutcome};
pub use memory::MemoryFeed;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AccountId, Activity};

/// Which feed of an account to read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// Activity of followed accounts and blogs
    News,
    /// Activity directed at the account itself
    Notifications,
}

impl FeedKind {
    /// Path segment used by the off-chain service
    pub fn path_segment(&self) -> &'static str {
        match self {
            FeedKind::News => "feed",
            FeedKind::Notifications => "notifications",
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::News => write!(f, "news"),
            FeedKind::Notifications => write!(f, "notifications"),
        }
    }
}

/// Source of activity pages
#[async_trait]
pub trait FeedService: Send + Sync {
    /// Fetch up to `limit` records starting at `offset`
    ///
    /// The service has no end marker; a short or empty page is the only
    /// signal that the feed is exhausted.
    async fn page(
        &self,
        kind: FeedKind,
        account: &AccountId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Activity>, FeedError>;
}

/// Errors that can occur when talking to the feed service
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Parse error: {0}")]
    Parse(String),
}

impl FeedError {
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FeedError::Timeout
        } else if e.is_connect() {
            FeedError::Unavailable
        } else {
            FeedError::Request(e)
        }
    }
}
