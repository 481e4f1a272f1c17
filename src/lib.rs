//! # Chainblog
//!
//! Headless view-models for a blockchain-backed social blogging app:
//! activity feeds, notifications and the voters modal.
//!
//! A host UI owns one loader per mounted component, calls it on lifecycle
//! events (mount, scroll-to-bottom, modal open) and renders the state it
//! publishes.
//!
//! ## Modules
//!
//! - [`types`]: identifiers, activity records and on-chain records
//! - [`chain`]: chain query trait with HTTP and in-memory implementations
//! - [`feed`]: off-chain feed service and the paginated feed loader
//! - [`notifications`]: activity-to-notification classification
//! - [`voters`]: reaction resolution and voter tabs
//! - [`news`]: news-feed post resolution
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chainblog::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let feed = Arc::new(HttpFeedService::new(config.feed.client_config())?);
//!     let chain = Arc::new(HttpChainQuery::new(config.chain.client_config())?);
//!
//!     let mount = Mount::new();
//!     let mut loader = FeedLoader::new(
//!         feed,
//!         FeedKind::Notifications,
//!         AccountId::new("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"),
//!         config.feed.page_size,
//!         mount.clone(),
//!     );
//!     loader.load_next().await?;
//!
//!     let classifier = NotificationClassifier::new(chain);
//!     for outcome in classifier.classify_all(&loader.snapshot().items).await? {
//!         if let Some(notification) = outcome.notification() {
//!             println!("{}", notification.summary());
//!         }
//!     }
//!
//!     mount.unmount();
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod config;
pub mod feed;
pub mod mount;
pub mod news;
pub mod notifications;
pub mod types;
pub mod voters;

// Re-export top-level types for convenience
pub use types::{
    AccountId, Activity, ActivityError, ActivityEvent, Blog, BlogId, Comment, CommentId, Created,
    IdParseError, Post, PostExtension, PostId, Reaction, ReactionId, ReactionKind,
};

pub use chain::{ChainClientConfig, ChainError, ChainQuery, HttpChainQuery, Lookup, MemoryChain};

pub use feed::{
    FeedClientConfig, FeedError, FeedKind, FeedLoader, FeedService, FeedSnapshot, HttpFeedService,
    MemoryFeed, PageOutcome,
};

pub use notifications::{
    ClassifyOutcome, Notification, NotificationClassifier, NotificationMessage, Subject,
    UnresolvedReason,
};

pub use voters::{VoterLoader, VoterTab, VoterTabs, VotersOutcome};

pub use news::{NewsItem, NewsResolver};

pub use mount::Mount;

pub use config::{ChainConfig, Config, ConfigError, FeedConfig, LoggingConfig};
