//! In-memory feed service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use super::{FeedError, FeedKind, FeedService};
use crate::types::{AccountId, Activity};

/// `FeedService` that slices pages out of fixed per-account lists
#[derive(Default)]
pub struct MemoryFeed {
    feeds: HashMap<(FeedKind, AccountId), Vec<Activity>>,
    delay: Option<Duration>,
    fail_next: AtomicBool,
    requests: AtomicUsize,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, kind: FeedKind, account: AccountId, items: Vec<Activity>) -> Self {
        self.feeds.insert((kind, account), items);
        self
    }

    /// Delay every response, to simulate a slow service
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the next request with `FeedError::Unavailable`
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of page requests served so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedService for MemoryFeed {
    async fn page(
        &self,
        kind: FeedKind,
        account: &AccountId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Activity>, FeedError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(FeedError::Unavailable);
        }

        let items = match self.feeds.get(&(kind, account.clone())) {
            Some(items) => items,
            None => return Ok(Vec::new()),
        };

        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(items.len());
        let end = start
            .saturating_add(usize::try_from(limit).unwrap_or(usize::MAX))
            .min(items.len());
        Ok(items[start..end].to_vec())
    }
}
