//! Paginated feed accumulation
//!
//! A [`FeedLoader`] belongs to one mounted feed component. Each trigger
//! (mount, scroll-to-bottom) fetches the next page, appends it and moves the
//! cursor forward by the page size. The feed ends at the first page shorter
//! than the page size.
//!
//! State is kept in a `watch` channel so a host can re-render whenever a
//! page lands.

use std::sync::Arc;
use tokio::sync::watch;

use super::{FeedError, FeedKind, FeedService};
use crate::mount::Mount;
use crate::types::{AccountId, Activity};

/// Everything a feed component needs to render
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    /// All records loaded so far, in feed order
    pub items: Vec<Activity>,
    /// Offset of the next page
    pub offset: u64,
    /// False once a short page has been seen
    pub has_more: bool,
    /// A fetch is in flight
    pub loading: bool,
    /// Message of the most recent failed fetch, cleared on success
    pub last_error: Option<String>,
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            has_more: true,
            loading: false,
            last_error: None,
        }
    }
}

/// Result of a `load_next` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// A page was appended
    Loaded { count: usize, has_more: bool },
    /// The feed already ended; nothing was fetched
    Exhausted,
    /// The component unmounted; any fetched page was discarded
    Unmounted,
}

/// Accumulates pages of one account's feed
pub struct FeedLoader {
    service: Arc<dyn FeedService>,
    kind: FeedKind,
    account: AccountId,
    limit: u64,
    mount: Mount,
    state: watch::Sender<FeedSnapshot>,
}

impl FeedLoader {
    /// Create a loader with page size `limit` (at least 1)
    pub fn new(
        service: Arc<dyn FeedService>,
        kind: FeedKind,
        account: AccountId,
        limit: u64,
        mount: Mount,
    ) -> Self {
        let (state, _) = watch::channel(FeedSnapshot::default());
        Self {
            service,
            kind,
            account,
            limit: limit.max(1),
            mount,
            state,
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Current state
    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.state.subscribe()
    }

    pub fn has_more(&self) -> bool {
        self.state.borrow().has_more
    }

    /// Fetch and append the next page
    ///
    /// On failure the cursor stays put so the same page is requested again
    /// on the next trigger.
    pub async fn load_next(&mut self) -> Result<PageOutcome, FeedError> {
        if !self.mount.is_mounted() {
            return Ok(PageOutcome::Unmounted);
        }

        let offset = {
            let current = self.state.borrow();
            if !current.has_more {
                return Ok(PageOutcome::Exhausted);
            }
            current.offset
        };

        self.state.send_modify(|s| s.loading = true);
        tracing::debug!(
            kind = %self.kind,
            account = %self.account,
            offset,
            limit = self.limit,
            "loading feed page"
        );

        let fetch = self.service.page(self.kind, &self.account, offset, self.limit);
        let result = match self.mount.guard(fetch).await {
            Some(result) => result,
            None => {
                tracing::debug!(kind = %self.kind, offset, "feed unmounted, discarding page");
                self.state.send_modify(|s| s.loading = false);
                return Ok(PageOutcome::Unmounted);
            }
        };

        match result {
            Ok(page) => {
                let count = page.len();
                let has_more = count as u64 >= self.limit;
                let limit = self.limit;
                self.state.send_modify(|s| {
                    s.items.extend(page);
                    s.offset = offset + limit;
                    s.has_more = has_more;
                    s.loading = false;
                    s.last_error = None;
                });
                tracing::debug!(kind = %self.kind, count, has_more, "feed page loaded");
                Ok(PageOutcome::Loaded { count, has_more })
            }
            Err(e) => {
                tracing::warn!(kind = %self.kind, offset, error = %e, "feed page failed");
                let message = e.to_string();
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.last_error = Some(message);
                });
                Err(e)
            }
        }
    }

    /// Load pages until the feed ends or `max_pages` have been fetched
    pub async fn load_pages(&mut self, max_pages: usize) -> Result<usize, FeedError> {
        let mut loaded = 0;
        for _ in 0..max_pages {
            match self.load_next().await? {
                PageOutcome::Loaded { has_more, .. } => {
                    loaded += 1;
                    if !has_more {
                        break;
                    }
                }
                PageOutcome::Exhausted | PageOutcome::Unmounted => break,
            }
        }
        Ok(loaded)
    }

    /// Drop everything and start again from offset 0
    pub fn reset(&mut self) {
        self.state.send_replace(FeedSnapshot::default());
    }
}
