//! Voter resolution

use futures_util::future::join_all;
use std::future::Future;
use std::sync::Arc;

use super::{VoterTab, VoterTabs};
use crate::chain::{ChainError, ChainQuery, Lookup};
use crate::mount::Mount;
use crate::types::{CommentId, PostId, ReactionId};

/// Result of opening the voters modal
#[derive(Debug, Clone, PartialEq)]
pub enum VotersOutcome {
    Loaded(VoterTabs),
    /// The post whose voters were requested does not exist
    PostNotFound(PostId),
    /// The comment whose voters were requested does not exist
    CommentNotFound(CommentId),
    /// The modal closed before the lookups finished
    Unmounted,
}

/// Loads voters for one voters modal
pub struct VoterLoader {
    chain: Arc<dyn ChainQuery>,
    mount: Mount,
    active: VoterTab,
}

impl VoterLoader {
    pub fn new(chain: Arc<dyn ChainQuery>, mount: Mount) -> Self {
        Self {
            chain,
            mount,
            active: VoterTab::All,
        }
    }

    /// Tab the loaded modal opens on
    pub fn with_active(mut self, tab: VoterTab) -> Self {
        self.active = tab;
        self
    }

    /// Resolve `ids` and split them into tabs
    ///
    /// Ids that resolve to nothing are dropped from the tabs and listed in
    /// `VoterTabs::unresolved`. Any chain failure fails the whole load.
    pub async fn load(&self, ids: &[ReactionId]) -> Result<VotersOutcome, ChainError> {
        match self.mount.guard(self.resolve(ids)).await {
            Some(tabs) => tabs.map(|tabs| VotersOutcome::Loaded(tabs.with_active(self.active))),
            None => Ok(VotersOutcome::Unmounted),
        }
    }

    /// Load voters of every reaction on a post
    pub async fn load_for_post(&self, post_id: PostId) -> Result<VotersOutcome, ChainError> {
        self.load_listed(
            self.chain.post_reaction_ids(post_id),
            VotersOutcome::PostNotFound(post_id),
        )
        .await
    }

    /// Load voters of every reaction on a comment
    pub async fn load_for_comment(
        &self,
        comment_id: CommentId,
    ) -> Result<VotersOutcome, ChainError> {
        self.load_listed(
            self.chain.comment_reaction_ids(comment_id),
            VotersOutcome::CommentNotFound(comment_id),
        )
        .await
    }

    async fn load_listed(
        &self,
        ids: impl Future<Output = Result<Lookup<Vec<ReactionId>>, ChainError>>,
        not_found: VotersOutcome,
    ) -> Result<VotersOutcome, ChainError> {
        let lookup = match self.mount.guard(ids).await {
            Some(lookup) => lookup?,
            None => return Ok(VotersOutcome::Unmounted),
        };

        match lookup {
            Lookup::Found(ids) => self.load(&ids).await,
            Lookup::NotFound => Ok(not_found),
        }
    }

    async fn resolve(&self, ids: &[ReactionId]) -> Result<VoterTabs, ChainError> {
        tracing::debug!(count = ids.len(), "resolving reactions");

        let lookups = join_all(ids.iter().map(|id| self.chain.reaction(*id))).await;

        let mut reactions = Vec::with_capacity(ids.len());
        let mut unresolved = Vec::new();
        for (id, lookup) in ids.iter().zip(lookups) {
            match lookup? {
                Lookup::Found(reaction) => reactions.push(reaction),
                Lookup::NotFound => unresolved.push(*id),
            }
        }

        if !unresolved.is_empty() {
            tracing::warn!(count = unresolved.len(), "reactions not found on chain");
        }

        Ok(VoterTabs::partition(reactions, unresolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::memory::fixtures::{comment, post, reaction};
    use crate::chain::MemoryChain;
    use crate::types::ReactionKind;
    use std::time::Duration;

    fn chain() -> MemoryChain {
        MemoryChain::new()
            .with_post(post(1, 1))
            .with_post(post(2, 1))
            .with_reaction(PostId::new(1), reaction(1, ReactionKind::Upvote, "alice"))
            .with_reaction(PostId::new(1), reaction(2, ReactionKind::Downvote, "bob"))
            .with_reaction(PostId::new(1), reaction(3, ReactionKind::Upvote, "carol"))
            .with_comment(comment(7, 1, None))
            .with_comment(comment(8, 1, Some(7)))
            .with_comment_reaction(CommentId::new(7), reaction(4, ReactionKind::Downvote, "dave"))
            .with_comment_reaction(CommentId::new(7), reaction(5, ReactionKind::Downvote, "erin"))
    }

    fn loaded(outcome: VotersOutcome) -> VoterTabs {
        match outcome {
            VotersOutcome::Loaded(tabs) => tabs,
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unresolved_ids_are_dropped() {
        let loader = VoterLoader::new(Arc::new(chain()), Mount::new());
        let ids: Vec<ReactionId> = [1, 2, 3, 40, 41].into_iter().map(ReactionId::new).collect();

        let tabs = loaded(loader.load(&ids).await.unwrap());
        assert_eq!(tabs.count(VoterTab::All), 3);
        assert_eq!(tabs.count(VoterTab::Upvoters), 2);
        assert_eq!(tabs.count(VoterTab::Downvoters), 1);
        assert_eq!(tabs.unresolved(), &[ReactionId::new(40), ReactionId::new(41)]);
    }

    #[tokio::test]
    async fn test_input_order_is_kept() {
        let loader = VoterLoader::new(Arc::new(chain()), Mount::new());
        let ids: Vec<ReactionId> = [3, 1, 2].into_iter().map(ReactionId::new).collect();

        let tabs = loaded(loader.load(&ids).await.unwrap());
        let order: Vec<u64> = tabs.tab(VoterTab::All).iter().map(|r| r.id.get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_load_for_post() {
        let loader = VoterLoader::new(Arc::new(chain()), Mount::new());

        let tabs = loaded(loader.load_for_post(PostId::new(1)).await.unwrap());
        assert_eq!(tabs.label(VoterTab::All), "All (3)");

        let tabs = loaded(loader.load_for_post(PostId::new(2)).await.unwrap());
        assert!(tabs.is_empty());

        assert_eq!(
            loader.load_for_post(PostId::new(9)).await.unwrap(),
            VotersOutcome::PostNotFound(PostId::new(9))
        );
    }

    #[tokio::test]
    async fn test_load_for_comment() {
        let loader = VoterLoader::new(Arc::new(chain()), Mount::new());

        let tabs = loaded(loader.load_for_comment(CommentId::new(7)).await.unwrap());
        assert_eq!(tabs.count(VoterTab::All), 2);
        assert_eq!(tabs.count(VoterTab::Downvoters), 2);
        assert_eq!(tabs.count(VoterTab::Upvoters), 0);

        let tabs = loaded(loader.load_for_comment(CommentId::new(8)).await.unwrap());
        assert!(tabs.is_empty());

        assert_eq!(
            loader.load_for_comment(CommentId::new(70)).await.unwrap(),
            VotersOutcome::CommentNotFound(CommentId::new(70))
        );
    }

    #[tokio::test]
    async fn test_opens_on_requested_tab() {
        let loader =
            VoterLoader::new(Arc::new(chain()), Mount::new()).with_active(VoterTab::Upvoters);
        let tabs = loaded(loader.load_for_post(PostId::new(1)).await.unwrap());
        assert_eq!(tabs.active(), VoterTab::Upvoters);
        assert_eq!(tabs.active_tab().len(), 2);
        assert_eq!(tabs.header(), "Voters (3)");
    }

    #[tokio::test]
    async fn test_modal_closed_during_resolution() {
        let chain = Arc::new(chain().with_delay(Duration::from_millis(200)));
        let mount = Mount::new();
        let loader = VoterLoader::new(Arc::clone(&chain) as Arc<dyn ChainQuery>, mount.clone());

        let ids: Vec<ReactionId> = [1, 2, 3].into_iter().map(ReactionId::new).collect();
        let pending = tokio::spawn(async move { loader.load(&ids).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(chain.lookups() > 0);
        mount.unmount();

        assert_eq!(pending.await.unwrap().unwrap(), VotersOutcome::Unmounted);
    }

    #[tokio::test]
    async fn test_modal_closed_while_listing_reactions() {
        let chain = Arc::new(chain().with_delay(Duration::from_millis(200)));
        let mount = Mount::new();
        let loader = VoterLoader::new(Arc::clone(&chain) as Arc<dyn ChainQuery>, mount.clone());

        let pending = tokio::spawn(async move { loader.load_for_comment(CommentId::new(7)).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        mount.unmount();

        assert_eq!(pending.await.unwrap().unwrap(), VotersOutcome::Unmounted);
        // the reaction lookups never started
        assert_eq!(chain.lookups(), 1);
    }

    #[tokio::test]
    async fn test_closed_modal_and_chain_failure() {
        let mount = Mount::new();
        let loader = VoterLoader::new(Arc::new(chain()), mount.clone());
        mount.unmount();
        assert_eq!(
            loader.load(&[ReactionId::new(1)]).await.unwrap(),
            VotersOutcome::Unmounted
        );

        let chain = chain();
        chain.set_unavailable(true);
        let loader = VoterLoader::new(Arc::new(chain), Mount::new());
        assert!(matches!(
            loader.load(&[ReactionId::new(1)]).await,
            Err(ChainError::Unavailable)
        ));
    }
}
