//! In-memory chain
//!
//! Holds records in hash maps. Used by tests and by the CLI demo mode.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use super::{ChainError, ChainQuery, Lookup};
use crate::types::{Blog, BlogId, Comment, CommentId, Post, PostId, Reaction, ReactionId};

/// `ChainQuery` over records held in memory
#[derive(Default)]
pub struct MemoryChain {
    posts: HashMap<PostId, Post>,
    comments: HashMap<CommentId, Comment>,
    blogs: HashMap<BlogId, Blog>,
    reactions: HashMap<ReactionId, Reaction>,
    post_reactions: HashMap<PostId, Vec<ReactionId>>,
    comment_reactions: HashMap<CommentId, Vec<ReactionId>>,
    delay: Option<Duration>,
    unavailable: AtomicBool,
    lookups: AtomicUsize,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.insert(post.id, post);
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.insert(comment.id, comment);
        self
    }

    pub fn with_blog(mut self, blog: Blog) -> Self {
        self.blogs.insert(blog.id, blog);
        self
    }

    /// Add a reaction and attach it to `post`
    pub fn with_reaction(mut self, post: PostId, reaction: Reaction) -> Self {
        self.post_reactions.entry(post).or_default().push(reaction.id);
        self.reactions.insert(reaction.id, reaction);
        self
    }

    /// Add a reaction and attach it to `comment`
    pub fn with_comment_reaction(mut self, comment: CommentId, reaction: Reaction) -> Self {
        self.comment_reactions
            .entry(comment)
            .or_default()
            .push(reaction.id);
        self.reactions.insert(reaction.id, reaction);
        self
    }

    /// Delay every lookup, to simulate a slow node
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every subsequent lookup fail with `ChainError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of lookups served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    async fn check(&self) -> Result<(), ChainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ChainError::Unavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl ChainQuery for MemoryChain {
    async fn post(&self, id: PostId) -> Result<Lookup<Post>, ChainError> {
        self.check().await?;
        Ok(self.posts.get(&id).cloned().into())
    }

    async fn comment(&self, id: CommentId) -> Result<Lookup<Comment>, ChainError> {
        self.check().await?;
        Ok(self.comments.get(&id).cloned().into())
    }

    async fn blog(&self, id: BlogId) -> Result<Lookup<Blog>, ChainError> {
        self.check().await?;
        Ok(self.blogs.get(&id).cloned().into())
    }

    async fn reaction(&self, id: ReactionId) -> Result<Lookup<Reaction>, ChainError> {
        self.check().await?;
        Ok(self.reactions.get(&id).cloned().into())
    }

    async fn post_reaction_ids(&self, id: PostId) -> Result<Lookup<Vec<ReactionId>>, ChainError> {
        self.check().await?;
        if !self.posts.contains_key(&id) {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(
            self.post_reactions.get(&id).cloned().unwrap_or_default(),
        ))
    }

    async fn comment_reaction_ids(
        &self,
        id: CommentId,
    ) -> Result<Lookup<Vec<ReactionId>>, ChainError> {
        self.check().await?;
        if !self.comments.contains_key(&id) {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(
            self.comment_reactions.get(&id).cloned().unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::types::{AccountId, Created, PostExtension, ReactionKind};
    use chrono::{TimeZone, Utc};

    pub fn created(account: &str) -> Created {
        Created {
            account: AccountId::new(account),
            time: Utc.with_ymd_and_hms(2020, 5, 1, 10, 0, 0).unwrap(),
        }
    }

    pub fn post(id: u64, blog: u64) -> Post {
        Post {
            id: PostId::new(id),
            blog_id: BlogId::new(blog),
            created: created("5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty"),
            extension: PostExtension::RegularPost,
            title: Some(format!("Post {}", id)),
            comments_count: 0,
            upvotes_count: 0,
            downvotes_count: 0,
        }
    }

    pub fn shared_post(id: u64, blog: u64, original: u64) -> Post {
        Post {
            extension: PostExtension::SharedPost(PostId::new(original)),
            title: None,
            ..post(id, blog)
        }
    }

    pub fn comment(id: u64, post: u64, parent: Option<u64>) -> Comment {
        Comment {
            id: CommentId::new(id),
            post_id: PostId::new(post),
            parent_id: parent.map(CommentId::new),
            created: created("5FLSigC9HGRKVhB9FiEo4Y3koPsNmBmLJbpXg2mp1hXcS59Y"),
        }
    }

    pub fn blog(id: u64, name: &str) -> Blog {
        Blog {
            id: BlogId::new(id),
            created: created("5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty"),
            handle: None,
            name: Some(name.to_string()),
        }
    }

    pub fn reaction(id: u64, kind: ReactionKind, voter: &str) -> Reaction {
        Reaction {
            id: ReactionId::new(id),
            kind,
            created: created(voter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::types::ReactionKind;

    #[tokio::test]
    async fn test_lookups() {
        let chain = MemoryChain::new()
            .with_post(post(1, 1))
            .with_reaction(PostId::new(1), reaction(10, ReactionKind::Upvote, "alice"))
            .with_reaction(PostId::new(1), reaction(11, ReactionKind::Downvote, "bob"));

        assert!(chain.post(PostId::new(1)).await.unwrap().is_found());
        assert_eq!(chain.post(PostId::new(2)).await.unwrap(), Lookup::NotFound);
        assert_eq!(
            chain.post_reaction_ids(PostId::new(1)).await.unwrap(),
            Lookup::Found(vec![ReactionId::new(10), ReactionId::new(11)])
        );
        assert_eq!(
            chain.post_reaction_ids(PostId::new(2)).await.unwrap(),
            Lookup::NotFound
        );
        assert_eq!(chain.lookups(), 4);
    }

    #[tokio::test]
    async fn test_comment_reaction_ids() {
        let chain = MemoryChain::new()
            .with_post(post(1, 1))
            .with_comment(comment(5, 1, None))
            .with_comment(comment(6, 1, Some(5)))
            .with_comment_reaction(CommentId::new(5), reaction(20, ReactionKind::Upvote, "alice"));

        assert_eq!(
            chain.comment_reaction_ids(CommentId::new(5)).await.unwrap(),
            Lookup::Found(vec![ReactionId::new(20)])
        );
        assert_eq!(
            chain.comment_reaction_ids(CommentId::new(6)).await.unwrap(),
            Lookup::Found(vec![])
        );
        assert_eq!(
            chain.comment_reaction_ids(CommentId::new(7)).await.unwrap(),
            Lookup::NotFound
        );
        assert!(chain.reaction(ReactionId::new(20)).await.unwrap().is_found());
    }

    #[tokio::test]
    async fn test_unavailable() {
        let chain = MemoryChain::new().with_post(post(1, 1));
        chain.set_unavailable(true);
        assert!(matches!(
            chain.post(PostId::new(1)).await,
            Err(ChainError::Unavailable)
        ));
    }
}
