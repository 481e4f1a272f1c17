//! News feed
//!
//! News-feed activities point at posts. Resolving a page turns each one
//! into a post preview, or into an entry saying why there is none. A post
//! that shares another post also brings the shared original along.

use futures_util::future::join_all;
use std::sync::Arc;

use crate::chain::{ChainError, ChainQuery, Lookup};
use crate::types::{Activity, ActivityError, Post, PostId};

/// One rendered row of the news feed
#[derive(Debug, Clone, PartialEq)]
pub enum NewsItem {
    Post { activity: Activity, post: Post },
    /// A share, previewed together with the post it shares
    SharedPost {
        activity: Activity,
        post: Post,
        original: Post,
    },
    /// A share whose original post is gone from the chain
    SharedPostNotFound {
        activity: Activity,
        post: Post,
        original_id: PostId,
    },
    /// The referenced post is gone from the chain
    PostNotFound { activity: Activity, post_id: PostId },
    /// The activity does not reference a post
    NoPost { activity: Activity, event: &'static str },
    Malformed { activity: Activity, error: ActivityError },
}

impl NewsItem {
    /// The post the activity points at
    pub fn post(&self) -> Option<&Post> {
        match self {
            NewsItem::Post { post, .. }
            | NewsItem::SharedPost { post, .. }
            | NewsItem::SharedPostNotFound { post, .. } => Some(post),
            _ => None,
        }
    }

    /// The shared original, for a share whose original was found
    pub fn original(&self) -> Option<&Post> {
        match self {
            NewsItem::SharedPost { original, .. } => Some(original),
            _ => None,
        }
    }

    pub fn activity(&self) -> &Activity {
        match self {
            NewsItem::Post { activity, .. }
            | NewsItem::SharedPost { activity, .. }
            | NewsItem::SharedPostNotFound { activity, .. }
            | NewsItem::PostNotFound { activity, .. }
            | NewsItem::NoPost { activity, .. }
            | NewsItem::Malformed { activity, .. } => activity,
        }
    }
}

/// Resolves news-feed activities to posts
pub struct NewsResolver {
    chain: Arc<dyn ChainQuery>,
}

impl NewsResolver {
    pub fn new(chain: Arc<dyn ChainQuery>) -> Self {
        Self { chain }
    }

    pub async fn resolve(&self, activity: &Activity) -> Result<NewsItem, ChainError> {
        let event = match activity.event() {
            Ok(event) => event,
            Err(error) => {
                return Ok(NewsItem::Malformed {
                    activity: activity.clone(),
                    error,
                })
            }
        };

        let post_id = match event.post_id() {
            Some(id) => id,
            None => {
                return Ok(NewsItem::NoPost {
                    activity: activity.clone(),
                    event: event.tag(),
                })
            }
        };

        Ok(match self.chain.post(post_id).await? {
            Lookup::Found(post) => self.with_original(activity, post).await?,
            Lookup::NotFound => {
                tracing::warn!(post = %post_id, "news feed post not found");
                NewsItem::PostNotFound {
                    activity: activity.clone(),
                    post_id,
                }
            }
        })
    }

    async fn with_original(&self, activity: &Activity, post: Post) -> Result<NewsItem, ChainError> {
        let original_id = match post.shared_post() {
            Some(id) => id,
            None => {
                return Ok(NewsItem::Post {
                    activity: activity.clone(),
                    post,
                })
            }
        };

        Ok(match self.chain.post(original_id).await? {
            Lookup::Found(original) => NewsItem::SharedPost {
                activity: activity.clone(),
                post,
                original,
            },
            Lookup::NotFound => {
                tracing::warn!(post = %post.id, original = %original_id, "shared post not found");
                NewsItem::SharedPostNotFound {
                    activity: activity.clone(),
                    post,
                    original_id,
                }
            }
        })
    }

    /// Resolve a page concurrently, keeping input order
    pub async fn resolve_all(&self, activities: &[Activity]) -> Result<Vec<NewsItem>, ChainError> {
        join_all(activities.iter().map(|activity| self.resolve(activity)))
            .await
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::memory::fixtures::{post, shared_post};
    use crate::chain::MemoryChain;
    use crate::types::activity::fixtures::{activity, with_blog, with_post};

    #[tokio::test]
    async fn test_resolve_page() {
        let resolver = NewsResolver::new(Arc::new(MemoryChain::new().with_post(post(1, 2))));
        let page = vec![
            with_post("PostCreated", 1),
            with_post("PostShared", 5),
            with_blog("BlogCreated", 2),
            activity("PostCreated"),
        ];

        let items = resolver.resolve_all(&page).await.unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].post().map(|p| p.id), Some(PostId::new(1)));
        assert!(matches!(
            items[1],
            NewsItem::PostNotFound { post_id, .. } if post_id == PostId::new(5)
        ));
        assert!(matches!(items[2], NewsItem::NoPost { event: "BlogCreated", .. }));
        assert!(matches!(items[3], NewsItem::Malformed { .. }));
        assert_eq!(items[3].activity().event, "PostCreated");
    }

    #[tokio::test]
    async fn test_shared_post_brings_original() {
        let chain = Arc::new(
            MemoryChain::new()
                .with_post(post(1, 2))
                .with_post(shared_post(8, 3, 1))
                .with_post(shared_post(9, 3, 404)),
        );
        let resolver = NewsResolver::new(Arc::clone(&chain) as Arc<dyn ChainQuery>);

        let item = resolver.resolve(&with_post("PostShared", 8)).await.unwrap();
        assert!(matches!(item, NewsItem::SharedPost { .. }));
        assert_eq!(item.post().map(|p| p.id), Some(PostId::new(8)));
        assert_eq!(item.original().map(|p| p.id), Some(PostId::new(1)));
        assert_eq!(chain.lookups(), 2);

        let item = resolver.resolve(&with_post("PostShared", 9)).await.unwrap();
        assert!(matches!(
            item,
            NewsItem::SharedPostNotFound { original_id, .. } if original_id == PostId::new(404)
        ));
        assert_eq!(item.post().map(|p| p.id), Some(PostId::new(9)));
        assert_eq!(item.original(), None);

        // a regular post needs one lookup only
        let item = resolver.resolve(&with_post("PostCreated", 1)).await.unwrap();
        assert!(matches!(item, NewsItem::Post { .. }));
        assert_eq!(chain.lookups(), 5);
    }

    #[tokio::test]
    async fn test_chain_failure() {
        let chain = MemoryChain::new();
        chain.set_unavailable(true);
        let resolver = NewsResolver::new(Arc::new(chain));
        assert!(resolver
            .resolve_all(&[with_post("PostCreated", 1)])
            .await
            .is_err());
    }
}
