//! Chain Query Layer
//!
//! The blockchain is an external collaborator. Everything this crate needs
//! from it goes through the [`ChainQuery`] trait: exact-match lookups by id
//! that may legitimately find nothing.
//!
//! - **HttpChainQuery**: REST client for a chain indexer
//! - **MemoryChain**: in-memory records for tests and demos

mod http;
pub(crate) mod memory;

pub use http::{ChainClientConfig, HttpChainQuery};
pub use memory::MemoryChain;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Blog, BlogId, Comment, CommentId, Post, PostId, Reaction, ReactionId};

/// Outcome of an exact-match lookup
///
/// Absence is an expected answer from the chain, not an error, so it gets its
/// own variant instead of hiding in an `Option` that callers unwrap.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

/// Read access to on-chain records
#[async_trait]
pub trait ChainQuery: Send + Sync {
    async fn post(&self, id: PostId) -> Result<Lookup<Post>, ChainError>;

    async fn comment(&self, id: CommentId) -> Result<Lookup<Comment>, ChainError>;

    async fn blog(&self, id: BlogId) -> Result<Lookup<Blog>, ChainError>;

    async fn reaction(&self, id: ReactionId) -> Result<Lookup<Reaction>, ChainError>;

    /// Ids of all reactions cast on a post, in creation order
    async fn post_reaction_ids(&self, id: PostId) -> Result<Lookup<Vec<ReactionId>>, ChainError>;

    /// Ids of all reactions cast on a comment, in creation order
    async fn comment_reaction_ids(
        &self,
        id: CommentId,
    ) -> Result<Lookup<Vec<ReactionId>>, ChainError>;
}

/// Errors that can occur when querying the chain
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Chain node unavailable")]
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

impl ChainError {
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ChainError::Timeout
        } else if e.is_connect() {
            ChainError::Unavailable
        } else {
            ChainError::Request(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_helpers() {
        let found: Lookup<u32> = Some(3).into();
        assert!(found.is_found());
        assert_eq!(found.clone().map(|v| v * 2), Lookup::Found(6));
        assert_eq!(found.found(), Some(3));

        let missing: Lookup<u32> = None.into();
        assert!(!missing.is_found());
        assert_eq!(missing.found(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::ApiError {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502: bad gateway");
        assert_eq!(ChainError::Unavailable.to_string(), "Chain node unavailable");
    }
}
