//! On-chain records
//!
//! Passive records as returned by the chain query layer. Nothing in this
//! crate mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, BlogId, CommentId, PostId, ReactionId};

/// Who created a record, and when
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Created {
    pub account: AccountId,
    pub time: DateTime<Utc>,
}

/// Direction of a vote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Upvote,
    Downvote,
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionKind::Upvote => f.pad("upvote"),
            ReactionKind::Downvote => f.pad("downvote"),
        }
    }
}

/// An upvote or downvote cast by an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reaction {
    pub id: ReactionId,
    pub kind: ReactionKind,
    pub created: Created,
}

impl Reaction {
    pub fn is_upvote(&self) -> bool {
        self.kind == ReactionKind::Upvote
    }

    /// The voting account
    pub fn voter(&self) -> &AccountId {
        &self.created.account
    }
}

/// What kind of post this is
///
/// A share is itself a post whose extension points at the shared record.
/// On the wire a regular post is `"RegularPost"` and a share is
/// `{"SharedPost": "0x5"}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PostExtension {
    #[default]
    RegularPost,
    SharedPost(PostId),
    SharedComment(CommentId),
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub blog_id: BlogId,
    pub created: Created,
    #[serde(default)]
    pub extension: PostExtension,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub upvotes_count: u32,
    #[serde(default)]
    pub downvotes_count: u32,
}

impl Post {
    /// Title for display, falling back to the id
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Post #{}", self.id),
        }
    }

    /// The post this one shares, if it is a share of a post
    pub fn shared_post(&self) -> Option<PostId> {
        match self.extension {
            PostExtension::SharedPost(id) => Some(id),
            _ => None,
        }
    }

    /// Net score shown next to the vote buttons
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes_count) - i64::from(self.downvotes_count)
    }
}

/// A comment on a post, possibly a reply to another comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    pub created: Created,
}

impl Comment {
    /// Whether this comment answers another comment rather than the post
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// A blog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    pub id: BlogId,
    pub created: Created,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Blog {
    /// Name for display: name, then `@handle`, then the id
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        if let Some(handle) = self.handle.as_deref().filter(|h| !h.trim().is_empty()) {
            return format!("@{}", handle);
        }
        format!("Blog #{}", self.id)
    }
}
