//! Notifications
//!
//! Turns notification-feed activities into display-ready messages. Each
//! activity either classifies into a [`Notification`] or comes back as an
//! explicit [`ClassifyOutcome::Unresolvable`] naming what could not be
//! resolved, so nothing disappears silently.

mod classify;
mod render;

pub use classify::NotificationClassifier;

use serde::{Deserialize, Serialize};

use crate::types::{AccountId, Activity, ActivityError, BlogId, CommentId, PostId};
use chrono::{DateTime, Utc};

/// What happened, from the recipient's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NotificationMessage {
    AccountFollowed,
    BlogFollowed,
    BlogCreated,
    CommentCreated,
    CommentReply,
    PostReactionCreated,
    CommentReactionCreated,
}

/// The entity a notification links to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "id")]
pub enum Subject {
    Account(AccountId),
    Blog(BlogId),
    Post(PostId),
    /// A comment, shown as the post it belongs to
    Comment { post: PostId, comment: CommentId },
}

impl Subject {
    /// The post shown for this subject, if any
    pub fn post(&self) -> Option<PostId> {
        match self {
            Subject::Post(id) | Subject::Comment { post: id, .. } => Some(*id),
            Subject::Account(_) | Subject::Blog(_) => None,
        }
    }

    /// In-app link to the subject; comments anchor into their post page
    pub fn path(&self) -> Option<String> {
        match self {
            Subject::Account(_) => None,
            Subject::Blog(id) => Some(format!("/blogs/{}", id)),
            Subject::Post(id) => Some(format!("/blogs/posts/{}", id)),
            Subject::Comment { post, comment } => {
                Some(format!("/blogs/posts/{}#comment-{}", post, comment))
            }
        }
    }
}

/// A classified notification ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    /// Account that triggered the notification
    pub actor: AccountId,
    pub message: NotificationMessage,
    pub subject: Subject,
    /// Post title or blog name of the subject, when it could be looked up
    pub subject_title: Option<String>,
    pub date: DateTime<Utc>,
    pub agg_count: u32,
}

/// Why an activity could not become a notification
#[derive(Debug, Clone, PartialEq)]
pub enum UnresolvedReason {
    CommentNotFound(CommentId),
    PostNotFound(PostId),
    /// A news-feed event that has no notification form
    NotANotification(&'static str),
    /// The record itself is unusable
    Malformed(ActivityError),
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedReason::CommentNotFound(id) => write!(f, "comment {} not found", id),
            UnresolvedReason::PostNotFound(id) => write!(f, "post {} not found", id),
            UnresolvedReason::NotANotification(tag) => {
                write!(f, "{} is not a notification event", tag)
            }
            UnresolvedReason::Malformed(e) => write!(f, "malformed activity: {}", e),
        }
    }
}

/// Result of classifying one activity
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    Classified(Notification),
    Unresolvable {
        activity: Activity,
        reason: UnresolvedReason,
    },
}

impl ClassifyOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            ClassifyOutcome::Classified(n) => Some(n),
            ClassifyOutcome::Unresolvable { .. } => None,
        }
    }
}
