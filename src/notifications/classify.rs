//! Notification classification
//!
//! Follow-account events classify from the record alone. Blog events look
//! up the blog for its name, post reactions need the post, and comment
//! events need the comment and then its post.

use futures_util::future::join_all;
use std::sync::Arc;

use super::{ClassifyOutcome, Notification, NotificationMessage, Subject, UnresolvedReason};
use crate::chain::{ChainError, ChainQuery, Lookup};
use crate::types::{Activity, ActivityEvent, BlogId, Comment, CommentId, Post, PostId};

/// Classifies notification-feed activities against the chain
pub struct NotificationClassifier {
    chain: Arc<dyn ChainQuery>,
}

impl NotificationClassifier {
    pub fn new(chain: Arc<dyn ChainQuery>) -> Self {
        Self { chain }
    }

    /// Classify a single activity
    pub async fn classify(&self, activity: &Activity) -> Result<ClassifyOutcome, ChainError> {
        let event = match activity.event() {
            Ok(event) => event,
            Err(e) => return Ok(unresolvable(activity, UnresolvedReason::Malformed(e))),
        };

        let outcome = match event {
            ActivityEvent::AccountFollowed => classified(
                activity,
                NotificationMessage::AccountFollowed,
                Subject::Account(activity.account.clone()),
                None,
            ),
            ActivityEvent::BlogFollowed { blog_id } => {
                self.classify_blog(activity, NotificationMessage::BlogFollowed, blog_id)
                    .await?
            }
            ActivityEvent::BlogCreated { blog_id } => {
                self.classify_blog(activity, NotificationMessage::BlogCreated, blog_id)
                    .await?
            }
            ActivityEvent::PostReactionCreated { post_id } => match self.resolve_post(post_id).await? {
                Ok(post) => post_notification(activity, NotificationMessage::PostReactionCreated, post),
                Err(reason) => unresolvable(activity, reason),
            },
            ActivityEvent::CommentCreated { comment_id } => {
                self.classify_comment(activity, comment_id, |is_reply| {
                    if is_reply {
                        NotificationMessage::CommentReactionCreated
                    } else {
                        NotificationMessage::CommentCreated
                    }
                })
                .await?
            }
            ActivityEvent::CommentReply { comment_id } => {
                self.classify_comment(activity, comment_id, |_| NotificationMessage::CommentReply)
                    .await?
            }
            ActivityEvent::CommentReactionCreated { comment_id } => {
                self.classify_comment(activity, comment_id, |_| {
                    NotificationMessage::CommentReactionCreated
                })
                .await?
            }
            ActivityEvent::PostCreated { .. } | ActivityEvent::PostShared { .. } => unresolvable(
                activity,
                UnresolvedReason::NotANotification(event.tag()),
            ),
        };

        if let ClassifyOutcome::Unresolvable { reason, .. } = &outcome {
            tracing::warn!(event = %activity.event, %reason, "notification unresolvable");
        }

        Ok(outcome)
    }

    /// Classify a page of activities, keeping input order
    ///
    /// Lookups for different activities run concurrently. The first chain
    /// failure fails the whole page.
    pub async fn classify_all(
        &self,
        activities: &[Activity],
    ) -> Result<Vec<ClassifyOutcome>, ChainError> {
        join_all(activities.iter().map(|activity| self.classify(activity)))
            .await
            .into_iter()
            .collect()
    }

    /// A missing blog still links to `blog_id`, just without a name
    async fn classify_blog(
        &self,
        activity: &Activity,
        message: NotificationMessage,
        blog_id: BlogId,
    ) -> Result<ClassifyOutcome, ChainError> {
        let name = match self.chain.blog(blog_id).await? {
            Lookup::Found(blog) => Some(blog.display_name()),
            Lookup::NotFound => {
                tracing::debug!(blog = %blog_id, "blog not found, leaving subject unnamed");
                None
            }
        };
        Ok(classified(activity, message, Subject::Blog(blog_id), name))
    }

    async fn classify_comment(
        &self,
        activity: &Activity,
        comment_id: CommentId,
        message_for: impl FnOnce(bool) -> NotificationMessage,
    ) -> Result<ClassifyOutcome, ChainError> {
        let comment = match self.chain.comment(comment_id).await? {
            Lookup::Found(comment) => comment,
            Lookup::NotFound => {
                return Ok(unresolvable(
                    activity,
                    UnresolvedReason::CommentNotFound(comment_id),
                ))
            }
        };

        let message = message_for(comment.is_reply());
        Ok(match self.resolve_post(comment.post_id).await? {
            Ok(post) => comment_notification(activity, message, &comment, post),
            Err(reason) => unresolvable(activity, reason),
        })
    }

    async fn resolve_post(&self, id: PostId) -> Result<Result<Post, UnresolvedReason>, ChainError> {
        Ok(match self.chain.post(id).await? {
            Lookup::Found(post) => Ok(post),
            Lookup::NotFound => Err(UnresolvedReason::PostNotFound(id)),
        })
    }
}

fn classified(
    activity: &Activity,
    message: NotificationMessage,
    subject: Subject,
    subject_title: Option<String>,
) -> ClassifyOutcome {
    ClassifyOutcome::Classified(Notification {
        actor: activity.account.clone(),
        message,
        subject,
        subject_title,
        date: activity.date,
        agg_count: activity.agg_count,
    })
}

fn post_notification(activity: &Activity, message: NotificationMessage, post: Post) -> ClassifyOutcome {
    classified(
        activity,
        message,
        Subject::Post(post.id),
        Some(post.display_title()),
    )
}

fn comment_notification(
    activity: &Activity,
    message: NotificationMessage,
    comment: &Comment,
    post: Post,
) -> ClassifyOutcome {
    classified(
        activity,
        message,
        Subject::Comment {
            post: post.id,
            comment: comment.id,
        },
        Some(post.display_title()),
    )
}

fn unresolvable(activity: &Activity, reason: UnresolvedReason) -> ClassifyOutcome {
    ClassifyOutcome::Unresolvable {
        activity: activity.clone(),
        reason,
    }
}
