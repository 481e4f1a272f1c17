//! Activity records
//!
//! `Activity` is the record exactly as the off-chain service sends it.
//! `ActivityEvent` is the typed view of the same record: one variant per
//! event kind, carrying only the ids that kind needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ActivityError;
use super::ids::{AccountId, BlogId, CommentId, PostId};

/// A feed entry as returned by the off-chain feed service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// The account that performed the action
    pub account: AccountId,
    /// Event tag, e.g. "BlogFollowed"
    pub event: String,
    /// When the event happened
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub comment_id: Option<String>,
    #[serde(default)]
    pub blog_id: Option<String>,
    /// Number of similar events folded into this one
    #[serde(default)]
    pub agg_count: u32,
}

/// Typed activity event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ActivityEvent {
    AccountFollowed,
    BlogFollowed { blog_id: BlogId },
    BlogCreated { blog_id: BlogId },
    PostCreated { post_id: PostId },
    PostShared { post_id: PostId },
    CommentCreated { comment_id: CommentId },
    CommentReply { comment_id: CommentId },
    PostReactionCreated { post_id: PostId },
    CommentReactionCreated { comment_id: CommentId },
}

impl ActivityEvent {
    /// The wire tag of this event kind
    pub fn tag(&self) -> &'static str {
        match self {
            ActivityEvent::AccountFollowed => "AccountFollowed",
            ActivityEvent::BlogFollowed { .. } => "BlogFollowed",
            ActivityEvent::BlogCreated { .. } => "BlogCreated",
            ActivityEvent::PostCreated { .. } => "PostCreated",
            ActivityEvent::PostShared { .. } => "PostShared",
            ActivityEvent::CommentCreated { .. } => "CommentCreated",
            ActivityEvent::CommentReply { .. } => "CommentReply",
            ActivityEvent::PostReactionCreated { .. } => "PostReactionCreated",
            ActivityEvent::CommentReactionCreated { .. } => "CommentReactionCreated",
        }
    }

    /// Post referenced directly by the event, if any
    pub fn post_id(&self) -> Option<PostId> {
        match self {
            ActivityEvent::PostCreated { post_id }
            | ActivityEvent::PostShared { post_id }
            | ActivityEvent::PostReactionCreated { post_id } => Some(*post_id),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Activity {
    /// Convert the wire record into a typed event
    pub fn event(&self) -> Result<ActivityEvent, ActivityError> {
        let event = match self.event.as_str() {
            "AccountFollowed" => ActivityEvent::AccountFollowed,
            "BlogFollowed" => ActivityEvent::BlogFollowed {
                blog_id: self.required_blog_id("BlogFollowed")?,
            },
            "BlogCreated" => ActivityEvent::BlogCreated {
                blog_id: self.required_blog_id("BlogCreated")?,
            },
            "PostCreated" => ActivityEvent::PostCreated {
                post_id: self.required_post_id("PostCreated")?,
            },
            "PostShared" => ActivityEvent::PostShared {
                post_id: self.required_post_id("PostShared")?,
            },
            "CommentCreated" => ActivityEvent::CommentCreated {
                comment_id: self.required_comment_id("CommentCreated")?,
            },
            "CommentReply" => ActivityEvent::CommentReply {
                comment_id: self.required_comment_id("CommentReply")?,
            },
            "PostReactionCreated" => ActivityEvent::PostReactionCreated {
                post_id: self.required_post_id("PostReactionCreated")?,
            },
            "CommentReactionCreated" => ActivityEvent::CommentReactionCreated {
                comment_id: self.required_comment_id("CommentReactionCreated")?,
            },
            other => return Err(ActivityError::UnknownEvent(other.to_string())),
        };
        Ok(event)
    }

    fn required_blog_id(&self, event: &'static str) -> Result<BlogId, ActivityError> {
        let raw = required(event, "blog_id", self.blog_id.as_deref())?;
        BlogId::from_hex(raw).map_err(|source| ActivityError::InvalidId {
            field: "blog_id",
            source,
        })
    }

    fn required_post_id(&self, event: &'static str) -> Result<PostId, ActivityError> {
        let raw = required(event, "post_id", self.post_id.as_deref())?;
        PostId::from_hex(raw).map_err(|source| ActivityError::InvalidId {
            field: "post_id",
            source,
        })
    }

    fn required_comment_id(&self, event: &'static str) -> Result<CommentId, ActivityError> {
        let raw = required(event, "comment_id", self.comment_id.as_deref())?;
        CommentId::from_hex(raw).map_err(|source| ActivityError::InvalidId {
            field: "comment_id",
            source,
        })
    }
}

fn required<'a>(
    event: &'static str,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ActivityError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ActivityError::MissingField { event, field }),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Build an activity with only the event tag set
    pub fn activity(event: &str) -> Activity {
        Activity {
            account: AccountId::new("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"),
            event: event.to_string(),
            date: Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 0).unwrap(),
            post_id: None,
            comment_id: None,
            blog_id: None,
            agg_count: 0,
        }
    }

    pub fn with_post(event: &str, post: u64) -> Activity {
        Activity {
            post_id: Some(PostId::new(post).to_hex()),
            ..activity(event)
        }
    }

    pub fn with_comment(event: &str, post: u64, comment: u64) -> Activity {
        Activity {
            post_id: Some(PostId::new(post).to_hex()),
            comment_id: Some(CommentId::new(comment).to_hex()),
            ..activity(event)
        }
    }

    pub fn with_blog(event: &str, blog: u64) -> Activity {
        Activity {
            blog_id: Some(BlogId::new(blog).to_hex()),
            ..activity(event)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_deserialize_wire_record() {
        let json = r#"{
            "account": "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
            "event": "CommentCreated",
            "date": "2020-05-01T12:00:00Z",
            "post_id": "0x05",
            "comment_id": "0x0c",
            "blog_id": null,
            "agg_count": 2
        }"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.agg_count, 2);
        assert_eq!(
            activity.event().unwrap(),
            ActivityEvent::CommentCreated {
                comment_id: CommentId::new(12)
            }
        );
    }

    #[test]
    fn test_event_carries_only_its_ids() {
        let event = with_blog("BlogFollowed", 7).event().unwrap();
        assert_eq!(event, ActivityEvent::BlogFollowed { blog_id: BlogId::new(7) });
        assert_eq!(event.post_id(), None);

        let event = with_post("PostReactionCreated", 3).event().unwrap();
        assert_eq!(event.post_id(), Some(PostId::new(3)));
        assert_eq!(event.tag(), "PostReactionCreated");
    }

    #[test]
    fn test_missing_and_unknown() {
        let err = activity("BlogCreated").event().unwrap_err();
        assert_eq!(
            err,
            ActivityError::MissingField {
                event: "BlogCreated",
                field: "blog_id"
            }
        );

        let err = activity("PostPinned").event().unwrap_err();
        assert!(matches!(err, ActivityError::UnknownEvent(tag) if tag == "PostPinned"));

        let mut bad = activity("PostShared");
        bad.post_id = Some("0xnothex".to_string());
        assert!(matches!(
            bad.event(),
            Err(ActivityError::InvalidId { field: "post_id", .. })
        ));
    }

    #[test]
    fn test_account_followed_needs_no_ids() {
        assert_eq!(
            activity("AccountFollowed").event().unwrap(),
            ActivityEvent::AccountFollowed
        );
    }
}
