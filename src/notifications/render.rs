//! Notification text

use super::{Notification, NotificationMessage};

impl NotificationMessage {
    /// Message shown after the actor's name
    pub fn text(&self) -> &'static str {
        match self {
            NotificationMessage::AccountFollowed => "followed your account",
            NotificationMessage::BlogFollowed => "followed your blog",
            NotificationMessage::BlogCreated => "created blog",
            NotificationMessage::CommentCreated => "commented on your post",
            NotificationMessage::CommentReply => "replied to your comment",
            NotificationMessage::PostReactionCreated => "reacted to your post",
            NotificationMessage::CommentReactionCreated => "reacted to your comment",
        }
    }
}

impl std::fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

impl Notification {
    pub fn message_text(&self) -> &'static str {
        self.message.text()
    }

    /// Accounts folded into this notification besides the actor
    pub fn others(&self) -> u32 {
        self.agg_count.saturating_sub(1)
    }

    /// One-line summary, e.g. `5Grwva...utQY and 2 other people reacted to your post "Hello"`
    pub fn summary(&self) -> String {
        let mut line = self.actor.short();

        match self.others() {
            0 => {}
            1 => line.push_str(" and 1 other person"),
            n => line.push_str(&format!(" and {} other people", n)),
        }

        line.push(' ');
        line.push_str(self.message.text());

        if let Some(title) = &self.subject_title {
            line.push_str(&format!(" \"{}\"", title));
        }

        line
    }
}
