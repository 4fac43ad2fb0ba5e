//! Post model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::{Attachment, DiscussionState, PostId, Thread, ThreadId, User, UserId, VoteType};

/// A post in a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub thread_id: ThreadId,
    pub user_id: UserId,
    pub username: String,
    /// Raw BB code.
    pub message: String,
    /// HTML rendering, when requested.
    #[serde(default)]
    pub message_parsed: Option<String>,
    #[serde(rename = "User", default)]
    pub user: Option<User>,
    /// Containing thread, when included by context.
    #[serde(rename = "Thread", default)]
    pub thread: Option<Box<Thread>>,
    #[serde(rename = "Attachments", default)]
    pub attachments: Option<Vec<Attachment>>,

    pub view_url: String,
    pub post_date: i64,
    pub last_edit_date: i64,
    pub message_state: DiscussionState,
    pub position: u64,
    pub attach_count: u32,
    pub warning_message: String,
    pub reaction_score: i64,
    pub is_first_post: bool,
    pub is_last_post: bool,
    pub is_unread: bool,
    pub is_reacted_to: bool,
    #[serde(default)]
    pub visitor_reaction_id: Option<u64>,

    pub can_edit: bool,
    pub can_soft_delete: bool,
    pub can_hard_delete: bool,
    pub can_react: bool,
    #[serde(default)]
    pub can_view_attachments: Option<bool>,

    #[serde(default)]
    pub vote_score: Option<i64>,
    #[serde(default)]
    pub can_content_vote: Option<bool>,
    #[serde(default)]
    pub allowed_content_vote_types: Option<Vec<VoteType>>,
    #[serde(default)]
    pub is_content_voted: Option<bool>,
    #[serde(default)]
    pub visitor_content_vote: Option<VoteType>,
}

impl Post {
    /// Creation time.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.post_date)
    }

    /// Last edit time, if the post was edited.
    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.last_edit_date)
    }
}
