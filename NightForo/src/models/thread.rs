//! Thread model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de::{self, map_or_empty_list};
use super::{DiscussionState, Node, NodeId, PostId, ThreadId, User, UserId, VoteType};

/// Thread (discussion) type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadType {
    #[default]
    Discussion,
    Redirect,
    Question,
    Poll,
    Suggestion,
    Article,
}

/// Thread list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadOrder {
    #[default]
    LastPostDate,
    PostDate,
    Title,
    ReplyCount,
    ViewCount,
    VoteScore,
    FirstPostReactionScore,
}

/// A forum thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub thread_id: ThreadId,
    pub node_id: NodeId,
    pub title: String,
    pub username: String,
    pub user_id: UserId,
    /// Thread starter; absent when the account no longer exists.
    #[serde(rename = "User", default)]
    pub user: Option<User>,
    /// Parent forum, when included by context.
    #[serde(rename = "Forum", default)]
    pub forum: Option<Node>,

    pub view_url: String,
    pub discussion_state: DiscussionState,
    pub discussion_open: bool,
    pub discussion_type: ThreadType,
    pub sticky: bool,
    pub prefix_id: u64,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "map_or_empty_list")]
    pub custom_fields: BTreeMap<String, serde_json::Value>,

    pub reply_count: u64,
    pub view_count: u64,
    pub post_date: i64,
    pub first_post_id: PostId,
    pub first_post_reaction_score: i64,
    pub last_post_date: i64,
    pub last_post_id: PostId,
    pub last_post_user_id: UserId,
    pub last_post_username: String,
    pub is_first_post_pinned: bool,
    pub highlighted_post_ids: Vec<PostId>,

    pub can_edit: bool,
    pub can_edit_tags: bool,
    pub can_reply: bool,
    pub can_soft_delete: bool,
    pub can_hard_delete: bool,
    pub can_view_attachments: bool,

    #[serde(default)]
    pub is_watching: Option<bool>,
    #[serde(default)]
    pub is_unread: Option<bool>,
    #[serde(default)]
    pub visitor_post_count: Option<u64>,
    #[serde(default)]
    pub is_search_engine_indexable: Option<bool>,
    #[serde(default)]
    pub index_state: Option<String>,
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

impl Thread {
    /// Creation time.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.post_date)
    }

    /// Time of the latest reply.
    pub fn last_post_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.last_post_date)
    }

    /// Check if the thread is visible and open for replies.
    pub fn is_open(&self) -> bool {
        self.discussion_open && self.discussion_state == DiscussionState::Visible
    }
}
