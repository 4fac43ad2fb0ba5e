//! Profile posts and their comments.

use serde::{Deserialize, Serialize};

use super::{Attachment, DiscussionState, ProfilePostCommentId, ProfilePostId, User, UserId};

/// A message left on a member's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePost {
    pub profile_post_id: ProfilePostId,
    /// Owner of the profile the post was left on.
    pub profile_user_id: UserId,
    pub user_id: UserId,
    pub username: String,
    #[serde(rename = "User", default)]
    pub user: Option<User>,
    /// Owner of the profile, when included by context.
    #[serde(rename = "ProfileUser", default)]
    pub profile_user: Option<User>,
    #[serde(rename = "Attachments", default)]
    pub attachments: Vec<Attachment>,
    /// Most recent comments, when requested.
    #[serde(rename = "LatestComments", default)]
    pub latest_comments: Vec<ProfilePostComment>,

    pub message: String,
    #[serde(default)]
    pub message_parsed: Option<String>,
    pub message_state: DiscussionState,
    pub warning_message: String,
    pub view_url: String,
    pub post_date: i64,
    pub comment_count: u64,
    pub first_comment_date: i64,
    pub last_comment_date: i64,
    pub reaction_score: i64,
    pub is_reacted_to: bool,
    #[serde(default)]
    pub visitor_reaction_id: Option<u64>,

    pub can_edit: bool,
    pub can_soft_delete: bool,
    pub can_hard_delete: bool,
    pub can_react: bool,
    pub can_view_attachments: bool,
}

/// A comment on a profile post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePostComment {
    pub profile_post_comment_id: ProfilePostCommentId,
    pub profile_post_id: ProfilePostId,
    pub user_id: UserId,
    pub username: String,
    #[serde(rename = "User", default)]
    pub user: Option<User>,
    /// Parent profile post, when included by context.
    #[serde(rename = "ProfilePost", default)]
    pub profile_post: Option<Box<ProfilePost>>,
    #[serde(rename = "Attachments", default)]
    pub attachments: Vec<Attachment>,

    pub message: String,
    #[serde(default)]
    pub message_parsed: Option<String>,
    pub message_state: DiscussionState,
    pub warning_message: String,
    pub comment_date: i64,
    pub reaction_score: i64,
    pub is_reacted_to: bool,
    #[serde(default)]
    pub visitor_reaction_id: Option<u64>,

    pub can_edit: bool,
    pub can_soft_delete: bool,
    pub can_hard_delete: bool,
    pub can_react: bool,
    pub can_view_attachments: bool,
}
