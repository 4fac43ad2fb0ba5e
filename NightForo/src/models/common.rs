//! Shared enumerations and the pagination block.

use serde::{Deserialize, Serialize};

/// Content vote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

/// Visibility state of a discussion or message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscussionState {
    #[default]
    Visible,
    Deleted,
    Moderated,
}

/// What a react or vote call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Insert,
    Delete,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Type of content an alert or attachment refers to.
///
/// Content types added by add-ons decode as [`ContentType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Post,
    Thread,
    User,
    Trophy,
    UsernameChange,
    Str,
    Contact,
    ConversationMessage,
    ProfilePost,
    ProfilePostComment,
    #[serde(other)]
    Unknown,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub shown: u32,
    pub total: u64,
}

impl Pagination {
    /// Check if there are pages after the current one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}
