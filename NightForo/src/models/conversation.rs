//! Direct conversations and their messages.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de::{self, map_or_empty_list};
use super::{Attachment, ConversationId, ConversationMessageId, User, UserId};

/// A private conversation between members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: ConversationId,
    pub title: String,
    /// Starter's user id and name.
    pub user_id: UserId,
    pub username: String,
    #[serde(rename = "Starter", default)]
    pub starter: Option<User>,
    /// Recipient ids mapped to their names.
    #[serde(deserialize_with = "map_or_empty_list")]
    pub recipients: BTreeMap<UserId, String>,
    pub recipient_count: u32,

    pub view_url: String,
    pub start_date: i64,
    pub open_invite: bool,
    pub conversation_open: bool,
    pub reply_count: u64,
    pub first_message_id: ConversationMessageId,
    pub last_message_date: i64,
    pub last_message_id: ConversationMessageId,
    pub last_message_user_id: UserId,

    pub is_starred: bool,
    #[serde(default)]
    pub is_unread: Option<bool>,
    pub can_edit: bool,
    pub can_reply: bool,
    pub can_invite: bool,
    pub can_upload_attachment: bool,
}

impl Conversation {
    /// Start time.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.start_date)
    }

    /// Time of the latest message.
    pub fn last_message_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.last_message_date)
    }
}

/// A message inside a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub message_id: ConversationMessageId,
    pub conversation_id: ConversationId,
    pub user_id: UserId,
    pub username: String,
    #[serde(rename = "User", default)]
    pub user: Option<User>,
    /// Containing conversation, when included by context.
    #[serde(rename = "Conversation", default)]
    pub conversation: Option<Conversation>,
    #[serde(rename = "Attachments", default)]
    pub attachments: Option<Vec<Attachment>>,

    pub message: String,
    pub message_parsed: String,
    pub message_date: i64,
    pub view_url: String,
    pub attach_count: u32,
    pub reaction_score: i64,
    #[serde(default)]
    pub is_unread: Option<bool>,
    pub is_reacted_to: bool,
    #[serde(default)]
    pub visitor_reaction_id: Option<u64>,
    pub can_edit: bool,
    pub can_react: bool,
}

impl ConversationMessage {
    /// Send time.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.message_date)
    }
}
