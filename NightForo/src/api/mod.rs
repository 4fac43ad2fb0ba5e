//! API modules, one per endpoint group.

mod alert;
mod attachment;
mod auth;
mod conversation;
mod conversation_message;
mod forum;
mod me;
mod node;
mod post;
mod profile_post;
mod profile_post_comment;
mod site;
mod thread;
mod user;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{de::opt_bool_int, ReactionAction, VoteType};

pub use alert::{
    AlertApi, AlertListResult, AlertMarkParams, AlertResult, AlertSendParams, AlertsGetParams,
    AlertsMarkAllParams,
};
pub use attachment::{
    AttachmentApi, AttachmentData, AttachmentKeyParams, AttachmentKeyResult,
    AttachmentListResult, AttachmentResult, AttachmentThumbnail, AttachmentUploadParams,
    AttachmentsGetParams,
};
pub use auth::{
    AuthApi, AuthFromSessionParams, AuthLoginTokenParams, AuthSessionResult, AuthTestParams,
    AuthTestResult, LoginTokenResult,
};
pub use conversation::{
    ConversationApi, ConversationCreateParams, ConversationDeleteParams,
    ConversationDetailsResult, ConversationGetParams, ConversationInviteParams,
    ConversationListResult, ConversationMarkReadParams, ConversationMessagesParams,
    ConversationMessagesResult, ConversationStarParams, ConversationUpdateParams,
    ConversationWriteResult, ConversationsGetParams,
};
pub use conversation_message::{
    ConversationMessageApi, ConversationMessageReplyParams, ConversationMessageResult,
    ConversationMessageUpdateParams, ConversationMessageWriteResult,
};
pub use forum::{
    ForumApi, ForumDetailsResult, ForumGetParams, ForumMarkReadParams, ForumThreadsParams,
    ForumThreadsResult,
};
pub use me::{
    EmailUpdateResult, MeApi, MeEmailUpdateParams, MePasswordUpdateParams, MeResult,
    MeUpdateParams,
};
pub use node::{
    FlatNode, FlattenedNodesResult, NodeApi, NodeCreateData, NodeCreateParams, NodeDeleteParams,
    NodeResult, NodeTreeResult, NodeUpdateData, NodeUpdateParams,
};
pub use post::{
    PostApi, PostCreateParams, PostResult, PostUpdateParams, PostWriteResult, SolutionResult,
};
pub use profile_post::{
    ProfilePostApi, ProfilePostCommentsParams, ProfilePostCommentsResult,
    ProfilePostCreateParams, ProfilePostDetailsResult, ProfilePostGetParams,
    ProfilePostUpdateParams, ProfilePostWriteResult,
};
pub use profile_post_comment::{
    CommentResult, CommentWriteResult, ProfilePostCommentApi, ProfilePostCommentCreateParams,
    ProfilePostCommentUpdateParams,
};
pub use site::{IndexResult, SiteApi, StatsResult};
pub use thread::{
    ThreadApi, ThreadChangeTypeParams, ThreadCreateParams, ThreadDeleteParams,
    ThreadDetailsResult, ThreadGetParams, ThreadListResult, ThreadMarkReadParams,
    ThreadMoveParams, ThreadPostsParams, ThreadPostsResult, ThreadUpdateParams,
    ThreadWriteResult, ThreadsGetParams,
};
pub use user::{
    FindEmailResult, FindNameResult, GroupChangeResult, GroupsResult, ProfilePostsResult,
    UserApi, UserCreateParams, UserDeleteParams, UserDetailsResult, UserGetParams,
    UserGroupParams, UserListResult, UserProfilePostsParams, UserUpdateParams, UserWriteResult,
    UsersFindEmailParams, UsersFindNameParams, UsersGetParams,
};

/// Bare `{"success": ...}` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResult {
    pub success: bool,
}

/// Response of react and vote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionResult {
    pub success: bool,
    pub action: ReactionAction,
}

/// React to content with a reaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactParams {
    pub reaction_id: u64,
}

impl ReactParams {
    pub fn new(reaction_id: u64) -> Self {
        Self { reaction_id }
    }
}

/// Up- or down-vote content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteParams {
    #[serde(rename = "type")]
    pub vote_type: VoteType,
}

impl VoteParams {
    pub fn up() -> Self {
        Self {
            vote_type: VoteType::Up,
        }
    }

    pub fn down() -> Self {
        Self {
            vote_type: VoteType::Down,
        }
    }
}

/// Soft or hard deletion of a post, profile post or comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDeleteParams {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub hard_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub author_alert: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_alert_reason: Option<String>,
}

impl ContentDeleteParams {
    /// Permanently delete instead of soft-deleting.
    pub fn hard() -> Self {
        Self {
            hard_delete: Some(true),
            ..Default::default()
        }
    }

    /// Soft-delete with a reason.
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Default::default()
        }
    }
}

/// Reject an empty attachment key before it reaches the forum.
pub(crate) fn require_key(key: &str) -> Result<()> {
    require_non_empty("attachment key", key)
}

pub(crate) fn require_non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid(format!("{what} must not be empty")));
    }
    Ok(())
}

pub(crate) fn check_optional_key(key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => require_key(key),
        None => Ok(()),
    }
}
