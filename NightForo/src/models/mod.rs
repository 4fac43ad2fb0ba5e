//! Data models for XenForo entities.

mod alert;
mod attachment;
mod common;
mod conversation;
pub mod de;
mod ids;
mod node;
mod post;
mod profile_post;
mod site;
mod thread;
mod user;

pub use alert::{AlertAction, UserAlert};
pub use attachment::Attachment;
pub use common::{ContentType, Direction, DiscussionState, Pagination, ReactionAction, VoteType};
pub use conversation::{Conversation, ConversationMessage};
pub use ids::{
    AlertId, AttachmentId, ConversationId, ConversationMessageId, NodeId, PostId,
    ProfilePostCommentId, ProfilePostId, ThreadId, UserGroupId, UserId,
};
pub use node::{
    Breadcrumb, ForumType, ForumTypeData, LinkForumTypeData, Node, NodeType, NodeTypeData,
    PageTypeData, SearchForumTypeData,
};
pub use post::Post;
pub use profile_post::{ProfilePost, ProfilePostComment};
pub use site::{ApiKey, ApiKeyType, LatestUser, OnlineStats, StatsTotals};
pub use thread::{Thread, ThreadOrder, ThreadType};
pub use user::{
    AvatarUrls, BannerUrls, DateOfBirth, PrivacyLevel, User, UserOptions, UserPrivacy,
    UserProfile, UserState,
};
