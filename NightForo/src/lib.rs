//! Typed async client for the XenForo REST API.
//!
//! ```no_run
//! # async fn run() -> nightforo::Result<()> {
//! use nightforo::{NightForoClient, ThreadGetParams};
//!
//! let client = NightForoClient::builder()
//!     .api_key("your-api-key")
//!     .base_url("https://forum.example.com/api/")
//!     .build()?;
//!
//! let thread = client
//!     .threads()
//!     .get(1234u64, ThreadGetParams { with_posts: Some(true), ..Default::default() })
//!     .await?;
//! println!("{}: {} posts", thread.thread.title, thread.posts.unwrap_or_default().len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;

// Re-export main types
pub use client::{
    Credentials, HttpConfig, NightForoClient, NightForoClientBuilder, RawResponse,
    ReqwestTransport, Transport, Upload,
};
pub use endpoint::{Endpoint, Method};
pub use error::{ApiErrorDetail, Error, Result};

// Re-export commonly used models
pub use models::{
    AlertId, Attachment, AttachmentId, ContentType, Conversation, ConversationId,
    ConversationMessage, ConversationMessageId, Direction, Node, NodeId, NodeType, Pagination,
    Post, PostId, ProfilePost, ProfilePostComment, ProfilePostCommentId, ProfilePostId, Thread,
    ThreadId, ThreadOrder, ThreadType, User, UserAlert, UserGroupId, UserId, VoteType,
};

// Re-export API types
pub use api::{
    AlertsGetParams, ContentDeleteParams, ConversationCreateParams, ConversationsGetParams,
    ForumGetParams, ReactParams, ReactionResult, SuccessResult, ThreadCreateParams,
    ThreadGetParams, ThreadsGetParams, UserGetParams, UsersFindEmailParams, UsersFindNameParams,
    VoteParams,
};
