//! Posts API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    check_optional_key, require_non_empty, ContentDeleteParams, ReactParams, ReactionResult,
    SuccessResult, VoteParams,
};
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::Result,
    models::{de::opt_bool_int, Post, PostId, ThreadId},
};

/// Reply to a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreateParams {
    pub thread_id: ThreadId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

impl PostCreateParams {
    pub fn new(thread_id: impl Into<ThreadId>, message: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            message: message.into(),
            attachment_key: None,
        }
    }
}

/// Edit a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdateParams {
    pub message: String,
    /// Skip the "last edited" marker.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub silent: Option<bool>,
    /// Clear an existing "last edited" marker; needs `silent`.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub clear_edit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub author_alert: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_alert_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

impl PostUpdateParams {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            silent: None,
            clear_edit: None,
            author_alert: None,
            author_alert_reason: None,
            attachment_key: None,
        }
    }
}

/// A single post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResult {
    pub post: Post,
}

/// Result of creating or editing a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWriteResult {
    pub success: bool,
    pub post: Post,
}

/// Result of toggling a question solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionResult {
    pub success: bool,
    /// Set when the post became the solution.
    #[serde(default)]
    pub new_solution_post: Option<Post>,
    /// The solution that was replaced or unmarked.
    #[serde(default)]
    pub old_solution_post: Option<Post>,
}

/// API for thread posts.
pub struct PostApi {
    client: Arc<NightForoClientInner>,
}

impl PostApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Reply to a thread.
    pub async fn create(&self, params: PostCreateParams) -> Result<PostWriteResult> {
        require_non_empty("message", &params.message)?;
        check_optional_key(params.attachment_key.as_deref())?;
        self.client.send(endpoint::posts(), Method::Post, &params).await
    }

    /// Get a post.
    pub async fn get(&self, post_id: impl Into<PostId>) -> Result<PostResult> {
        self.client
            .send_empty(endpoint::post(post_id.into()), Method::Get)
            .await
    }

    /// Edit a post.
    pub async fn update(
        &self,
        post_id: impl Into<PostId>,
        params: PostUpdateParams,
    ) -> Result<PostWriteResult> {
        check_optional_key(params.attachment_key.as_deref())?;
        self.client
            .send(endpoint::post(post_id.into()), Method::Post, &params)
            .await
    }

    /// Delete a post.
    pub async fn delete(
        &self,
        post_id: impl Into<PostId>,
        params: ContentDeleteParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(endpoint::post(post_id.into()), Method::Delete, &params)
            .await
    }

    /// Toggle the post as the solution of its question thread.
    pub async fn mark_solution(&self, post_id: impl Into<PostId>) -> Result<SolutionResult> {
        self.client
            .send_empty(endpoint::post_mark_solution(post_id.into()), Method::Post)
            .await
    }

    /// React to a post.
    pub async fn react(
        &self,
        post_id: impl Into<PostId>,
        params: ReactParams,
    ) -> Result<ReactionResult> {
        self.client
            .send(endpoint::post_react(post_id.into()), Method::Post, &params)
            .await
    }

    /// Vote on a post in a question or suggestion thread.
    pub async fn vote(
        &self,
        post_id: impl Into<PostId>,
        params: VoteParams,
    ) -> Result<ReactionResult> {
        self.client
            .send(endpoint::post_vote(post_id.into()), Method::Post, &params)
            .await
    }
}
