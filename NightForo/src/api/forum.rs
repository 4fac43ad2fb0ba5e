//! Forums API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::SuccessResult;
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::Result,
    models::{
        de::{self, opt_bool_int},
        Direction, Node, NodeId, Pagination, Thread, ThreadOrder, ThreadType, UserId,
    },
};

/// Get a forum, optionally with a page of its threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumGetParams {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub with_threads: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub unread: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_type: Option<ThreadType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<ThreadOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Mark a forum read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumMarkReadParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
}

impl ForumMarkReadParams {
    /// Mark read as of now.
    pub fn now() -> Self {
        Self {
            date: Some(de::now()),
        }
    }
}

/// Filters for a forum's thread list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumThreadsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub unread: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_type: Option<ThreadType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<ThreadOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// A forum node; `threads`, `sticky` and `pagination` come with `with_threads`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumDetailsResult {
    pub forum: Node,
    #[serde(default)]
    pub threads: Option<Vec<Thread>>,
    #[serde(default)]
    pub sticky: Option<Vec<Thread>>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A page of threads; stickies only appear on the first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumThreadsResult {
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub sticky: Option<Vec<Thread>>,
    pub pagination: Pagination,
}

/// API for forum nodes.
pub struct ForumApi {
    client: Arc<NightForoClientInner>,
}

impl ForumApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Get a forum.
    pub async fn get(
        &self,
        forum_id: impl Into<NodeId>,
        params: ForumGetParams,
    ) -> Result<ForumDetailsResult> {
        self.client
            .send(endpoint::forum(forum_id.into()), Method::Get, &params)
            .await
    }

    /// Mark a forum read.
    pub async fn mark_read(
        &self,
        forum_id: impl Into<NodeId>,
        params: ForumMarkReadParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(endpoint::forum_mark_read(forum_id.into()), Method::Post, &params)
            .await
    }

    /// List threads in a forum.
    pub async fn threads(
        &self,
        forum_id: impl Into<NodeId>,
        params: ForumThreadsParams,
    ) -> Result<ForumThreadsResult> {
        self.client
            .send(endpoint::forum_threads(forum_id.into()), Method::Get, &params)
            .await
    }
}
