//! Threads API.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{check_optional_key, require_non_empty, ReactionResult, SuccessResult, VoteParams};
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::Result,
    models::{
        de::{self, opt_bool_int},
        Direction, NodeId, Pagination, Post, Thread, ThreadId, ThreadOrder, ThreadType, UserId,
    },
};

/// Filters for listing threads across all forums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadsGetParams {
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

/// Start a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadCreateParams {
    pub node_id: NodeId,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion_type: Option<ThreadType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub discussion_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub sticky: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

impl ThreadCreateParams {
    pub fn new(
        node_id: impl Into<NodeId>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            title: title.into(),
            message: message.into(),
            discussion_type: None,
            prefix_id: None,
            tags: Vec::new(),
            custom_fields: BTreeMap::new(),
            discussion_open: None,
            sticky: None,
            attachment_key: None,
        }
    }
}

/// Options for fetching a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadGetParams {
    /// Include a page of posts.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub with_posts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub with_first_post: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub with_last_post: Option<bool>,
    /// Post order, e.g. `post_date` or `vote_score`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// Update a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadUpdateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub discussion_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub sticky: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_tags: Vec<String>,
}

/// Delete a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDeleteParams {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub hard_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub starter_alert: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_alert_reason: Option<String>,
}

/// Convert a thread to another type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadChangeTypeParams {
    pub new_thread_type_id: ThreadType,
}

impl ThreadChangeTypeParams {
    pub fn new(new_thread_type_id: ThreadType) -> Self {
        Self { new_thread_type_id }
    }
}

/// Mark a thread read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMarkReadParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
}

impl ThreadMarkReadParams {
    /// Mark read as of now.
    pub fn now() -> Self {
        Self {
            date: Some(de::now()),
        }
    }
}

/// Move a thread to another forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMoveParams {
    pub target_node_id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub notify_watchers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub starter_alert: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_alert_reason: Option<String>,
}

impl ThreadMoveParams {
    pub fn new(target_node_id: impl Into<NodeId>) -> Self {
        Self {
            target_node_id: target_node_id.into(),
            prefix_id: None,
            title: None,
            notify_watchers: None,
            starter_alert: None,
            starter_alert_reason: None,
        }
    }
}

/// Page of posts to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadPostsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Post order, e.g. `post_date` or `vote_score`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// A page of threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadListResult {
    pub threads: Vec<Thread>,
    pub pagination: Pagination,
}

/// Result of creating, updating, moving or retyping a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadWriteResult {
    pub success: bool,
    pub thread: Thread,
}

/// A thread with whatever extras were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadDetailsResult {
    pub thread: Thread,
    /// First unread post, with `with_posts`.
    #[serde(default)]
    pub first_unread: Option<Post>,
    /// With `with_first_post`.
    #[serde(default)]
    pub first_post: Option<Post>,
    /// With `with_last_post`.
    #[serde(default)]
    pub last_post: Option<Post>,
    #[serde(default)]
    pub pinned_post: Option<Post>,
    #[serde(default)]
    pub highlighted_posts: Option<Vec<Post>>,
    /// With `with_posts`.
    #[serde(default)]
    pub posts: Option<Vec<Post>>,
    /// With `with_posts`.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A page of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadPostsResult {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

/// API for threads.
pub struct ThreadApi {
    client: Arc<NightForoClientInner>,
}

impl ThreadApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// List threads.
    pub async fn list(&self, params: ThreadsGetParams) -> Result<ThreadListResult> {
        self.client.send(endpoint::threads(), Method::Get, &params).await
    }

    /// Start a thread.
    pub async fn create(&self, params: ThreadCreateParams) -> Result<ThreadWriteResult> {
        require_non_empty("title", &params.title)?;
        require_non_empty("message", &params.message)?;
        check_optional_key(params.attachment_key.as_deref())?;
        self.client.send(endpoint::threads(), Method::Post, &params).await
    }

    /// Get a thread.
    pub async fn get(
        &self,
        thread_id: impl Into<ThreadId>,
        params: ThreadGetParams,
    ) -> Result<ThreadDetailsResult> {
        self.client
            .send(endpoint::thread(thread_id.into()), Method::Get, &params)
            .await
    }

    /// Update a thread.
    pub async fn update(
        &self,
        thread_id: impl Into<ThreadId>,
        params: ThreadUpdateParams,
    ) -> Result<ThreadWriteResult> {
        self.client
            .send(endpoint::thread(thread_id.into()), Method::Post, &params)
            .await
    }

    /// Delete a thread.
    pub async fn delete(
        &self,
        thread_id: impl Into<ThreadId>,
        params: ThreadDeleteParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(endpoint::thread(thread_id.into()), Method::Delete, &params)
            .await
    }

    /// Change the thread type.
    pub async fn change_type(
        &self,
        thread_id: impl Into<ThreadId>,
        params: ThreadChangeTypeParams,
    ) -> Result<ThreadWriteResult> {
        self.client
            .send(endpoint::thread_change_type(thread_id.into()), Method::Post, &params)
            .await
    }

    /// Mark a thread read.
    pub async fn mark_read(
        &self,
        thread_id: impl Into<ThreadId>,
        params: ThreadMarkReadParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(endpoint::thread_mark_read(thread_id.into()), Method::Post, &params)
            .await
    }

    /// Move a thread to another forum.
    pub async fn move_to(
        &self,
        thread_id: impl Into<ThreadId>,
        params: ThreadMoveParams,
    ) -> Result<ThreadWriteResult> {
        self.client
            .send(endpoint::thread_move(thread_id.into()), Method::Post, &params)
            .await
    }

    /// Get a page of posts.
    pub async fn posts(
        &self,
        thread_id: impl Into<ThreadId>,
        params: ThreadPostsParams,
    ) -> Result<ThreadPostsResult> {
        self.client
            .send(endpoint::thread_posts(thread_id.into()), Method::Get, &params)
            .await
    }

    /// Vote on a question or suggestion thread.
    pub async fn vote(
        &self,
        thread_id: impl Into<ThreadId>,
        params: VoteParams,
    ) -> Result<ReactionResult> {
        self.client
            .send(endpoint::thread_vote(thread_id.into()), Method::Post, &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::StubTransport;
    use crate::client::RequestBody;
    use crate::error::Error;
    use crate::models::{fixtures, PostId};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_with_posts() {
        let stub = StubTransport::json(
            200,
            json!({
                "thread": fixtures::thread(10, "Hello"),
                "posts": [fixtures::post(100, 10), fixtures::post(101, 10)],
                "pagination": fixtures::pagination(1, 1, 2)
            }),
        );
        let result = stub
            .client()
            .threads()
            .get(
                10u64,
                ThreadGetParams {
                    with_posts: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(result.thread.thread_id, ThreadId(10));
        assert_eq!(result.thread.user.as_ref().unwrap().username, "Starter");
        let posts = result.posts.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].post_id, PostId(101));
        assert_eq!(result.pagination.unwrap().total, 2);
        assert!(result.first_post.is_none());

        let request = stub.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/threads/10");
        assert_eq!(request.query, vec![("with_posts".to_owned(), "1".to_owned())]);
    }

    #[tokio::test]
    async fn test_list() {
        let stub = StubTransport::json(
            200,
            json!({"threads": [fixtures::thread(10, "Hello")], "pagination": fixtures::pagination(1, 5, 100)}),
        );
        let result = stub
            .client()
            .threads()
            .list(ThreadsGetParams {
                order: Some(ThreadOrder::ReplyCount),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.threads[0].discussion_type, ThreadType::Discussion);
        assert_eq!(
            stub.last_request().unwrap().query,
            vec![("order".to_owned(), "reply_count".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_create_body() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "thread": fixtures::thread(11, "New")}),
        );
        let mut params = ThreadCreateParams::new(2u64, "New", "Body");
        params.tags = vec!["rust".into(), "api".into()];
        params.sticky = Some(true);
        stub.client().threads().create(params).await.unwrap();
        assert_eq!(
            stub.last_request().unwrap().body,
            RequestBody::Json(json!({
                "node_id": 2,
                "title": "New",
                "message": "Body",
                "tags": ["rust", "api"],
                "sticky": 1
            }))
        );
    }

    #[tokio::test]
    async fn test_create_empty_title() {
        let stub = StubTransport::json(200, json!({}));
        let err = stub
            .client()
            .threads()
            .create(ThreadCreateParams::new(2u64, " ", "Body"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_query_tags() {
        let stub = StubTransport::json(200, json!({"success": true}));
        stub.client()
            .threads()
            .delete(
                10u64,
                ThreadDeleteParams {
                    starter_alert: Some(true),
                    starter_alert_reason: Some("dupe".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            stub.last_request().unwrap().query,
            vec![
                ("starter_alert".to_owned(), "1".to_owned()),
                ("starter_alert_reason".to_owned(), "dupe".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_move_and_change_type() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "thread": fixtures::thread(10, "Hello")}),
        );
        let threads = stub.client().threads();

        let mut params = ThreadMoveParams::new(5u64);
        params.notify_watchers = Some(true);
        threads.move_to(10u64, params).await.unwrap();
        let request = stub.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/threads/10/move");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"target_node_id": 5, "notify_watchers": 1}))
        );

        threads
            .change_type(10u64, ThreadChangeTypeParams::new(ThreadType::Question))
            .await
            .unwrap();
        assert_eq!(
            stub.last_request().unwrap().body,
            RequestBody::Json(json!({"new_thread_type_id": "question"}))
        );
    }

    #[tokio::test]
    async fn test_mark_read_default_sends_empty_object() {
        let stub = StubTransport::json(200, json!({"success": true}));
        stub.client()
            .threads()
            .mark_read(10u64, ThreadMarkReadParams::default())
            .await
            .unwrap();
        assert_eq!(stub.last_request().unwrap().body, RequestBody::Json(json!({})));
    }

    #[test]
    fn test_update_params_round_trip() {
        let params = ThreadUpdateParams {
            title: Some("Renamed".into()),
            discussion_open: Some(false),
            add_tags: vec!["solved".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({"title": "Renamed", "discussion_open": 0, "add_tags": ["solved"]})
        );
        let back: ThreadUpdateParams = serde_json::from_value(value).unwrap();
        assert_eq!(back, params);
    }
}
