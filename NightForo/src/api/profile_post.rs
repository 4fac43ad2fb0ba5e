//! Profile posts API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    check_optional_key, require_non_empty, ContentDeleteParams, ReactParams, ReactionResult,
    SuccessResult,
};
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::Result,
    models::{
        de::opt_bool_int, Direction, Pagination, ProfilePost, ProfilePostComment, ProfilePostId,
        UserId,
    },
};

/// Post on a user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePostCreateParams {
    /// Owner of the profile being posted on.
    pub user_id: UserId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

impl ProfilePostCreateParams {
    pub fn new(user_id: impl Into<UserId>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            attachment_key: None,
        }
    }
}

/// Options for fetching a profile post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePostGetParams {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub with_comments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Edit a profile post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePostUpdateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub author_alert: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_alert_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

/// Page of comments to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePostCommentsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Result of creating or editing a profile post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePostWriteResult {
    pub success: bool,
    pub profile_post: ProfilePost,
}

/// A profile post; `comments` and `pagination` come with `with_comments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePostDetailsResult {
    pub profile_post: ProfilePost,
    #[serde(default)]
    pub comments: Option<Vec<ProfilePostComment>>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A page of comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePostCommentsResult {
    pub comments: Vec<ProfilePostComment>,
    pub pagination: Pagination,
}

/// API for profile posts.
pub struct ProfilePostApi {
    client: Arc<NightForoClientInner>,
}

impl ProfilePostApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Post on a profile.
    pub async fn create(&self, params: ProfilePostCreateParams) -> Result<ProfilePostWriteResult> {
        require_non_empty("message", &params.message)?;
        check_optional_key(params.attachment_key.as_deref())?;
        self.client
            .send(endpoint::profile_posts(), Method::Post, &params)
            .await
    }

    /// Get a profile post.
    pub async fn get(
        &self,
        profile_post_id: impl Into<ProfilePostId>,
        params: ProfilePostGetParams,
    ) -> Result<ProfilePostDetailsResult> {
        self.client
            .send(endpoint::profile_post(profile_post_id.into()), Method::Get, &params)
            .await
    }

    /// Edit a profile post.
    pub async fn update(
        &self,
        profile_post_id: impl Into<ProfilePostId>,
        params: ProfilePostUpdateParams,
    ) -> Result<ProfilePostWriteResult> {
        check_optional_key(params.attachment_key.as_deref())?;
        self.client
            .send(endpoint::profile_post(profile_post_id.into()), Method::Post, &params)
            .await
    }

    /// Delete a profile post.
    pub async fn delete(
        &self,
        profile_post_id: impl Into<ProfilePostId>,
        params: ContentDeleteParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(
                endpoint::profile_post(profile_post_id.into()),
                Method::Delete,
                &params,
            )
            .await
    }

    /// Get a page of comments.
    pub async fn comments(
        &self,
        profile_post_id: impl Into<ProfilePostId>,
        params: ProfilePostCommentsParams,
    ) -> Result<ProfilePostCommentsResult> {
        self.client
            .send(
                endpoint::profile_post_comments_list(profile_post_id.into()),
                Method::Get,
                &params,
            )
            .await
    }

    /// React to a profile post.
    pub async fn react(
        &self,
        profile_post_id: impl Into<ProfilePostId>,
        params: ReactParams,
    ) -> Result<ReactionResult> {
        self.client
            .send(
                endpoint::profile_post_react(profile_post_id.into()),
                Method::Post,
                &params,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::StubTransport;
    use crate::client::RequestBody;
    use crate::models::fixtures;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_create() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "profile_post": fixtures::profile_post(7, 4)}),
        );
        let result = stub
            .client()
            .profile_posts()
            .create(ProfilePostCreateParams::new(4u64, "Welcome!"))
            .await
            .unwrap();
        assert_eq!(result.profile_post.profile_user_id, UserId(4));
        assert!(result.profile_post.latest_comments.is_empty());
        assert_eq!(
            stub.last_request().unwrap().body,
            RequestBody::Json(json!({"user_id": 4, "message": "Welcome!"}))
        );
    }

    #[tokio::test]
    async fn test_get_with_comments() {
        let stub = StubTransport::json(
            200,
            json!({
                "profile_post": fixtures::profile_post(7, 4),
                "comments": [fixtures::profile_post_comment(70, 7)],
                "pagination": fixtures::pagination(1, 1, 1)
            }),
        );
        let result = stub
            .client()
            .profile_posts()
            .get(
                7u64,
                ProfilePostGetParams {
                    with_comments: Some(true),
                    direction: Some(Direction::Asc),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let comments = result.comments.unwrap();
        assert_eq!(comments[0].profile_post_id, ProfilePostId(7));
        assert_eq!(
            stub.last_request().unwrap().query,
            vec![
                ("direction".to_owned(), "asc".to_owned()),
                ("with_comments".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_comments_page() {
        let stub = StubTransport::json(
            200,
            json!({"comments": [], "pagination": fixtures::pagination(3, 3, 41)}),
        );
        let result = stub
            .client()
            .profile_posts()
            .comments(
                7u64,
                ProfilePostCommentsParams {
                    page: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.comments.is_empty());
        assert_eq!(
            stub.last_request().unwrap().url.path(),
            "/api/profile-posts/7/comments"
        );
    }

    #[tokio::test]
    async fn test_soft_delete_with_reason() {
        let stub = StubTransport::json(200, json!({"success": true}));
        stub.client()
            .profile_posts()
            .delete(7u64, ContentDeleteParams::with_reason("off topic"))
            .await
            .unwrap();
        assert_eq!(
            stub.last_request().unwrap().query,
            vec![("reason".to_owned(), "off topic".to_owned())]
        );
    }
}
