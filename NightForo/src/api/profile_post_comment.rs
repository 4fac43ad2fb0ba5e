//! Profile post comments API.

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
    models::{de::opt_bool_int, ProfilePostComment, ProfilePostCommentId, ProfilePostId},
};

/// Comment on a profile post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePostCommentCreateParams {
    pub profile_post_id: ProfilePostId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

impl ProfilePostCommentCreateParams {
    pub fn new(profile_post_id: impl Into<ProfilePostId>, message: impl Into<String>) -> Self {
        Self {
            profile_post_id: profile_post_id.into(),
            message: message.into(),
            attachment_key: None,
        }
    }
}

/// Edit a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePostCommentUpdateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub author_alert: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_alert_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

/// A single comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResult {
    pub comment: ProfilePostComment,
}

/// Result of creating or editing a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentWriteResult {
    pub success: bool,
    pub comment: ProfilePostComment,
}

/// API for comments on profile posts.
pub struct ProfilePostCommentApi {
    client: Arc<NightForoClientInner>,
}

impl ProfilePostCommentApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Add a comment.
    pub async fn create(&self, params: ProfilePostCommentCreateParams) -> Result<CommentWriteResult> {
        require_non_empty("message", &params.message)?;
        check_optional_key(params.attachment_key.as_deref())?;
        self.client
            .send(endpoint::profile_post_comments(), Method::Post, &params)
            .await
    }

    /// Get a comment.
    pub async fn get(&self, comment_id: impl Into<ProfilePostCommentId>) -> Result<CommentResult> {
        self.client
            .send_empty(endpoint::profile_post_comment(comment_id.into()), Method::Get)
            .await
    }

    /// Edit a comment.
    pub async fn update(
        &self,
        comment_id: impl Into<ProfilePostCommentId>,
        params: ProfilePostCommentUpdateParams,
    ) -> Result<CommentWriteResult> {
        check_optional_key(params.attachment_key.as_deref())?;
        self.client
            .send(
                endpoint::profile_post_comment(comment_id.into()),
                Method::Post,
                &params,
            )
            .await
    }

    /// Delete a comment.
    pub async fn delete(
        &self,
        comment_id: impl Into<ProfilePostCommentId>,
        params: ContentDeleteParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(
                endpoint::profile_post_comment(comment_id.into()),
                Method::Delete,
                &params,
            )
            .await
    }

    /// React to a comment.
    pub async fn react(
        &self,
        comment_id: impl Into<ProfilePostCommentId>,
        params: ReactParams,
    ) -> Result<ReactionResult> {
        self.client
            .send(
                endpoint::profile_post_comment_react(comment_id.into()),
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
    use crate::error::Error;
    use crate::models::fixtures;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_create() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "comment": fixtures::profile_post_comment(70, 7)}),
        );
        let result = stub
            .client()
            .profile_post_comments()
            .create(ProfilePostCommentCreateParams::new(7u64, "Thanks"))
            .await
            .unwrap();
        assert_eq!(result.comment.profile_post_comment_id, ProfilePostCommentId(70));
        assert_eq!(result.comment.user.unwrap().username, "Bob");
        assert_eq!(
            stub.last_request().unwrap().url.path(),
            "/api/profile-post-comments"
        );
    }

    #[tokio::test]
    async fn test_update() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "comment": fixtures::profile_post_comment(70, 7)}),
        );
        stub.client()
            .profile_post_comments()
            .update(
                70u64,
                ProfilePostCommentUpdateParams {
                    message: Some("Edited".into()),
                    author_alert: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            stub.last_request().unwrap().body,
            RequestBody::Json(json!({"message": "Edited", "author_alert": 1}))
        );
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let stub = StubTransport::json(
            404,
            json!({"errors": [{"code": "requested_comment_not_found", "message": "Not found"}]}),
        );
        let err = stub
            .client()
            .profile_post_comments()
            .get(70u64)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http { status: 404, .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_params_round_trip() {
        let params = ProfilePostCommentUpdateParams {
            message: Some("x".into()),
            author_alert: Some(false),
            author_alert_reason: Some("typo".into()),
            attachment_key: None,
        };
        let value = serde_json::to_value(&params).unwrap();
        let back: ProfilePostCommentUpdateParams = serde_json::from_value(value).unwrap();
        assert_eq!(back, params);
    }
}
