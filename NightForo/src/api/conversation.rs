//! Conversations API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{check_optional_key, require_non_empty, SuccessResult};
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::{Error, Result},
    models::{
        de::{self, bool_int, opt_bool_int},
        Conversation, ConversationId, ConversationMessage, Pagination, UserId,
    },
};

/// Filters for listing conversations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationsGetParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub starred: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub unread: Option<bool>,
}

/// Start a new conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationCreateParams {
    pub recipient_ids: Vec<UserId>,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub conversation_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub open_invite: Option<bool>,
}

impl ConversationCreateParams {
    pub fn new(
        recipient_ids: impl IntoIterator<Item = UserId>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient_ids: recipient_ids.into_iter().collect(),
            title: title.into(),
            message: message.into(),
            attachment_key: None,
            conversation_open: None,
            open_invite: None,
        }
    }
}

/// Options for fetching a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationGetParams {
    /// Include a page of messages.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub with_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Update conversation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationUpdateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub open_invite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub conversation_open: Option<bool>,
}

/// Leave a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDeleteParams {
    /// Ignore future replies instead of rejoining on reply.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub ignore: Option<bool>,
}

/// Invite more users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationInviteParams {
    pub recipient_ids: Vec<UserId>,
}

impl ConversationInviteParams {
    pub fn new(recipient_ids: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            recipient_ids: recipient_ids.into_iter().collect(),
        }
    }
}

/// Mark read up to a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMarkReadParams {
    /// Unix timestamp; the forum uses the current time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
}

impl ConversationMarkReadParams {
    /// Mark read as of now.
    pub fn now() -> Self {
        Self {
            date: Some(de::now()),
        }
    }
}

/// Page of messages to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessagesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Star or unstar a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStarParams {
    #[serde(with = "bool_int")]
    pub star: bool,
}

impl ConversationStarParams {
    pub fn new(star: bool) -> Self {
        Self { star }
    }
}

/// A page of conversations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationListResult {
    pub conversations: Vec<Conversation>,
    pub pagination: Pagination,
}

/// Result of creating or updating a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationWriteResult {
    pub success: bool,
    pub conversation: Conversation,
}

/// A conversation, with messages when `with_messages` was set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetailsResult {
    pub conversation: Conversation,
    #[serde(default)]
    pub messages: Option<Vec<ConversationMessage>>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A page of conversation messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessagesResult {
    pub messages: Vec<ConversationMessage>,
    pub pagination: Pagination,
}

fn require_recipients(ids: &[UserId]) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::invalid("at least one recipient is required"));
    }
    Ok(())
}

/// API for conversations of the acting user.
pub struct ConversationApi {
    client: Arc<NightForoClientInner>,
}

impl ConversationApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// List conversations.
    pub async fn list(&self, params: ConversationsGetParams) -> Result<ConversationListResult> {
        self.client
            .send(endpoint::conversations(), Method::Get, &params)
            .await
    }

    /// Start a conversation.
    pub async fn create(&self, params: ConversationCreateParams) -> Result<ConversationWriteResult> {
        require_recipients(&params.recipient_ids)?;
        require_non_empty("title", &params.title)?;
        check_optional_key(params.attachment_key.as_deref())?;
        self.client
            .send(endpoint::conversations(), Method::Post, &params)
            .await
    }

    /// Get a conversation.
    pub async fn get(
        &self,
        conversation_id: impl Into<ConversationId>,
        params: ConversationGetParams,
    ) -> Result<ConversationDetailsResult> {
        self.client
            .send(endpoint::conversation(conversation_id.into()), Method::Get, &params)
            .await
    }

    /// Update a conversation.
    pub async fn update(
        &self,
        conversation_id: impl Into<ConversationId>,
        params: ConversationUpdateParams,
    ) -> Result<ConversationWriteResult> {
        self.client
            .send(endpoint::conversation(conversation_id.into()), Method::Post, &params)
            .await
    }

    /// Leave a conversation.
    pub async fn delete(
        &self,
        conversation_id: impl Into<ConversationId>,
        params: ConversationDeleteParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(endpoint::conversation(conversation_id.into()), Method::Delete, &params)
            .await
    }

    /// Invite users.
    pub async fn invite(
        &self,
        conversation_id: impl Into<ConversationId>,
        params: ConversationInviteParams,
    ) -> Result<SuccessResult> {
        require_recipients(&params.recipient_ids)?;
        self.client
            .send(
                endpoint::conversation_invite(conversation_id.into()),
                Method::Post,
                &params,
            )
            .await
    }

    /// Mark read.
    pub async fn mark_read(
        &self,
        conversation_id: impl Into<ConversationId>,
        params: ConversationMarkReadParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(
                endpoint::conversation_mark_read(conversation_id.into()),
                Method::Post,
                &params,
            )
            .await
    }

    /// Mark unread.
    pub async fn mark_unread(
        &self,
        conversation_id: impl Into<ConversationId>,
    ) -> Result<SuccessResult> {
        self.client
            .send_empty(
                endpoint::conversation_mark_unread(conversation_id.into()),
                Method::Post,
            )
            .await
    }

    /// Get a page of messages.
    pub async fn messages(
        &self,
        conversation_id: impl Into<ConversationId>,
        params: ConversationMessagesParams,
    ) -> Result<ConversationMessagesResult> {
        self.client
            .send(
                endpoint::conversation_messages_list(conversation_id.into()),
                Method::Get,
                &params,
            )
            .await
    }

    /// Star or unstar.
    pub async fn star(
        &self,
        conversation_id: impl Into<ConversationId>,
        params: ConversationStarParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(
                endpoint::conversation_star(conversation_id.into()),
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
    async fn test_create_requires_recipients() {
        let stub = StubTransport::json(200, json!({}));
        let err = stub
            .client()
            .conversations()
            .create(ConversationCreateParams::new([], "Hi", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = stub
            .client()
            .conversations()
            .invite(3u64, ConversationInviteParams::new([]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_create() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "conversation": fixtures::conversation(3, "Hi")}),
        );
        let mut params = ConversationCreateParams::new([UserId(2), UserId(5)], "Hi", "Hello");
        params.open_invite = Some(false);
        let result = stub.client().conversations().create(params).await.unwrap();
        assert!(result.success);
        assert_eq!(result.conversation.conversation_id, ConversationId(3));

        assert_eq!(
            stub.last_request().unwrap().body,
            RequestBody::Json(json!({
                "recipient_ids": [2, 5],
                "title": "Hi",
                "message": "Hello",
                "open_invite": 0
            }))
        );
    }

    #[tokio::test]
    async fn test_get_with_messages() {
        let stub = StubTransport::json(
            200,
            json!({
                "conversation": fixtures::conversation(3, "Hi"),
                "messages": [fixtures::conversation_message(50, 3)],
                "pagination": fixtures::pagination(1, 1, 1)
            }),
        );
        let result = stub
            .client()
            .conversations()
            .get(
                3u64,
                ConversationGetParams {
                    with_messages: Some(true),
                    page: Some(1),
                },
            )
            .await
            .unwrap();
        assert_eq!(result.messages.unwrap().len(), 1);
        assert!(result.pagination.is_some());

        let request = stub.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/conversations/3");
        assert_eq!(
            request.query,
            vec![
                ("page".to_owned(), "1".to_owned()),
                ("with_messages".to_owned(), "1".to_owned())
            ]
        );
    }

    #[tokio::test]
    async fn test_get_without_messages() {
        let stub = StubTransport::json(200, json!({"conversation": fixtures::conversation(3, "Hi")}));
        let result = stub
            .client()
            .conversations()
            .get(3u64, ConversationGetParams::default())
            .await
            .unwrap();
        assert!(result.messages.is_none());
        assert!(result.pagination.is_none());
    }

    #[tokio::test]
    async fn test_delete_uses_query() {
        let stub = StubTransport::json(200, json!({"success": true}));
        stub.client()
            .conversations()
            .delete(3u64, ConversationDeleteParams { ignore: Some(true) })
            .await
            .unwrap();
        let request = stub.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.query, vec![("ignore".to_owned(), "1".to_owned())]);
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn test_star_and_mark_unread() {
        let stub = StubTransport::json(200, json!({"success": true}));
        let conversations = stub.client().conversations();
        conversations
            .star(3u64, ConversationStarParams::new(false))
            .await
            .unwrap();
        assert_eq!(
            stub.last_request().unwrap().body,
            RequestBody::Json(json!({"star": 0}))
        );

        conversations.mark_unread(3u64).await.unwrap();
        let request = stub.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/conversations/3/mark-unread");
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn test_mark_read_now() {
        let params = ConversationMarkReadParams::now();
        assert!(params.date.unwrap() > 1_600_000_000);
        assert_eq!(
            serde_json::to_value(ConversationMarkReadParams::default()).unwrap(),
            json!({})
        );
    }
}
