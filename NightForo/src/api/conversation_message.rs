//! Conversation messages API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{check_optional_key, require_non_empty, ReactParams, ReactionResult};
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::Result,
    models::{ConversationId, ConversationMessage, ConversationMessageId},
};

/// Reply to a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessageReplyParams {
    pub conversation_id: ConversationId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

impl ConversationMessageReplyParams {
    pub fn new(conversation_id: impl Into<ConversationId>, message: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            message: message.into(),
            attachment_key: None,
        }
    }
}

/// Edit a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessageUpdateParams {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

impl ConversationMessageUpdateParams {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attachment_key: None,
        }
    }
}

/// A single message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessageResult {
    pub message: ConversationMessage,
}

/// Result of replying or editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessageWriteResult {
    pub success: bool,
    pub message: ConversationMessage,
}

/// API for individual conversation messages.
pub struct ConversationMessageApi {
    client: Arc<NightForoClientInner>,
}

impl ConversationMessageApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Reply to a conversation.
    pub async fn reply(
        &self,
        params: ConversationMessageReplyParams,
    ) -> Result<ConversationMessageWriteResult> {
        require_non_empty("message", &params.message)?;
        check_optional_key(params.attachment_key.as_deref())?;
        self.client
            .send(endpoint::conversation_messages(), Method::Post, &params)
            .await
    }

    /// Get a message.
    pub async fn get(
        &self,
        message_id: impl Into<ConversationMessageId>,
    ) -> Result<ConversationMessageResult> {
        self.client
            .send_empty(endpoint::conversation_message(message_id.into()), Method::Get)
            .await
    }

    /// Edit a message.
    pub async fn update(
        &self,
        message_id: impl Into<ConversationMessageId>,
        params: ConversationMessageUpdateParams,
    ) -> Result<ConversationMessageWriteResult> {
        check_optional_key(params.attachment_key.as_deref())?;
        self.client
            .send(
                endpoint::conversation_message(message_id.into()),
                Method::Post,
                &params,
            )
            .await
    }

    /// React to a message; reacting again with the same id removes it.
    pub async fn react(
        &self,
        message_id: impl Into<ConversationMessageId>,
        params: ReactParams,
    ) -> Result<ReactionResult> {
        self.client
            .send(
                endpoint::conversation_message_react(message_id.into()),
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
    use crate::models::{fixtures, ReactionAction};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_reply() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "message": fixtures::conversation_message(51, 3)}),
        );
        let result = stub
            .client()
            .conversation_messages()
            .reply(ConversationMessageReplyParams::new(3u64, "Thanks"))
            .await
            .unwrap();
        assert_eq!(result.message.message_id, ConversationMessageId(51));

        let request = stub.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/conversation-messages");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"conversation_id": 3, "message": "Thanks"}))
        );
    }

    #[tokio::test]
    async fn test_reply_rejects_empty_attachment_key() {
        let stub = StubTransport::json(200, json!({}));
        let mut params = ConversationMessageReplyParams::new(3u64, "Thanks");
        params.attachment_key = Some(String::new());
        let err = stub
            .client()
            .conversation_messages()
            .reply(params)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_react() {
        let stub = StubTransport::json(200, json!({"success": true, "action": "delete"}));
        let result = stub
            .client()
            .conversation_messages()
            .react(51u64, ReactParams::new(1))
            .await
            .unwrap();
        assert_eq!(result.action, ReactionAction::Delete);
        assert_eq!(
            stub.last_request().unwrap().url.path(),
            "/api/conversation-messages/51/react"
        );
    }

    #[tokio::test]
    async fn test_errors_payload() {
        let stub = StubTransport::json(
            200,
            json!({"errors": [{"code": "do_not_have_permission", "message": "No permission"}]}),
        );
        let err = stub.client().conversation_messages().get(51u64).await.unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
        assert_eq!(err.error_codes(), vec!["do_not_have_permission"]);
    }
}
