//! Current-user API.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{require_non_empty, SuccessResult};
use crate::{
    client::{NightForoClientInner, Upload},
    endpoint::{self, Method},
    error::{Error, Result},
    models::{de::opt_bool_int, User, UserOptions, UserPrivacy, UserProfile},
};

/// Multipart field carrying the avatar image.
pub(crate) const AVATAR_FIELD: &str = "avatar";

/// Update the acting user's account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeUpdateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<UserOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<UserPrivacy>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub activity_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
}

/// Change the e-mail address.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeEmailUpdateParams {
    pub current_password: String,
    pub email: String,
}

impl MeEmailUpdateParams {
    pub fn new(current_password: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            current_password: current_password.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Debug for MeEmailUpdateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeEmailUpdateParams")
            .field("current_password", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

/// Change the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MePasswordUpdateParams {
    pub current_password: String,
    pub new_password: String,
}

impl MePasswordUpdateParams {
    pub fn new(current_password: impl Into<String>, new_password: impl Into<String>) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
        }
    }
}

impl std::fmt::Debug for MePasswordUpdateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MePasswordUpdateParams").finish_non_exhaustive()
    }
}

/// The acting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResult {
    pub me: User,
}

/// Result of an e-mail change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailUpdateResult {
    pub success: bool,
    /// The new address must be confirmed before it takes effect.
    #[serde(default)]
    pub confirmation_required: bool,
}

/// API for the user the key acts as.
pub struct MeApi {
    client: Arc<NightForoClientInner>,
}

impl MeApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Get the acting user.
    pub async fn get(&self) -> Result<MeResult> {
        self.client.send_empty(endpoint::me(), Method::Get).await
    }

    /// Update account settings.
    pub async fn update(&self, params: MeUpdateParams) -> Result<SuccessResult> {
        self.client.send(endpoint::me(), Method::Post, &params).await
    }

    /// Upload a new avatar.
    pub async fn update_avatar(&self, avatar: Upload) -> Result<SuccessResult> {
        self.client
            .send_multipart::<(), _>(
                endpoint::me_avatar(),
                Method::Post,
                None,
                vec![(AVATAR_FIELD.to_owned(), avatar)],
            )
            .await
    }

    /// Remove the avatar.
    pub async fn delete_avatar(&self) -> Result<SuccessResult> {
        self.client
            .send_empty(endpoint::me_avatar(), Method::Delete)
            .await
    }

    /// Change the e-mail address.
    pub async fn update_email(&self, params: MeEmailUpdateParams) -> Result<EmailUpdateResult> {
        require_non_empty("email", &params.email)?;
        self.client
            .send(endpoint::me_email(), Method::Post, &params)
            .await
    }

    /// Change the password.
    pub async fn update_password(&self, params: MePasswordUpdateParams) -> Result<SuccessResult> {
        if params.new_password.is_empty() {
            return Err(Error::invalid("new password must not be empty"));
        }
        self.client
            .send(endpoint::me_password(), Method::Post, &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::StubTransport;
    use crate::client::RequestBody;
    use crate::models::{fixtures, PrivacyLevel};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_get() {
        let stub = StubTransport::json(200, json!({"me": fixtures::user(1, "Alice")}));
        let result = stub.client().me().get().await.unwrap();
        assert_eq!(result.me.username, "Alice");
        assert_eq!(result.me.user_title.as_deref(), Some("Member"));
    }

    #[tokio::test]
    async fn test_update_nested_body() {
        let stub = StubTransport::json(200, json!({"success": true}));
        let params = MeUpdateParams {
            profile: Some(UserProfile {
                location: Some("Moon".into()),
                ..Default::default()
            }),
            privacy: Some(UserPrivacy {
                allow_view_profile: Some(PrivacyLevel::Members),
                ..Default::default()
            }),
            visible: Some(false),
            ..Default::default()
        };
        stub.client().me().update(params).await.unwrap();
        assert_eq!(
            stub.last_request().unwrap().body,
            RequestBody::Json(json!({
                "profile": {"location": "Moon"},
                "privacy": {"allow_view_profile": "members"},
                "visible": 0
            }))
        );
    }

    #[tokio::test]
    async fn test_avatar() {
        let stub = StubTransport::json(200, json!({"success": true}));
        let me = stub.client().me();
        me.update_avatar(Upload::new("me.png", vec![0u8; 4]).mime("image/png"))
            .await
            .unwrap();
        match stub.last_request().unwrap().body {
            RequestBody::Multipart(form) => {
                assert!(form.fields.is_empty());
                assert_eq!(form.files[0].0, "avatar");
            }
            other => panic!("expected multipart, got {other:?}"),
        }

        me.delete_avatar().await.unwrap();
        let request = stub.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url.path(), "/api/me/avatar");
    }

    #[tokio::test]
    async fn test_update_email() {
        let stub = StubTransport::json(200, json!({"success": true, "confirmation_required": true}));
        let result = stub
            .client()
            .me()
            .update_email(MeEmailUpdateParams::new("pw", "new@example.com"))
            .await
            .unwrap();
        assert!(result.confirmation_required);

        let err = stub
            .client()
            .me()
            .update_email(MeEmailUpdateParams::new("pw", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let out = format!("{:?}", MePasswordUpdateParams::new("old-secret", "new-secret"));
        assert!(!out.contains("secret"));
    }
}
