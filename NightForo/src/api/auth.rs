//! Authentication API.
//!
//! These endpoints require a super-user key with the `auth` scope.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_non_empty;
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::{Error, Result},
    models::{de, de::opt_bool_int, User, UserId},
};

/// Check a login/password pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTestParams {
    pub login: String,
    pub password: String,
    /// IP address the login is made from, used for rate limiting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_ip: Option<String>,
}

impl AuthTestParams {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            limit_ip: None,
        }
    }
}

impl std::fmt::Debug for AuthTestParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTestParams")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("limit_ip", &self.limit_ip)
            .finish()
    }
}

/// Look up the user behind a browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFromSessionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_cookie: Option<String>,
}

/// Create a one-time login token for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthLoginTokenParams {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Log in even if the visitor is already logged in as someone else.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub force: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub remember: Option<bool>,
}

impl AuthLoginTokenParams {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            limit_ip: None,
            return_url: None,
            force: None,
            remember: None,
        }
    }
}

/// The user matching the tested credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTestResult {
    pub user: User,
}

/// Session lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSessionResult {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// A one-time login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginTokenResult {
    pub login_token: String,
    pub login_url: String,
    pub expiry_date: i64,
}

impl LoginTokenResult {
    /// Expiry time of the token.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.expiry_date)
    }
}

/// API for credential checks and login tokens.
pub struct AuthApi {
    client: Arc<NightForoClientInner>,
}

impl AuthApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Test a login and password.
    pub async fn test(&self, params: AuthTestParams) -> Result<AuthTestResult> {
        require_non_empty("login", &params.login)?;
        if params.password.is_empty() {
            return Err(Error::invalid("password must not be empty"));
        }
        self.client.send(endpoint::auth(), Method::Post, &params).await
    }

    /// Find the user behind a session id or remember cookie.
    pub async fn from_session(&self, params: AuthFromSessionParams) -> Result<AuthSessionResult> {
        if params.session_id.is_none() && params.remember_cookie.is_none() {
            return Err(Error::invalid(
                "either session_id or remember_cookie is required",
            ));
        }
        self.client
            .send(endpoint::auth_from_session(), Method::Post, &params)
            .await
    }

    /// Generate a login token.
    pub async fn login_token(&self, params: AuthLoginTokenParams) -> Result<LoginTokenResult> {
        self.client
            .send(endpoint::auth_login_token(), Method::Post, &params)
            .await
    }
}
