//! Alerts API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{require_non_empty, SuccessResult};
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::Result,
    models::{de::opt_bool_int, AlertId, Pagination, UserAlert, UserId},
};

/// Filters for listing alerts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertsGetParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Only alerts newer than this many days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub unviewed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub unread: Option<bool>,
}

/// Send a custom alert to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSendParams {
    pub to_user_id: UserId,
    /// Alert text; `{link}` is replaced by the link.
    pub alert: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_title: Option<String>,
}

impl AlertSendParams {
    pub fn new(to_user_id: impl Into<UserId>, alert: impl Into<String>) -> Self {
        Self {
            to_user_id: to_user_id.into(),
            alert: alert.into(),
            from_user_id: None,
            link_url: None,
            link_title: None,
        }
    }

    /// Attach a link to the alert.
    pub fn link(mut self, url: impl Into<String>, title: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self.link_title = Some(title.into());
        self
    }
}

/// Mark all alerts read and/or viewed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertsMarkAllParams {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub viewed: Option<bool>,
}

/// Change the state of a single alert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMarkParams {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub unread: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub viewed: Option<bool>,
}

/// A page of alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertListResult {
    pub alerts: Vec<UserAlert>,
    pub pagination: Pagination,
}

/// A single alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertResult {
    pub alert: UserAlert,
}

/// API for alerts of the acting user.
pub struct AlertApi {
    client: Arc<NightForoClientInner>,
}

impl AlertApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// List alerts.
    pub async fn list(&self, params: AlertsGetParams) -> Result<AlertListResult> {
        self.client.send(endpoint::alerts(), Method::Get, &params).await
    }

    /// Send an alert to a user.
    pub async fn send(&self, params: AlertSendParams) -> Result<SuccessResult> {
        require_non_empty("alert text", &params.alert)?;
        self.client.send(endpoint::alerts(), Method::Post, &params).await
    }

    /// Mark all alerts.
    pub async fn mark_all(&self, params: AlertsMarkAllParams) -> Result<SuccessResult> {
        self.client
            .send(endpoint::alerts_mark_all(), Method::Post, &params)
            .await
    }

    /// Get one alert.
    pub async fn get(&self, alert_id: impl Into<AlertId>) -> Result<AlertResult> {
        self.client
            .send_empty(endpoint::alert(alert_id.into()), Method::Get)
            .await
    }

    /// Mark one alert.
    pub async fn mark(
        &self,
        alert_id: impl Into<AlertId>,
        params: AlertMarkParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(endpoint::alert_mark(alert_id.into()), Method::Post, &params)
            .await
    }
}
