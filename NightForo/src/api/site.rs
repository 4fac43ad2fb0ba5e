//! Site information API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::Result,
    models::{ApiKey, LatestUser, OnlineStats, StatsTotals},
};

/// General site and API key information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResult {
    /// XenForo version, e.g. `2030070` for 2.3.0.
    pub version_id: u64,
    pub site_title: String,
    pub base_url: String,
    pub api_url: String,
    pub key: ApiKey,
}

/// Site statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResult {
    pub totals: StatsTotals,
    #[serde(default)]
    pub latest_user: Option<LatestUser>,
    pub online: OnlineStats,
}

/// API for site-wide information.
pub struct SiteApi {
    client: Arc<NightForoClientInner>,
}

impl SiteApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Site details and the key's scopes.
    pub async fn index(&self) -> Result<IndexResult> {
        self.client.send_empty(endpoint::index(), Method::Get).await
    }

    /// Content and online statistics.
    pub async fn stats(&self) -> Result<StatsResult> {
        self.client.send_empty(endpoint::stats(), Method::Get).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::StubTransport;
    use crate::error::Error;
    use crate::models::{ApiKeyType, UserId};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_index() {
        let stub = StubTransport::json(
            200,
            json!({
                "version_id": 2_030_070,
                "site_title": "Forum",
                "base_url": "https://forum.example",
                "api_url": "https://forum.example/api",
                "key": {
                    "type": "user",
                    "user_id": 1,
                    "allow_all_scopes": false,
                    "scopes": {"thread:read": true, "thread:write": false}
                }
            }),
        );
        let index = stub.client().site().index().await.unwrap();
        assert_eq!(index.key.key_type, ApiKeyType::User);
        assert_eq!(index.key.user_id, Some(UserId(1)));
        assert!(index.key.has_scope("thread:read"));
        assert!(!index.key.has_scope("thread:write"));
        assert_eq!(stub.last_request().unwrap().url.path(), "/api/index");
    }

    #[tokio::test]
    async fn test_stats() {
        let stub = StubTransport::json(
            200,
            json!({
                "totals": {"threads": 10, "messages": 250, "users": 42},
                "latest_user": {"user_id": 42, "username": "Newbie", "register_date": 1_700_000_000},
                "online": {"total": 5, "members": 2, "guests": 3}
            }),
        );
        let stats = stub.client().site().stats().await.unwrap();
        assert_eq!(stats.totals.messages, 250);
        assert_eq!(stats.latest_user.unwrap().username, "Newbie");
        assert_eq!(stats.online.guests, 3);
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let stub = StubTransport::raw(200, "<html>maintenance</html>");
        let err = stub.client().site().stats().await.unwrap_err();
        assert!(matches!(err, Error::MalformedBody { status: 200, .. }));
    }
}
