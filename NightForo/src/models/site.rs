//! Site-wide information: API key details and statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::de::map_or_empty_list;
use super::UserId;

/// API key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyType {
    User,
    #[serde(rename = "superuser")]
    SuperUser,
    Guest,
}

/// The API key used for the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    #[serde(rename = "type")]
    pub key_type: ApiKeyType,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub allow_all_scopes: bool,
    /// Granted scopes, e.g. `thread:read`.
    #[serde(deserialize_with = "map_or_empty_list")]
    pub scopes: BTreeMap<String, bool>,
}

impl ApiKey {
    /// Check if the key grants `scope`.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.allow_all_scopes || self.scopes.get(scope).copied().unwrap_or(false)
    }
}

/// Content totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTotals {
    #[serde(alias = "thread")]
    pub threads: u64,
    pub messages: u64,
    pub users: u64,
}

/// Newest registered member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestUser {
    pub user_id: UserId,
    pub username: String,
    pub register_date: i64,
}

/// Users currently online.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineStats {
    pub total: u64,
    pub members: u64,
    pub guests: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_key_scopes() {
        let key: ApiKey = serde_json::from_value(json!({
            "type": "superuser",
            "user_id": null,
            "allow_all_scopes": false,
            "scopes": {"thread:read": true, "thread:write": false}
        }))
        .unwrap();
        assert_eq!(key.key_type, ApiKeyType::SuperUser);
        assert!(key.has_scope("thread:read"));
        assert!(!key.has_scope("thread:write"));
        assert!(!key.has_scope("user:read"));

        let key: ApiKey = serde_json::from_value(json!({
            "type": "guest", "allow_all_scopes": true, "scopes": []
        }))
        .unwrap();
        assert!(key.has_scope("anything"));
    }
}
