//! User alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::{AlertId, ContentType, User, UserId};

/// What happened to trigger an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertAction {
    Insert,
    Award,
    Trophy,
    /// Any action not listed above (reactions, mentions, add-on actions).
    #[serde(other)]
    Other,
}

/// An alert delivered to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAlert {
    pub alert_id: AlertId,
    pub alerted_user_id: UserId,
    /// User that caused the alert.
    pub user_id: UserId,
    pub username: String,
    #[serde(rename = "User", default)]
    pub user: Option<User>,
    pub action: AlertAction,
    pub alert_text: String,
    pub alert_url: String,
    pub auto_read: bool,
    pub content_type: ContentType,
    pub content_id: u64,
    pub event_date: i64,
    pub read_date: i64,
    pub view_date: i64,
}

impl UserAlert {
    /// Check if the alert has not been read yet.
    pub fn is_unread(&self) -> bool {
        self.read_date == 0
    }

    /// Time the alert was raised.
    pub fn raised_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.event_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use serde_json::json;

    #[test]
    fn test_alert() {
        let alert: UserAlert = serde_json::from_value(fixtures::alert(5)).unwrap();
        assert_eq!(alert.alert_id, AlertId(5));
        assert_eq!(alert.action, AlertAction::Insert);
        assert_eq!(alert.content_type, ContentType::Post);
        assert!(alert.is_unread());
        assert!(alert.user.is_none());
    }

    #[test]
    fn test_unknown_action() {
        let mut raw = fixtures::alert(5);
        raw["action"] = json!("reaction");
        let alert: UserAlert = serde_json::from_value(raw).unwrap();
        assert_eq!(alert.action, AlertAction::Other);
    }
}
