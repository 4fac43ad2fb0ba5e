//! User model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de::{self, map_or_empty_list, opt_bool_int, string_or_false};
use super::{UserGroupId, UserId};

/// Account state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserState {
    #[default]
    Valid,
    EmailConfirm,
    EmailConfirmEdit,
    EmailBounce,
    Moderated,
    Rejected,
    Disabled,
}

/// Who may perform a profile-related action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    Everyone,
    Members,
    Followed,
    None,
}

/// Date of birth, as much of it as the user shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOfBirth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

/// Avatar URLs by size (`o`riginal, `h`igh, `l`arge, `m`edium, `s`mall).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarUrls {
    #[serde(default)]
    pub o: Option<String>,
    #[serde(default)]
    pub h: Option<String>,
    #[serde(default)]
    pub l: Option<String>,
    #[serde(default)]
    pub m: Option<String>,
    #[serde(default)]
    pub s: Option<String>,
}

impl AvatarUrls {
    /// The largest available avatar.
    pub fn largest(&self) -> Option<&str> {
        [&self.o, &self.h, &self.l, &self.m, &self.s]
            .into_iter()
            .find_map(|u| u.as_deref())
    }
}

/// Profile banner URLs by size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerUrls {
    #[serde(default)]
    pub l: Option<String>,
    #[serde(default)]
    pub m: Option<String>,
}

/// User preferences, as read from a user and written by update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_watch_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_watch_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub content_show_signature: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub email_on_conversation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub push_on_conversation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub receive_admin_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub show_dob_year: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub show_dob_date: Option<bool>,
}

/// Public profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Privacy settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrivacy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_view_profile: Option<PrivacyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_post_profile: Option<PrivacyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_receive_news_feed: Option<PrivacyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_send_personal_conversation: Option<PrivacyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_view_identities: Option<PrivacyLevel>,
}

/// A forum member.
///
/// Fields that are only present for privileged viewers (e-mail, options,
/// warning points, ...) are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub view_url: String,

    pub can_ban: bool,
    pub can_converse: bool,
    pub can_edit: bool,
    pub can_follow: bool,
    pub can_ignore: bool,
    pub can_post_profile: bool,
    pub can_view_profile: bool,
    pub can_view_profile_posts: bool,
    pub can_warn: bool,

    pub is_staff: bool,
    pub message_count: u64,
    pub question_solution_count: u64,
    pub reaction_score: i64,
    pub register_date: i64,
    pub trophy_points: u64,
    pub vote_score: i64,

    #[serde(default)]
    pub activity_visible: Option<bool>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub alert_optout: Option<Vec<String>>,
    #[serde(default)]
    pub allow_post_profile: Option<PrivacyLevel>,
    #[serde(default)]
    pub allow_receive_news_feed: Option<PrivacyLevel>,
    #[serde(default)]
    pub allow_send_personal_conversation: Option<PrivacyLevel>,
    #[serde(default)]
    pub allow_view_identities: Option<PrivacyLevel>,
    #[serde(default)]
    pub allow_view_profile: Option<PrivacyLevel>,
    #[serde(default)]
    pub avatar_urls: Option<AvatarUrls>,
    #[serde(default)]
    pub profile_banner_urls: Option<BannerUrls>,
    #[serde(default)]
    pub content_show_signature: Option<bool>,
    #[serde(default)]
    pub creation_watch_state: Option<String>,
    /// Site-specific custom profile fields.
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub dob: Option<DateOfBirth>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_on_conversation: Option<bool>,
    #[serde(default)]
    pub gravatar: Option<String>,
    #[serde(default)]
    pub interaction_watch_state: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub is_banned: Option<bool>,
    #[serde(default)]
    pub is_discouraged: Option<bool>,
    #[serde(default)]
    pub is_followed: Option<bool>,
    #[serde(default)]
    pub is_ignored: Option<bool>,
    #[serde(default)]
    pub is_moderator: Option<bool>,
    #[serde(default)]
    pub is_super_admin: Option<bool>,
    #[serde(default)]
    pub last_activity: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub push_on_conversation: Option<bool>,
    #[serde(default)]
    pub push_optout: Option<Vec<String>>,
    #[serde(default)]
    pub receive_admin_email: Option<bool>,
    #[serde(default)]
    pub secondary_group_ids: Option<Vec<UserGroupId>>,
    #[serde(default)]
    pub show_dob_date: Option<bool>,
    #[serde(default)]
    pub show_dob_year: Option<bool>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub use_tfa: Option<bool>,
    #[serde(default)]
    pub user_group_id: Option<UserGroupId>,
    #[serde(default)]
    pub user_state: Option<UserState>,
    /// Displayed user title; the forum sends `false` when there is none.
    #[serde(default, deserialize_with = "string_or_false")]
    pub user_title: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub warning_points: Option<u32>,
    #[serde(default)]
    pub website: Option<String>,
}

impl User {
    /// Registration time.
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        de::timestamp(self.register_date)
    }

    /// Last activity time, if visible.
    pub fn last_active_at(&self) -> Option<DateTime<Utc>> {
        self.last_activity.and_then(de::timestamp)
    }

    /// Check whether the user belongs to `group`, primary or secondary.
    pub fn in_group(&self, group: UserGroupId) -> bool {
        self.user_group_id == Some(group)
            || self
                .secondary_group_ids
                .as_ref()
                .is_some_and(|ids| ids.contains(&group))
    }

    /// Check if the user has moderator or admin powers.
    pub fn is_privileged(&self) -> bool {
        self.is_admin.unwrap_or(false)
            || self.is_moderator.unwrap_or(false)
            || self.is_super_admin.unwrap_or(false)
    }
}
