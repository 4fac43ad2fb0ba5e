//! Users API.
//!
//! Creating, updating and deleting users, and group promotion, need an admin
//! or super-user key.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::me::AVATAR_FIELD;
use super::{require_non_empty, SuccessResult};
use crate::{
    client::{NightForoClientInner, Upload},
    endpoint::{self, Method},
    error::{Error, Result},
    models::{
        de::{map_or_empty_list, opt_bool_int},
        DateOfBirth, Pagination, ProfilePost, User, UserGroupId, UserId, UserOptions,
        UserPrivacy, UserProfile, UserState,
    },
};

/// Page of users to list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersGetParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Register a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreateParams {
    pub username: String,
    pub email: String,
    pub password: String,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_group_id: Option<UserGroupId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_group_ids: Vec<UserGroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_state: Option<UserState>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub is_staff: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trophy_points: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub username_change_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<DateOfBirth>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
}

impl UserCreateParams {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            option: None,
            profile: None,
            privacy: None,
            visible: None,
            activity_visible: None,
            timezone: None,
            custom_title: None,
            user_group_id: None,
            secondary_group_ids: Vec::new(),
            user_state: None,
            is_staff: None,
            message_count: None,
            reaction_score: None,
            trophy_points: None,
            username_change_visible: None,
            dob: None,
            custom_fields: BTreeMap::new(),
        }
    }
}

/// Options for fetching a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGetParams {
    /// Include a page of profile posts.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub with_posts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Update a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdateParams {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_group_id: Option<UserGroupId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_group_ids: Vec<UserGroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_state: Option<UserState>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub is_staff: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trophy_points: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub username_change_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<DateOfBirth>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
}

/// Delete a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeleteParams {
    /// Keep the user's content under this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename_to: Option<String>,
}

/// Page of profile posts to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfilePostsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Group to add or remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupParams {
    pub group: UserGroupId,
}

impl UserGroupParams {
    pub fn new(group: impl Into<UserGroupId>) -> Self {
        Self {
            group: group.into(),
        }
    }
}

/// Exact e-mail lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersFindEmailParams {
    pub email: String,
}

impl UsersFindEmailParams {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Username prefix lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersFindNameParams {
    pub username: String,
}

impl UsersFindNameParams {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// A page of users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResult {
    pub users: Vec<User>,
    pub pagination: Pagination,
}

/// Result of creating or updating a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWriteResult {
    pub success: bool,
    pub user: User,
}

/// E-mail lookup; `user` is `None` when nobody matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindEmailResult {
    #[serde(default)]
    pub user: Option<User>,
}

/// Username lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindNameResult {
    #[serde(default)]
    pub exact: Option<User>,
    /// Users whose names start with the query.
    #[serde(default)]
    pub recommendations: Vec<User>,
}

/// A user; `profile_posts` and `pagination` come with `with_posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetailsResult {
    pub user: User,
    #[serde(default)]
    pub profile_posts: Option<Vec<ProfilePost>>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A page of profile posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePostsResult {
    pub profile_posts: Vec<ProfilePost>,
    pub pagination: Pagination,
}

/// Groups the key may grant or revoke, by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupsResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(deserialize_with = "map_or_empty_list")]
    pub groups: BTreeMap<UserGroupId, String>,
}

/// Result of a promotion or demotion; `groups` are the user's groups after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupChangeResult {
    pub success: bool,
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub groups: BTreeMap<UserGroupId, String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// API for forum members.
pub struct UserApi {
    client: Arc<NightForoClientInner>,
}

impl UserApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// List users.
    pub async fn list(&self, params: UsersGetParams) -> Result<UserListResult> {
        self.client.send(endpoint::users(), Method::Get, &params).await
    }

    /// Register a user.
    pub async fn create(&self, params: UserCreateParams) -> Result<UserWriteResult> {
        require_non_empty("username", &params.username)?;
        require_non_empty("email", &params.email)?;
        if params.password.is_empty() {
            return Err(Error::invalid("password must not be empty"));
        }
        self.client.send(endpoint::users(), Method::Post, &params).await
    }

    /// Find a user by e-mail address.
    pub async fn find_by_email(&self, params: UsersFindEmailParams) -> Result<FindEmailResult> {
        require_non_empty("email", &params.email)?;
        self.client
            .send(endpoint::users_find_email(), Method::Get, &params)
            .await
    }

    /// Find users by name prefix.
    pub async fn find_by_name(&self, params: UsersFindNameParams) -> Result<FindNameResult> {
        require_non_empty("username", &params.username)?;
        self.client
            .send(endpoint::users_find_name(), Method::Get, &params)
            .await
    }

    /// Get a user.
    pub async fn get(
        &self,
        user_id: impl Into<UserId>,
        params: UserGetParams,
    ) -> Result<UserDetailsResult> {
        self.client
            .send(endpoint::user(user_id.into()), Method::Get, &params)
            .await
    }

    /// Update a user.
    pub async fn update(
        &self,
        user_id: impl Into<UserId>,
        params: UserUpdateParams,
    ) -> Result<UserWriteResult> {
        self.client
            .send(endpoint::user(user_id.into()), Method::Post, &params)
            .await
    }

    /// Delete a user.
    pub async fn delete(
        &self,
        user_id: impl Into<UserId>,
        params: UserDeleteParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(endpoint::user(user_id.into()), Method::Delete, &params)
            .await
    }

    /// Replace a user's avatar.
    pub async fn update_avatar(
        &self,
        user_id: impl Into<UserId>,
        avatar: Upload,
    ) -> Result<SuccessResult> {
        self.client
            .send_multipart::<(), _>(
                endpoint::user_avatar(user_id.into()),
                Method::Post,
                None,
                vec![(AVATAR_FIELD.to_owned(), avatar)],
            )
            .await
    }

    /// Remove a user's avatar.
    pub async fn delete_avatar(&self, user_id: impl Into<UserId>) -> Result<SuccessResult> {
        self.client
            .send_empty(endpoint::user_avatar(user_id.into()), Method::Delete)
            .await
    }

    /// Get a page of posts on a user's profile.
    pub async fn profile_posts(
        &self,
        user_id: impl Into<UserId>,
        params: UserProfilePostsParams,
    ) -> Result<ProfilePostsResult> {
        self.client
            .send(endpoint::user_profile_posts(user_id.into()), Method::Get, &params)
            .await
    }

    /// Groups the key may grant.
    pub async fn promote_groups(&self) -> Result<GroupsResult> {
        self.client
            .send_empty(endpoint::promote_groups(), Method::Get)
            .await
    }

    /// Add a group to a user.
    pub async fn promote(
        &self,
        user_id: impl Into<UserId>,
        params: UserGroupParams,
    ) -> Result<GroupChangeResult> {
        self.client
            .send(endpoint::promote(user_id.into()), Method::Post, &params)
            .await
    }

    /// Groups the key may revoke.
    pub async fn demote_groups(&self) -> Result<GroupsResult> {
        self.client
            .send_empty(endpoint::demote_groups(), Method::Get)
            .await
    }

    /// Remove a group from a user.
    pub async fn demote(
        &self,
        user_id: impl Into<UserId>,
        params: UserGroupParams,
    ) -> Result<GroupChangeResult> {
        self.client
            .send(endpoint::demote(user_id.into()), Method::Post, &params)
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
    async fn test_find_by_email_no_match() {
        let stub = StubTransport::json(200, json!({}));
        let result = stub
            .client()
            .users()
            .find_by_email(UsersFindEmailParams::new("nobody@example.com"))
            .await
            .unwrap();
        assert_eq!(result.user, None);

        let request = stub.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/users/find-email");
        assert_eq!(
            request.query,
            vec![("email".to_owned(), "nobody@example.com".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_find_requires_value() {
        let stub = StubTransport::json(200, json!({}));
        let users = stub.client().users();
        assert!(matches!(
            users.find_by_email(UsersFindEmailParams::new("")).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            users.find_by_name(UsersFindNameParams::new(" ")).await,
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let stub = StubTransport::json(
            200,
            json!({"exact": fixtures::user(3, "Carol"), "recommendations": [fixtures::user(5, "Caroline")]}),
        );
        let result = stub
            .client()
            .users()
            .find_by_name(UsersFindNameParams::new("Carol"))
            .await
            .unwrap();
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.exact.unwrap().user_id, UserId(3));
        assert_eq!(
            stub.last_request().unwrap().query,
            vec![("username".to_owned(), "Carol".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_get_with_profile_posts() {
        let stub = StubTransport::json(
            200,
            json!({
                "user": fixtures::user(4, "Dana"),
                "profile_posts": [fixtures::profile_post(7, 4)],
                "pagination": fixtures::pagination(1, 1, 1)
            }),
        );
        let result = stub
            .client()
            .users()
            .get(
                4u64,
                UserGetParams {
                    with_posts: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.profile_posts.unwrap().len(), 1);
        assert_eq!(
            stub.last_request().unwrap().query,
            vec![("with_posts".to_owned(), "1".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_create_body() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "user": fixtures::user(9, "Eve")}),
        );
        let mut params = UserCreateParams::new("Eve", "eve@example.com", "pw");
        params.secondary_group_ids = vec![UserGroupId(3), UserGroupId(4)];
        params.is_staff = Some(false);
        let result = stub.client().users().create(params).await.unwrap();
        assert_eq!(result.user.username, "Eve");
        assert_eq!(
            stub.last_request().unwrap().body,
            RequestBody::Json(json!({
                "username": "Eve",
                "email": "eve@example.com",
                "password": "pw",
                "secondary_group_ids": [3, 4],
                "is_staff": 0
            }))
        );
    }

    #[tokio::test]
    async fn test_delete_rename() {
        let stub = StubTransport::json(200, json!({"success": true}));
        stub.client()
            .users()
            .delete(
                9u64,
                UserDeleteParams {
                    rename_to: Some("Deleted member".into()),
                },
            )
            .await
            .unwrap();
        let request = stub.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(
            request.query,
            vec![("rename_to".to_owned(), "Deleted member".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_groups() {
        let stub = StubTransport::json(
            200,
            json!({"success": true, "groups": {"2": "Registered", "12": "Helpers"}}),
        );
        let result = stub.client().users().promote_groups().await.unwrap();
        assert_eq!(result.groups.get(&UserGroupId(12)).map(String::as_str), Some("Helpers"));
        assert_eq!(stub.last_request().unwrap().url.path(), "/api/promote");
    }

    #[tokio::test]
    async fn test_demote_empty_groups() {
        let stub = StubTransport::json(200, json!({"success": true, "groups": []}));
        let result = stub
            .client()
            .users()
            .demote(4u64, UserGroupParams::new(12u64))
            .await
            .unwrap();
        assert!(result.groups.is_empty());
        assert!(result.user.is_none());

        let request = stub.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/demote/4");
        assert_eq!(request.body, RequestBody::Json(json!({"group": 12})));
    }

    #[tokio::test]
    async fn test_avatar_upload() {
        let stub = StubTransport::json(200, json!({"success": true}));
        stub.client()
            .users()
            .update_avatar(4u64, Upload::new("a.jpg", vec![1, 2]))
            .await
            .unwrap();
        let request = stub.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/users/4/avatar");
        assert!(matches!(request.body, RequestBody::Multipart(_)));
    }
}
