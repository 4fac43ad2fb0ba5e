//! API key credentials.

use crate::error::{Error, Result};
use crate::models::UserId;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "XF-Api-Key";
/// Header carrying the acting user in super-user mode.
pub const API_USER_HEADER: &str = "XF-Api-User";

/// Credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key.
    pub api_key: String,
    /// Acting user for super-user keys.
    pub acting_user: Option<UserId>,
    /// Whether requests are made on behalf of `acting_user`.
    pub super_user: bool,
}

impl Credentials {
    /// Credentials for a user or guest key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            acting_user: None,
            super_user: false,
        }
    }

    /// Credentials for a super-user key acting as `user_id`.
    pub fn super_user(api_key: impl Into<String>, user_id: impl Into<UserId>) -> Self {
        Self {
            api_key: api_key.into(),
            acting_user: Some(user_id.into()),
            super_user: true,
        }
    }

    /// Check that the credentials are usable.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::config("API key must not be empty"));
        }
        match (self.super_user, self.acting_user) {
            (true, None) => Err(Error::config("super-user mode requires an acting user id")),
            (false, Some(id)) => Err(Error::config(format!(
                "acting user {} given without super-user mode",
                id
            ))),
            _ => Ok(()),
        }
    }

    /// Header pairs to send with every request.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![(API_KEY_HEADER, self.api_key.clone())];
        if let (true, Some(id)) = (self.super_user, self.acting_user) {
            headers.push((API_USER_HEADER, id.to_string()));
        }
        headers
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("acting_user", &self.acting_user)
            .field("super_user", &self.super_user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validity() {
        assert!(Credentials::new("key").validate().is_ok());
        assert!(Credentials::super_user("key", 1u64).validate().is_ok());

        assert!(matches!(Credentials::new("").validate(), Err(Error::Config(_))));
        assert!(matches!(Credentials::new("   ").validate(), Err(Error::Config(_))));

        let mut creds = Credentials::new("key");
        creds.super_user = true;
        assert!(matches!(creds.validate(), Err(Error::Config(_))));

        let mut creds = Credentials::new("key");
        creds.acting_user = Some(UserId(3));
        assert!(matches!(creds.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_headers() {
        let headers = Credentials::new("abc").headers();
        assert_eq!(headers, vec![(API_KEY_HEADER, "abc".to_owned())]);

        let headers = Credentials::super_user("abc", 7u64).headers();
        assert_eq!(
            headers,
            vec![
                (API_KEY_HEADER, "abc".to_owned()),
                (API_USER_HEADER, "7".to_owned())
            ]
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let out = format!("{:?}", Credentials::new("secret-key"));
        assert!(!out.contains("secret-key"));
    }
}
