//! Client, configuration and request dispatch.

mod auth;
mod http;
#[cfg(test)]
pub(crate) mod testing;

pub use auth::{Credentials, API_KEY_HEADER, API_USER_HEADER};
pub use http::{
    build_client, flatten_query, ApiRequest, HttpConfig, MultipartForm, RawResponse, RequestBody,
    ReqwestTransport, Transport, Upload, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

use crate::api::{
    AlertApi, AttachmentApi, AuthApi, ConversationApi, ConversationMessageApi, ForumApi, MeApi,
    NodeApi, PostApi, ProfilePostApi, ProfilePostCommentApi, SiteApi, ThreadApi, UserApi,
};
use crate::endpoint::{Endpoint, Method};
use crate::error::{Error, Result};
use crate::models::UserId;
pub(crate) use http::{check_status, normalize};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builder for creating [`NightForoClient`].
pub struct NightForoClientBuilder {
    api_key: Option<String>,
    acting_user: Option<UserId>,
    super_user: bool,
    http_config: HttpConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl std::fmt::Debug for NightForoClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NightForoClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("acting_user", &self.acting_user)
            .field("super_user", &self.super_user)
            .field("http_config", &self.http_config)
            .field("transport", &self.transport.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Default for NightForoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NightForoClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            api_key: None,
            acting_user: None,
            super_user: false,
            http_config: HttpConfig::default(),
            transport: None,
        }
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Use a super-user key acting as `user_id`.
    pub fn super_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.acting_user = Some(user_id.into());
        self.super_user = true;
        self
    }

    /// Set the acting user without touching the super-user flag.
    pub fn acting_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.acting_user = Some(user_id.into());
        self
    }

    /// Toggle super-user mode.
    pub fn super_user_mode(mut self, enabled: bool) -> Self {
        self.super_user = enabled;
        self
    }

    /// Set all credentials at once.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.api_key = Some(credentials.api_key);
        self.acting_user = credentials.acting_user;
        self.super_user = credentials.super_user;
        self
    }

    /// Set base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.http_config.base_url = url.into();
        self
    }

    /// Set custom user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.http_config.user_agent = ua.into();
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = Some(timeout);
        self
    }

    /// Set whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    /// Replace the HTTP configuration.
    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Use a custom transport instead of the reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<NightForoClient> {
        let credentials = Credentials {
            api_key: self.api_key.unwrap_or_default(),
            acting_user: self.acting_user,
            super_user: self.super_user,
        };
        credentials.validate()?;

        let base = self.http_config.base()?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.http_config)?),
        };

        Ok(NightForoClient {
            inner: Arc::new(NightForoClientInner {
                transport,
                config: self.http_config,
                base,
                credentials,
            }),
        })
    }
}

/// Internal client state.
pub(crate) struct NightForoClientInner {
    transport: Arc<dyn Transport>,
    config: HttpConfig,
    base: Url,
    credentials: Credentials,
}

/// Serialize a parameter object for dispatch.
pub(crate) fn encode<P: Serialize + ?Sized>(params: &P) -> Result<Value> {
    serde_json::to_value(params).map_err(Error::Encode)
}

/// Decode a payload into a typed response.
pub(crate) fn decode<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|source| Error::Deserialize { source })
}

impl NightForoClientInner {
    fn prepare(
        &self,
        endpoint: &Endpoint,
        method: Method,
        params: Option<Value>,
        files: Vec<(String, Upload)>,
    ) -> Result<ApiRequest> {
        if !endpoint.allows(method) {
            return Err(Error::UnsupportedMethod {
                method,
                path: endpoint.path().to_owned(),
            });
        }

        let url = self.base.join(endpoint.path())?;
        let mut headers = self.credentials.headers();
        headers.push(("User-Agent", self.config.user_agent.clone()));

        let mut query = Vec::new();
        let body = if !files.is_empty() {
            let fields = match &params {
                Some(params) => flatten_query(params)?,
                None => Vec::new(),
            };
            RequestBody::Multipart(MultipartForm { fields, files })
        } else {
            match params {
                None => RequestBody::Empty,
                Some(params) if method.uses_query() => {
                    query = flatten_query(&params)?;
                    RequestBody::Empty
                }
                Some(params) => RequestBody::Json(params),
            }
        };

        Ok(ApiRequest {
            method,
            url,
            headers,
            query,
            body,
        })
    }

    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        log::debug!("{} {}", request.method, request.url);
        let method = request.method;
        let url = request.url.clone();

        let response = self.transport.execute(request).await?;
        log::trace!(
            "{} {} -> {} ({} bytes)",
            method,
            url,
            response.status,
            response.body.len()
        );
        Ok(response)
    }

    /// Dispatch and normalize into a JSON payload.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        method: Method,
        params: Option<Value>,
    ) -> Result<Value> {
        let request = self.prepare(endpoint, method, params, Vec::new())?;
        normalize(self.execute(request).await?)
    }

    /// Dispatch with a parameter object and decode the payload.
    pub async fn send<P, T>(&self, endpoint: Endpoint, method: Method, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = self.call(&endpoint, method, Some(encode(params)?)).await?;
        decode(payload)
    }

    /// Dispatch without parameters and decode the payload.
    pub async fn send_empty<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        method: Method,
    ) -> Result<T> {
        let payload = self.call(&endpoint, method, None).await?;
        decode(payload)
    }

    /// Dispatch a multipart upload and decode the payload.
    pub async fn send_multipart<P, T>(
        &self,
        endpoint: Endpoint,
        method: Method,
        params: Option<&P>,
        files: Vec<(String, Upload)>,
    ) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let params = params.map(encode).transpose()?;
        let request = self.prepare(&endpoint, method, params, files)?;
        decode(normalize(self.execute(request).await?)?)
    }

    /// Dispatch and hand back the raw response, status unchecked.
    pub async fn send_raw(&self, endpoint: Endpoint, method: Method) -> Result<RawResponse> {
        let request = self.prepare(&endpoint, method, None, Vec::new())?;
        self.execute(request).await
    }
}

/// XenForo API client.
///
/// Cheap to clone; clones share the same transport and credentials.
#[derive(Clone)]
pub struct NightForoClient {
    pub(crate) inner: Arc<NightForoClientInner>,
}

impl NightForoClient {
    /// Create a new client builder.
    pub fn builder() -> NightForoClientBuilder {
        NightForoClientBuilder::new()
    }

    /// Create a client with the default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Send a request to any endpoint and return the raw JSON payload.
    pub async fn request_json(
        &self,
        endpoint: Endpoint,
        method: Method,
        params: Option<Value>,
    ) -> Result<Value> {
        self.inner.call(&endpoint, method, params).await
    }

    /// Get the alerts API.
    pub fn alerts(&self) -> AlertApi {
        AlertApi::new(self.inner.clone())
    }

    /// Get the attachments API.
    pub fn attachments(&self) -> AttachmentApi {
        AttachmentApi::new(self.inner.clone())
    }

    /// Get the auth API.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.inner.clone())
    }

    /// Get the conversation messages API.
    pub fn conversation_messages(&self) -> ConversationMessageApi {
        ConversationMessageApi::new(self.inner.clone())
    }

    /// Get the conversations API.
    pub fn conversations(&self) -> ConversationApi {
        ConversationApi::new(self.inner.clone())
    }

    /// Get the forums API.
    pub fn forums(&self) -> ForumApi {
        ForumApi::new(self.inner.clone())
    }

    /// Get the site API (index, stats).
    pub fn site(&self) -> SiteApi {
        SiteApi::new(self.inner.clone())
    }

    /// Get the current user API.
    pub fn me(&self) -> MeApi {
        MeApi::new(self.inner.clone())
    }

    /// Get the nodes API.
    pub fn nodes(&self) -> NodeApi {
        NodeApi::new(self.inner.clone())
    }

    /// Get the posts API.
    pub fn posts(&self) -> PostApi {
        PostApi::new(self.inner.clone())
    }

    /// Get the profile post comments API.
    pub fn profile_post_comments(&self) -> ProfilePostCommentApi {
        ProfilePostCommentApi::new(self.inner.clone())
    }

    /// Get the profile posts API.
    pub fn profile_posts(&self) -> ProfilePostApi {
        ProfilePostApi::new(self.inner.clone())
    }

    /// Get the threads API.
    pub fn threads(&self) -> ThreadApi {
        ThreadApi::new(self.inner.clone())
    }

    /// Get the users API.
    pub fn users(&self) -> UserApi {
        UserApi::new(self.inner.clone())
    }

    /// Credentials in use.
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Acting user in super-user mode.
    pub fn acting_user(&self) -> Option<UserId> {
        self.inner.credentials.acting_user
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }
}

impl std::fmt::Debug for NightForoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NightForoClient")
            .field("credentials", &self.inner.credentials)
            .field("base_url", &self.inner.base.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubTransport;
    use super::*;
    use crate::endpoint;
    use crate::models::ThreadId;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_disallowed_method_never_reaches_transport() {
        let stub = StubTransport::json(200, json!({"success": true}));
        let client = stub.client();

        for ep in endpoint::all(1) {
            for method in Method::ALL {
                if ep.allows(method) {
                    continue;
                }
                let err = client
                    .request_json(ep.clone(), method, None)
                    .await
                    .unwrap_err();
                match err {
                    Error::UnsupportedMethod { method: m, path } => {
                        assert_eq!(m, method);
                        assert_eq!(path, ep.path());
                    }
                    other => panic!("unexpected error: {other:?}"),
                }
            }
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_and_headers() {
        let stub = StubTransport::json(200, json!({"threads": []}));
        let client = NightForoClient::builder()
            .api_key("k3y")
            .super_user(9u64)
            .user_agent("tests/1.0")
            .transport(stub.clone())
            .build()
            .unwrap();

        client
            .request_json(
                endpoint::threads(),
                Method::Get,
                Some(json!({"page": 3, "prefix_id": [4, 5]})),
            )
            .await
            .unwrap();

        let request = stub.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url.as_str(), "https://forum.arzguard.com/api/threads");
        assert_eq!(request.header("XF-Api-Key"), Some("k3y"));
        assert_eq!(request.header("XF-Api-User"), Some("9"));
        assert_eq!(request.header("User-Agent"), Some("tests/1.0"));
        assert_eq!(
            request.query,
            vec![
                ("page".to_owned(), "3".to_owned()),
                ("prefix_id[]".to_owned(), "4".to_owned()),
                ("prefix_id[]".to_owned(), "5".to_owned()),
            ]
        );
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let stub = StubTransport::json(200, json!({"success": true}));
        let client = stub.client();

        client
            .request_json(
                endpoint::thread(ThreadId(12)),
                Method::Post,
                Some(json!({"title": "New"})),
            )
            .await
            .unwrap();

        let request = stub.last_request().unwrap();
        assert!(request.query.is_empty());
        assert_eq!(request.body, RequestBody::Json(json!({"title": "New"})));
        assert_eq!(request.header("XF-Api-User"), None);
    }

    #[tokio::test]
    async fn test_errors_payload_is_api_error() {
        let stub = StubTransport::json(
            200,
            json!({"errors": [{"code": "no_permission", "message": "Nope", "params": {}}]}),
        );
        let err = stub
            .client()
            .request_json(endpoint::index(), Method::Get, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api { status: 200, .. }));
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_empty_api_key_is_config_error() {
        assert!(matches!(NightForoClient::new(""), Err(Error::Config(_))));
        assert!(matches!(
            NightForoClient::builder().build(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            NightForoClient::builder().api_key("").super_user(1u64).build(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            NightForoClient::builder()
                .credentials(Credentials::new(""))
                .build(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_super_user_consistency() {
        assert!(matches!(
            NightForoClient::builder().api_key("k").acting_user(1u64).build(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            NightForoClient::builder().api_key("k").super_user_mode(true).build(),
            Err(Error::Config(_))
        ));

        let client = NightForoClient::builder()
            .api_key("k")
            .super_user(5u64)
            .build()
            .unwrap();
        assert_eq!(client.acting_user(), Some(UserId(5)));
    }

    #[test]
    fn test_custom_base_url() {
        let client = NightForoClient::builder()
            .api_key("k")
            .base_url("https://example.com/api")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://example.com/api/");

        let err = NightForoClient::builder()
            .api_key("k")
            .base_url("::")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("unusable base URL"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = NightForoClient::new("very-secret").unwrap();
        assert!(!format!("{:?}", client).contains("very-secret"));
    }
}
