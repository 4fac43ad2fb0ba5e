//! HTTP configuration, the transport seam and response normalization.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::endpoint::Method;
use crate::error::{extract_errors, Error, Result};

/// Default XenForo API base URL.
pub const DEFAULT_BASE_URL: &str = "https://forum.arzguard.com/api/";

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("nightforo/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL for API requests.
    pub base_url: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Connection timeout. `None` keeps the HTTP stack's default.
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout. `None` keeps the HTTP stack's default.
    pub timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            connect_timeout: None,
            timeout: None,
        }
    }
}

impl HttpConfig {
    /// Parse the base URL, making sure relative paths join under it.
    pub fn base(&self) -> Result<Url> {
        let mut raw = self.base_url.trim().to_owned();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| Error::config(format!("unusable base URL: {}: {e}", self.base_url)))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!("unusable base URL: {}", self.base_url)));
        }
        Ok(url)
    }

    /// Resolve a relative API path to a full URL.
    pub fn resolve_url(&self, path: &str) -> Result<Url> {
        Ok(self.base()?.join(path.trim_start_matches('/'))?)
    }
}

/// Build a reqwest client with the given configuration.
///
/// Redirects are never followed so that redirect targets (attachment
/// thumbnails) can be read from the `Location` header.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::none())
        .gzip(true);

    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(Error::Network)
}

/// A file sent as part of a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name reported to the forum.
    pub file_name: String,
    /// Raw contents.
    pub bytes: Vec<u8>,
    /// MIME type, if known.
    pub mime: Option<String>,
}

impl Upload {
    /// Create an upload from in-memory bytes.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    /// Set the MIME type.
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read an upload from disk, using the file name as the upload name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());
        Ok(Self::new(file_name, bytes))
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("mime", &self.mime)
            .finish()
    }
}

/// Multipart form: flattened text fields plus named file parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, Upload)>,
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// A fully prepared request, ready for a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Look up a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The raw outcome of a round trip.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// A response with no headers.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add a header. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Header value as a string, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Performs one HTTP round trip.
///
/// Implementations only move bytes; status and payload checks are applied by
/// the client on top of every transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport from the HTTP configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn multipart_form(form: MultipartForm) -> Result<reqwest::multipart::Form> {
    let mut out = reqwest::multipart::Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for (name, upload) in form.files {
        let mut part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(mime) = upload.mime {
            part = part.mime_str(&mime)?;
        }
        out = out.part(name, part);
    }
    Ok(out)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut builder = self.client.request(request.method.into(), request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(form) => builder.multipart(multipart_form(form)?),
        };

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Flatten a parameter object into query pairs.
///
/// Lists become `key[]=v`, nested maps `key[sub]=v`. Nulls are dropped.
pub fn flatten_query(params: &Value) -> Result<Vec<(String, String)>> {
    match params {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => {
            let mut out = Vec::new();
            for (key, value) in map {
                flatten_into(key.clone(), value, &mut out);
            }
            Ok(out)
        }
        other => Err(Error::invalid(format!(
            "parameters must serialize to an object, got {}",
            other
        ))),
    }
}

fn flatten_into(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key, if *b { "1" } else { "0" }.to_owned())),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::String(s) => out.push((key, s.clone())),
        Value::Array(items) => {
            for item in items {
                flatten_into(format!("{}[]", key), item, out);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                flatten_into(format!("{}[{}]", key, sub), item, out);
            }
        }
    }
}

/// Fail with [`Error::Http`] on a status outside `accept`.
pub(crate) fn check_status(response: &RawResponse, accept: impl Fn(StatusCode) -> bool) -> Result<()> {
    if accept(response.status) {
        return Ok(());
    }
    let errors = serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|v| extract_errors(&v))
        .unwrap_or_default();
    Err(Error::Http {
        status: response.status.as_u16(),
        errors,
    })
}

/// Turn a raw response into a JSON payload or a uniform error.
pub(crate) fn normalize(response: RawResponse) -> Result<Value> {
    check_status(&response, |s| s.is_success())?;
    let status = response.status.as_u16();

    let payload: Value = serde_json::from_slice(&response.body)
        .map_err(|source| Error::MalformedBody { status, source })?;

    if let Some(errors) = extract_errors(&payload) {
        return Err(Error::api(status, errors));
    }
    Ok(payload)
}
