//! Error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::endpoint::Method;

/// A single entry of the `errors` list returned by the forum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine readable error code, e.g. `no_permission`.
    #[serde(default)]
    pub code: String,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// Extra parameters attached to the error.
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

impl std::fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.code.is_empty(), self.message.is_empty()) {
            (false, false) => write!(f, "{}: {}", self.code, self.message),
            (false, true) => f.write_str(&self.code),
            _ => f.write_str(&self.message),
        }
    }
}

/// Pulls the `errors` list out of a JSON payload.
///
/// Returns `None` when the payload has no (or a null) `errors` field.
/// An `errors` value of an unexpected shape still counts as an error signal and
/// is kept as a single detail carrying the raw value.
pub(crate) fn extract_errors(payload: &serde_json::Value) -> Option<Vec<ApiErrorDetail>> {
    let raw = payload.get("errors").filter(|v| !v.is_null())?;

    let details = match serde_json::from_value::<Vec<ApiErrorDetail>>(raw.clone()) {
        Ok(details) => details,
        Err(_) => match raw {
            serde_json::Value::String(message) => vec![ApiErrorDetail {
                message: message.clone(),
                ..Default::default()
            }],
            other => vec![ApiErrorDetail {
                params: Some(other.clone()),
                ..Default::default()
            }],
        },
    };

    Some(details)
}

fn join_details(errors: &[ApiErrorDetail]) -> String {
    if errors.is_empty() {
        return "no details".to_owned();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for NightForo operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The client was configured incorrectly.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument passed to an API method.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The endpoint does not accept the requested HTTP method.
    #[error("Unsupported method {method} for endpoint {path}")]
    UnsupportedMethod { method: Method, path: String },

    /// The forum answered with a non-success status code.
    #[error("HTTP {status}: {}", join_details(.errors))]
    Http {
        status: u16,
        errors: Vec<ApiErrorDetail>,
    },

    /// The forum answered with a success status but the body is not JSON.
    #[error("Malformed response body (HTTP {status}): {source}")]
    MalformedBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The forum returned an `errors` payload.
    #[error("XenForo API error: {}", join_details(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorDetail>,
    },

    /// The payload does not match the expected response type.
    #[error("Unexpected response shape: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
    },

    /// Network-related error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Request parameters could not be serialized.
    #[error("Failed to encode parameters: {0}")]
    Encode(serde_json::Error),

    /// Reading an upload from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create an API error.
    pub fn api(status: u16, errors: Vec<ApiErrorDetail>) -> Self {
        Error::Api { status, errors }
    }

    /// Error details reported by the forum, if any.
    pub fn details(&self) -> &[ApiErrorDetail] {
        match self {
            Error::Http { errors, .. } | Error::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Error codes reported by the forum, if any.
    pub fn error_codes(&self) -> Vec<&str> {
        self.details().iter().map(|d| d.code.as_str()).collect()
    }

    /// HTTP status of the failed response, if the request reached the forum.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. }
            | Error::Api { status, .. }
            | Error::MalformedBody { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        if matches!(self.status(), Some(401) | Some(403)) {
            return true;
        }
        self.error_codes().iter().any(|code| {
            matches!(
                *code,
                "api_key_not_found" | "no_api_key_in_request" | "do_not_have_permission" | "no_permission"
            )
        })
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404) || self.error_codes().iter().any(|c| c.ends_with("not_found"))
    }
}

/// Result type alias for NightForo operations.
pub type Result<T> = std::result::Result<T, Error>;
