//! Recording stub transport for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::{ApiRequest, NightForoClient, RawResponse, Transport};
use crate::error::Result;

/// Replies with a canned response and records every request it sees.
pub(crate) struct StubTransport {
    reply: RawResponse,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new(reply: RawResponse) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn json(status: u16, body: Value) -> Arc<Self> {
        Self::raw(status, body.to_string())
    }

    pub fn raw(status: u16, body: impl Into<Vec<u8>>) -> Arc<Self> {
        let status = StatusCode::from_u16(status).unwrap();
        Self::new(RawResponse::new(status, body))
    }

    /// A client wired to this stub with a plain API key.
    pub fn client(self: &Arc<Self>) -> NightForoClient {
        NightForoClient::builder()
            .api_key("test-key")
            .transport(self.clone())
            .build()
            .unwrap()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self.reply.clone())
    }
}
