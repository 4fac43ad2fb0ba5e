//! Attachments API.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, LOCATION};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_key, SuccessResult};
use crate::{
    client::{check_status, decode, normalize, NightForoClientInner, Upload},
    endpoint::{self, Method},
    error::{Error, Result},
    models::{Attachment, AttachmentId, ContentType},
};

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "attachment";

/// List attachments bound to a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentsGetParams {
    pub key: String,
}

impl AttachmentsGetParams {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Upload a file under an attachment key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUploadParams {
    pub key: String,
    pub file: Upload,
}

impl AttachmentUploadParams {
    pub fn new(key: impl Into<String>, file: Upload) -> Self {
        Self {
            key: key.into(),
            file,
        }
    }
}

/// Create an attachment key, optionally uploading the first file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentKeyParams {
    /// Type of content the attachments will belong to.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Context ids, e.g. `thread_id` or `node_id`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, Value>,
    #[serde(skip)]
    pub attachment: Option<Upload>,
}

impl AttachmentKeyParams {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            context: BTreeMap::new(),
            attachment: None,
        }
    }

    /// Add a context entry.
    pub fn context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Upload a file together with the key.
    pub fn attachment(mut self, file: Upload) -> Self {
        self.attachment = Some(file);
        self
    }
}

/// Attachments bound to a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentListResult {
    pub attachments: Vec<Attachment>,
}

/// A single attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentResult {
    pub attachment: Attachment,
}

/// A freshly created attachment key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentKeyResult {
    pub key: String,
    /// The uploaded file, if one was sent with the key.
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// Raw attachment contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentData {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Location of an attachment's thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentThumbnail {
    pub url: String,
}

/// API for attachments.
pub struct AttachmentApi {
    client: Arc<NightForoClientInner>,
}

impl AttachmentApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// List attachments bound to a key.
    pub async fn list(&self, params: AttachmentsGetParams) -> Result<AttachmentListResult> {
        require_key(&params.key)?;
        self.client
            .send(endpoint::attachments(), Method::Get, &params)
            .await
    }

    /// Upload a file under an existing key.
    pub async fn upload(&self, params: AttachmentUploadParams) -> Result<AttachmentResult> {
        require_key(&params.key)?;
        let fields = AttachmentsGetParams { key: params.key };
        self.client
            .send_multipart(
                endpoint::attachments(),
                Method::Post,
                Some(&fields),
                vec![(FILE_FIELD.to_owned(), params.file)],
            )
            .await
    }

    /// Create a new attachment key.
    pub async fn create_key(&self, mut params: AttachmentKeyParams) -> Result<AttachmentKeyResult> {
        match params.attachment.take() {
            Some(file) => {
                self.client
                    .send_multipart(
                        endpoint::attachments_new_key(),
                        Method::Post,
                        Some(&params),
                        vec![(FILE_FIELD.to_owned(), file)],
                    )
                    .await
            }
            None => {
                self.client
                    .send(endpoint::attachments_new_key(), Method::Post, &params)
                    .await
            }
        }
    }

    /// Get attachment details.
    pub async fn get(&self, attachment_id: impl Into<AttachmentId>) -> Result<AttachmentResult> {
        self.client
            .send_empty(endpoint::attachment(attachment_id.into()), Method::Get)
            .await
    }

    /// Delete an attachment.
    pub async fn delete(&self, attachment_id: impl Into<AttachmentId>) -> Result<SuccessResult> {
        self.client
            .send_empty(endpoint::attachment(attachment_id.into()), Method::Delete)
            .await
    }

    /// Download the attachment contents.
    pub async fn data(&self, attachment_id: impl Into<AttachmentId>) -> Result<AttachmentData> {
        let response = self
            .client
            .send_raw(endpoint::attachment_data(attachment_id.into()), Method::Get)
            .await?;
        check_status(&response, |s| s.is_success())?;

        let content_type = response
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Ok(AttachmentData {
            bytes: response.body,
            content_type,
        })
    }

    /// Get the thumbnail URL.
    ///
    /// The forum answers with a redirect to the thumbnail; some setups return
    /// `{"url": ...}` instead, which is accepted too.
    pub async fn thumbnail(
        &self,
        attachment_id: impl Into<AttachmentId>,
    ) -> Result<AttachmentThumbnail> {
        let response = self
            .client
            .send_raw(
                endpoint::attachment_thumbnail(attachment_id.into()),
                Method::Get,
            )
            .await?;
        check_status(&response, |s| s.is_success() || s.is_redirection())?;

        if response.status.is_redirection() {
            let url = response
                .headers
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| Error::Http {
                    status: response.status.as_u16(),
                    errors: Vec::new(),
                })?;
            return Ok(AttachmentThumbnail {
                url: url.to_owned(),
            });
        }

        decode(normalize(response)?)
    }
}
