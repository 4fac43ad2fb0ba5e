//! Attachment model.

use serde::{Deserialize, Serialize};

use super::AttachmentId;

/// A file attached to some content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub attachment_id: AttachmentId,
    pub filename: String,
    pub file_size: u64,
    pub height: u32,
    pub width: u32,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub direct_url: Option<String>,
    pub is_video: bool,
    #[serde(default)]
    pub is_audio: bool,
    /// Content type the attachment belongs to, e.g. `post`.
    pub content_type: String,
    pub content_id: u64,
    pub attach_date: i64,
    pub view_count: u64,
}

impl Attachment {
    /// Check if the attachment is an image.
    pub fn is_image(&self) -> bool {
        self.width > 0 && self.height > 0 && !self.is_video
    }
}
