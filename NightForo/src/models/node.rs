//! Node tree: categories, forums, pages and links.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::de::{bool_int, map_or_empty_list};
use super::NodeId;

/// Node kind, as reported in `node_type_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Category,
    Forum,
    Page,
    LinkForum,
    SearchForum,
}

/// Forum flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForumType {
    Discussion,
    Question,
    Suggestion,
    Article,
}

/// One step of a node's breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    #[serde(default)]
    pub node_id: Option<NodeId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub node_type_id: Option<NodeType>,
}

/// Type data of a forum node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumTypeData {
    #[serde(with = "bool_int")]
    pub allow_posting: bool,
    #[serde(with = "bool_int")]
    pub can_create_thread: bool,
    #[serde(with = "bool_int")]
    pub can_upload_attachment: bool,
    #[serde(deserialize_with = "map_or_empty_list")]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
}

/// Type data of a search forum node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchForumTypeData {
    pub discussion_count: u64,
    pub message_count: u64,
}

/// Type data of a page node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTypeData {
    pub content: String,
    pub publish_date: i64,
    pub view_count: u64,
}

/// Type data of a link forum node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkForumTypeData {
    pub link_url: String,
    pub redirect_count: u64,
}

/// Node type data, shaped by the node type.
///
/// Categories and add-on node types land in [`NodeTypeData::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeTypeData {
    Forum(ForumTypeData),
    SearchForum(SearchForumTypeData),
    Page(PageTypeData),
    LinkForum(LinkForumTypeData),
    Other(serde_json::Value),
}

impl NodeTypeData {
    /// Forum type data, if this is a forum.
    pub fn as_forum(&self) -> Option<&ForumTypeData> {
        match self {
            NodeTypeData::Forum(data) => Some(data),
            _ => None,
        }
    }
}

/// A node of the forum tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: NodeId,
    pub title: String,
    #[serde(default)]
    pub node_name: Option<String>,
    pub node_type_id: NodeType,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub type_data: NodeTypeData,
    pub view_url: String,
    pub description: String,
    pub parent_node_id: NodeId,
    pub display_order: i64,
    pub display_in_list: bool,
}

impl Node {
    /// Check if this node is at the top of the tree.
    pub fn is_root_child(&self) -> bool {
        self.parent_node_id.is_zero()
    }
}
