//! Nodes API.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_non_empty, SuccessResult};
use crate::{
    client::NightForoClientInner,
    endpoint::{self, Method},
    error::Result,
    models::{
        de::{map_or_empty_list, opt_bool_int},
        Node, NodeId, NodeType,
    },
};

/// Basic node fields for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCreateData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub display_in_list: Option<bool>,
}

impl NodeCreateData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            node_name: None,
            description: None,
            parent_node_id: None,
            display_order: None,
            display_in_list: None,
        }
    }
}

/// Create a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCreateParams {
    pub node: NodeCreateData,
    pub node_type_id: NodeType,
    /// Type-specific settings, e.g. `{"forum_type_id": "discussion"}` for forums.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_data: Option<Value>,
}

impl NodeCreateParams {
    pub fn new(node: NodeCreateData, node_type_id: NodeType) -> Self {
        Self {
            node,
            node_type_id,
            type_data: None,
        }
    }
}

/// Node fields to change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpdateData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub display_in_list: Option<bool>,
}

/// Update a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdateParams {
    #[serde(default)]
    pub node: NodeUpdateData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_data: Option<Value>,
}

/// Delete a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDeleteParams {
    /// Delete children too instead of moving them up a level.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_bool_int")]
    pub delete_children: Option<bool>,
}

/// The whole node tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTreeResult {
    /// Parent id to ordered child ids; the root is `0`.
    #[serde(deserialize_with = "map_or_empty_list")]
    pub tree_map: BTreeMap<NodeId, Vec<NodeId>>,
    pub nodes: Vec<Node>,
}

impl NodeTreeResult {
    /// Children of `parent`, in display order.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.tree_map.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find a node by id.
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.node_id == node_id)
    }
}

/// A node with its depth in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatNode {
    pub node: Node,
    pub depth: u32,
}

/// The node tree in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlattenedNodesResult {
    pub nodes_flat: Vec<FlatNode>,
}

/// A single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResult {
    pub node: Node,
}

/// API for the node tree.
pub struct NodeApi {
    client: Arc<NightForoClientInner>,
}

impl NodeApi {
    pub(crate) fn new(client: Arc<NightForoClientInner>) -> Self {
        Self { client }
    }

    /// Get the node tree.
    pub async fn list(&self) -> Result<NodeTreeResult> {
        self.client.send_empty(endpoint::nodes(), Method::Get).await
    }

    /// Create a node.
    pub async fn create(&self, params: NodeCreateParams) -> Result<NodeResult> {
        require_non_empty("node title", &params.node.title)?;
        self.client
            .send(endpoint::nodes(), Method::Post, &params)
            .await
    }

    /// Get the flattened node list.
    pub async fn flattened(&self) -> Result<FlattenedNodesResult> {
        self.client
            .send_empty(endpoint::nodes_flattened(), Method::Get)
            .await
    }

    /// Get a node.
    pub async fn get(&self, node_id: impl Into<NodeId>) -> Result<NodeResult> {
        self.client
            .send_empty(endpoint::node(node_id.into()), Method::Get)
            .await
    }

    /// Update a node.
    pub async fn update(
        &self,
        node_id: impl Into<NodeId>,
        params: NodeUpdateParams,
    ) -> Result<NodeResult> {
        self.client
            .send(endpoint::node(node_id.into()), Method::Post, &params)
            .await
    }

    /// Delete a node.
    pub async fn delete(
        &self,
        node_id: impl Into<NodeId>,
        params: NodeDeleteParams,
    ) -> Result<SuccessResult> {
        self.client
            .send(endpoint::node(node_id.into()), Method::Delete, &params)
            .await
    }
}
