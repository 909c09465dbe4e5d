//! In-memory node directory.
//!
//! Stands in for the external directory service in tests and embedded
//! setups. The settlement core only uses the read side ([`NodeDirectory`]);
//! the mutators model what the real directory service does elsewhere.

use crate::ports::outbound::{NodeDetails, NodeDirectory};
use escrow_types::{Address, NodeId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared-map directory. Clones share the same entries, so a test can
/// keep a handle for registration while the service holds another for
/// lookups.
#[derive(Clone, Default)]
pub struct InMemoryNodeDirectory {
    nodes: Arc<RwLock<HashMap<NodeId, NodeDetails>>>,
}

impl InMemoryNodeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a node entry.
    pub fn register(&self, node_id: NodeId, endpoint: impl Into<String>, owner: Address) {
        self.nodes.write().insert(
            node_id,
            NodeDetails {
                endpoint: endpoint.into(),
                owner,
                is_active: true,
            },
        );
    }

    /// Flip a node's active flag. No-op for unknown nodes.
    pub fn set_active(&self, node_id: NodeId, is_active: bool) {
        if let Some(details) = self.nodes.write().get_mut(&node_id) {
            details.is_active = is_active;
        }
    }

    /// Drop a node entry entirely.
    pub fn remove(&self, node_id: NodeId) {
        self.nodes.write().remove(&node_id);
    }
}

impl NodeDirectory for InMemoryNodeDirectory {
    fn node_exists(&self, node_id: NodeId) -> bool {
        self.nodes.read().contains_key(&node_id)
    }

    fn is_node_active(&self, node_id: NodeId) -> bool {
        self.nodes
            .read()
            .get(&node_id)
            .map(|d| d.is_active)
            .unwrap_or(false)
    }

    fn get_node_details(&self, node_id: NodeId) -> Option<NodeDetails> {
        self.nodes.read().get(&node_id).cloned()
    }
}
