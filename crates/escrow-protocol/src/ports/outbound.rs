//! Outbound ports: collaborators this core depends on.

use escrow_types::{Address, NodeId, UnixSeconds};
use serde::{Deserialize, Serialize};

/// Directory entry for a service node. Owned and mutated exclusively by
/// the external node directory; this core only ever reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDetails {
    /// Descriptive label, typically the node's endpoint address.
    pub endpoint: String,
    /// Principal entitled to claim session settlements for this node.
    pub owner: Address,
    /// Whether the directory currently lists the node as serving.
    pub is_active: bool,
}

/// Read-only view of the external node directory.
///
/// The directory is a plain CRUD catalog maintained elsewhere; the
/// settlement core consults it at open time (existence and active
/// status) and at close/claim time (owner resolution).
pub trait NodeDirectory: Send + Sync {
    fn node_exists(&self, node_id: NodeId) -> bool;

    fn is_node_active(&self, node_id: NodeId) -> bool;

    fn get_node_details(&self, node_id: NodeId) -> Option<NodeDetails>;
}

/// Wall-clock source.
///
/// Timeouts in this protocol are timestamp comparisons, not timers: a
/// claim presents "now" and the service compares it against the
/// session's start time. Tests substitute a manual clock.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> UnixSeconds;
}
