//! Session records keyed by a monotonically increasing identifier.

use super::entities::Session;
use escrow_types::{Address, Amount, NodeId, SessionId, UnixSeconds};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owner of all session records. The settlement service is the only
/// writer; reads go through [`SessionStore::get`].
///
/// Identifiers are handed out 1, 2, 3, … with no gaps and no reuse, and
/// records are never deleted, so the full settlement history of every
/// session stays queryable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
    next_id: SessionId,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            // 0 stays free as the not-found sentinel
            next_id: 1,
        }
    }

    /// Store a freshly opened session under the next counter value.
    pub fn allocate(
        &mut self,
        start_time: UnixSeconds,
        cost_limit: Amount,
        user: Address,
        node_id: NodeId,
    ) -> SessionId {
        let id = self.next_id;
        self.next_id += 1;
        self.sessions
            .insert(id, Session::open(id, start_time, cost_limit, user, node_id));
        id
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    /// Mutable access for the service's read-modify-write steps. Callers
    /// hold the protocol lock, so no partially updated session is ever
    /// visible to another operation.
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Number of sessions ever allocated.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// The identifier the next allocation will receive.
    pub fn next_id(&self) -> SessionId {
        self.next_id
    }

    /// Sum of all pending claimable amounts (escrow held for node owners).
    pub fn total_claimable(&self) -> Amount {
        self.sessions.values().map(|s| s.claimable_amount).sum()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
