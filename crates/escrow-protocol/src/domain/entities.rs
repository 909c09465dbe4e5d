//! Domain entities for the settlement protocol.

use escrow_types::{Address, Amount, NodeId, SessionId, UnixSeconds};
use serde::{Deserialize, Serialize};

/// A bounded commitment by a user to pay up to `cost_limit` to one node's
/// owner, settled by a single signed amount.
///
/// ## Lifecycle
///
/// Created active with nothing claimable. Closing deactivates the session,
/// debits the user, and records the claimable amount. Claiming consumes
/// the claimable amount to zero. Sessions are never deleted; the terminal
/// state is "closed with nothing left to claim".
///
/// All fields except `is_active` and `claimable_amount` are immutable
/// after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier assigned by the store's counter, starting at 1.
    pub id: SessionId,
    /// Wall-clock time at creation; the timeout window is measured from here.
    pub start_time: UnixSeconds,
    /// Maximum amount this session may ultimately settle for.
    pub cost_limit: Amount,
    /// The owning user; the only principal allowed to close.
    pub user: Address,
    /// Reference (not ownership) to a node entry in the external directory.
    pub node_id: NodeId,
    /// True from creation until the session is explicitly closed.
    pub is_active: bool,
    /// Amount reserved for the node's owner, consumed to zero by a claim.
    pub claimable_amount: Amount,
}

impl Session {
    /// A freshly opened session: active, nothing claimable yet.
    pub fn open(
        id: SessionId,
        start_time: UnixSeconds,
        cost_limit: Amount,
        user: Address,
        node_id: NodeId,
    ) -> Self {
        Self {
            id,
            start_time,
            cost_limit,
            user,
            node_id,
            is_active: true,
            claimable_amount: 0,
        }
    }
}
