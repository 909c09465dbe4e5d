//! Notification payloads published on session transitions.
//!
//! Notifications are fire-and-forget: at most one per triggering call,
//! delivered in call order, and a missing subscriber is never an error.

use escrow_types::{Address, Amount, NodeId, SessionId};
use serde::{Deserialize, Serialize};

/// Published by the settlement service after a successful open or close.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowEvent {
    /// A session was opened and funds committed up to its cost limit.
    SessionOpened {
        session_id: SessionId,
        user: Address,
        node_id: NodeId,
    },
    /// A session settled: the user was debited and the amount is now
    /// claimable by the node's owner.
    SessionClosed {
        session_id: SessionId,
        user: Address,
        node_id: NodeId,
        amount_paid: Amount,
    },
}
