//! Inbound port: the public settlement API.

use crate::domain::{EscrowError, Session};
use escrow_types::{Address, Amount, NodeId, SessionId};

/// Primary settlement API.
///
/// Every operation takes the authenticated caller identity as an explicit
/// parameter; there is no ambient "current caller". The host in front of
/// this core is responsible for authenticating that identity.
///
/// Implementations must be thread-safe (`Send + Sync`) and must make each
/// operation atomic: all preconditions are checked before any state
/// changes, and a failed call leaves nothing mutated.
pub trait SessionEscrowApi: Send + Sync {
    /// Fund the caller's balance. `amount` must be greater than zero.
    fn deposit(&self, caller: Address, amount: Amount) -> Result<(), EscrowError>;

    /// Release part of the caller's balance back to the host's native
    /// transfer mechanism. Returns the amount released.
    ///
    /// Cost limits of the caller's open sessions are not reserved; see
    /// the service documentation for the consequences.
    fn withdraw(&self, caller: Address, amount: Amount) -> Result<Amount, EscrowError>;

    /// Open a metered session against `node_id`, committing to pay at
    /// most `cost_limit`. Returns the new session identifier.
    fn open_session(
        &self,
        caller: Address,
        cost_limit: Amount,
        node_id: NodeId,
    ) -> Result<SessionId, EscrowError>;

    /// Close a session with a settlement amount the node authorized.
    /// `signature_bytes` is the node owner's 65-byte recoverable
    /// signature over the settlement digest of `(session_id, amount_paid)`.
    fn close_session(
        &self,
        caller: Address,
        session_id: SessionId,
        amount_paid: Amount,
        signature_bytes: &[u8],
    ) -> Result<(), EscrowError>;

    /// Collect the escrowed settlement of a session into the caller's
    /// balance. Only the node's registered owner may claim. Returns the
    /// transferred amount.
    fn claim_payment(&self, caller: Address, session_id: SessionId)
        -> Result<Amount, EscrowError>;

    /// Read a principal's balance; unknown principals hold zero.
    fn get_balance(&self, principal: Address) -> Amount;

    /// Read a session record.
    fn get_session(&self, session_id: SessionId) -> Result<Session, EscrowError>;
}
