//! Settlement service: wires the domain to the ports.
//!
//! The original execution environment ran every call under a global
//! serialization guarantee. Without that host, one coarse write lock over
//! the protocol state gives the same property: each operation validates
//! all of its preconditions and then mutates, with no interleaving and no
//! partial effects visible anywhere.

use crate::domain::{settlement_digest, BalanceLedger, EscrowError, Session, SessionStore};
use crate::events::EscrowEvent;
use crate::ports::inbound::SessionEscrowApi;
use crate::ports::outbound::{Clock, NodeDirectory};
use escrow_signature::{verify_signer, EcdsaSignature, SignatureError};
use escrow_types::{Address, Amount, NodeId, SessionId};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// How long an unclosed session stays untouchable before its node may
/// attempt a unilateral claim: 48 hours.
pub const SESSION_TIMEOUT_SECS: u64 = 48 * 60 * 60;

/// Buffered notifications per subscriber before old events are dropped.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Everything the protocol owns and persists: the balance table, the
/// session table, and (inside the store) the session counter.
#[derive(Debug, Default)]
struct ProtocolState {
    ledger: BalanceLedger,
    sessions: SessionStore,
}

/// Session escrow settlement service.
///
/// Generic over its two read-only collaborators: the node directory and
/// the clock. All state mutation happens here and nowhere else.
pub struct SessionEscrowService<D: NodeDirectory, C: Clock> {
    state: RwLock<ProtocolState>,
    directory: D,
    clock: C,
    events: broadcast::Sender<EscrowEvent>,
}

impl<D: NodeDirectory, C: Clock> SessionEscrowService<D, C> {
    pub fn new(directory: D, clock: C) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(ProtocolState::default()),
            directory,
            clock,
            events,
        }
    }

    /// Subscribe to session notifications. Events are fire-and-forget:
    /// they are emitted at most once per successful open/close, in call
    /// order, and nothing waits for receivers.
    pub fn subscribe(&self) -> broadcast::Receiver<EscrowEvent> {
        self.events.subscribe()
    }

    /// Number of sessions ever opened.
    pub fn session_count(&self) -> usize {
        self.state.read().sessions.len()
    }

    /// The identifier the next open will be assigned.
    pub fn next_session_id(&self) -> SessionId {
        self.state.read().sessions.next_id()
    }

    /// Conservation snapshot: (sum of balances, sum of pending
    /// claimables, lifetime deposited, lifetime withdrawn). At all times
    /// `circulating + claimable + withdrawn == deposited`.
    pub fn totals(&self) -> (Amount, Amount, Amount, Amount) {
        let state = self.state.read();
        (
            state.ledger.circulating(),
            state.sessions.total_claimable(),
            state.ledger.total_deposited(),
            state.ledger.total_withdrawn(),
        )
    }

    fn emit(&self, event: EscrowEvent) {
        // No receivers is fine; the notification is best-effort.
        let _ = self.events.send(event);
    }
}

impl<D: NodeDirectory, C: Clock> SessionEscrowApi for SessionEscrowService<D, C> {
    fn deposit(&self, caller: Address, amount: Amount) -> Result<(), EscrowError> {
        let mut state = self.state.write();
        state.ledger.deposit(caller, amount)?;

        info!(
            principal = %escrow_types::hex_address(&caller),
            amount,
            "deposit accepted"
        );
        Ok(())
    }

    /// Deliberately unreserved: the cost limits of the caller's open
    /// sessions are not subtracted from what may be withdrawn, so a user
    /// can drain funds their open sessions are still committed to. A
    /// later close then fails its balance check and the node is left
    /// with the timeout path. Reservation semantics are an open design
    /// question; the historical behavior is kept as-is.
    fn withdraw(&self, caller: Address, amount: Amount) -> Result<Amount, EscrowError> {
        let mut state = self.state.write();
        state.ledger.withdraw(caller, amount)?;

        info!(
            principal = %escrow_types::hex_address(&caller),
            amount,
            "withdrawal released"
        );
        Ok(amount)
    }

    fn open_session(
        &self,
        caller: Address,
        cost_limit: Amount,
        node_id: NodeId,
    ) -> Result<SessionId, EscrowError> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let available = state.ledger.balance_of(&caller);
        if cost_limit > available {
            return Err(EscrowError::InsufficientBalance {
                required: cost_limit,
                available,
            });
        }

        if !self.directory.node_exists(node_id) {
            return Err(EscrowError::NodeNotFound(node_id));
        }
        if !self.directory.is_node_active(node_id) {
            return Err(EscrowError::NodeInactive(node_id));
        }

        let session_id =
            state
                .sessions
                .allocate(self.clock.now_unix(), cost_limit, caller, node_id);

        info!(
            session_id,
            node_id,
            cost_limit,
            user = %escrow_types::hex_address(&caller),
            "session opened"
        );
        self.emit(EscrowEvent::SessionOpened {
            session_id,
            user: caller,
            node_id,
        });

        Ok(session_id)
    }

    fn close_session(
        &self,
        caller: Address,
        session_id: SessionId,
        amount_paid: Amount,
        signature_bytes: &[u8],
    ) -> Result<(), EscrowError> {
        // Decoding failures are input-validation errors, distinct from a
        // well-formed signature that fails to verify.
        let signature = EcdsaSignature::from_bytes(signature_bytes).map_err(|e| match e {
            SignatureError::InvalidLength(n) => EscrowError::InvalidSignatureLength(n),
            _ => EscrowError::InvalidSignature,
        })?;

        let mut guard = self.state.write();
        let state = &mut *guard;

        let node_id = {
            let session = state
                .sessions
                .get(session_id)
                .filter(|s| s.is_active)
                .ok_or(EscrowError::SessionNotActive(session_id))?;

            if session.user != caller {
                return Err(EscrowError::NotSessionOwner);
            }
            if amount_paid > session.cost_limit {
                return Err(EscrowError::AmountExceedsLimit {
                    amount: amount_paid,
                    limit: session.cost_limit,
                });
            }

            let available = state.ledger.balance_of(&caller);
            if amount_paid > available {
                return Err(EscrowError::InsufficientBalance {
                    required: amount_paid,
                    available,
                });
            }

            let details = self
                .directory
                .get_node_details(session.node_id)
                .ok_or(EscrowError::NodeNotFound(session.node_id))?;

            // The digest binds exactly (session id, amount); the node
            // owner's signature over it is the sole authorization.
            let digest = settlement_digest(session_id, amount_paid);
            if !verify_signer(details.owner, &digest, &signature) {
                return Err(EscrowError::InvalidSignature);
            }

            session.node_id
        };

        // All preconditions hold; mutate.
        state.ledger.debit(caller, amount_paid)?;
        if let Some(session) = state.sessions.get_mut(session_id) {
            session.is_active = false;
            session.claimable_amount = amount_paid;
        }

        info!(
            session_id,
            node_id,
            amount_paid,
            user = %escrow_types::hex_address(&caller),
            "session closed"
        );
        self.emit(EscrowEvent::SessionClosed {
            session_id,
            user: caller,
            node_id,
            amount_paid,
        });

        Ok(())
    }

    fn claim_payment(
        &self,
        caller: Address,
        session_id: SessionId,
    ) -> Result<Amount, EscrowError> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let amount = {
            let session = state
                .sessions
                .get(session_id)
                .ok_or(EscrowError::SessionNotFound(session_id))?;

            let details = self
                .directory
                .get_node_details(session.node_id)
                .ok_or(EscrowError::NodeNotFound(session.node_id))?;

            if session.is_active {
                // Unilateral fallback: the node may move once the user has
                // sat on an open session past the timeout. Note that a
                // session that was never closed has no claimable amount
                // recorded, so this path succeeds but transfers zero. The
                // historical behavior is kept; paying out the cost limit
                // instead would be a guess the record does not support.
                let now = self.clock.now_unix();
                if now.saturating_sub(session.start_time) <= SESSION_TIMEOUT_SECS {
                    return Err(EscrowError::SessionNotClaimable(session_id));
                }
            } else if session.claimable_amount == 0 {
                // A second claim on a settled session is a rejected no-op.
                return Err(EscrowError::NoClaimableAmount(session_id));
            }

            if caller != details.owner {
                return Err(EscrowError::NotNodeOwner);
            }

            session.claimable_amount
        };

        // Last precondition: the payout must fit the claimant's balance
        // before anything is zeroed, so a failure mutates nothing.
        if state.ledger.balance_of(&caller).checked_add(amount).is_none() {
            return Err(EscrowError::AmountOverflow);
        }

        if let Some(session) = state.sessions.get_mut(session_id) {
            session.claimable_amount = 0;
        }
        state.ledger.credit(caller, amount)?;

        info!(
            session_id,
            amount,
            claimant = %escrow_types::hex_address(&caller),
            "payment claimed"
        );
        Ok(amount)
    }

    fn get_balance(&self, principal: Address) -> Amount {
        let balance = self.state.read().ledger.balance_of(&principal);
        debug!(
            principal = %escrow_types::hex_address(&principal),
            balance,
            "balance read"
        );
        balance
    }

    fn get_session(&self, session_id: SessionId) -> Result<Session, EscrowError> {
        self.state
            .read()
            .sessions
            .get(session_id)
            .cloned()
            .ok_or(EscrowError::SessionNotFound(session_id))
    }
}
