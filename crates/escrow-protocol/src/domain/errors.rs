//! Error types for the settlement protocol.

use escrow_types::Amount;
use thiserror::Error;

/// Every variant is a precondition failure: detected before any state
/// mutation, reported synchronously, and leaving all state untouched.
/// There is no fatal class; a failed call is a rejected operation, never
/// a crash, and retry is entirely the caller's decision.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EscrowError {
    /// Balance too small for the requested debit or session limit
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    /// Deposit amounts must be strictly positive
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// A credit would overflow the balance type
    #[error("Amount overflow")]
    AmountOverflow,

    /// The directory has no entry for the referenced node
    #[error("Node not found: {0}")]
    NodeNotFound(u64),

    /// The directory lists the node as inactive
    #[error("Node is not active: {0}")]
    NodeInactive(u64),

    /// No session exists with the given identifier
    #[error("Session not found: {0}")]
    SessionNotFound(u64),

    /// The session was already closed (or never existed)
    #[error("Session is not active: {0}")]
    SessionNotActive(u64),

    /// Only the session's owning user may close it
    #[error("Caller is not the session owner")]
    NotSessionOwner,

    /// Settlement amount exceeds the session's cost limit
    #[error("Amount exceeds session cost limit: {amount} > {limit}")]
    AmountExceedsLimit { amount: Amount, limit: Amount },

    /// The settlement signature does not verify against the node owner
    #[error("Invalid settlement signature")]
    InvalidSignature,

    /// The signature blob is not the fixed 65-byte wire encoding
    #[error("Invalid signature length: {0}")]
    InvalidSignatureLength(usize),

    /// Session is neither closed-with-balance nor past its timeout
    #[error("Session is not claimable: {0}")]
    SessionNotClaimable(u64),

    /// The claimable amount was already consumed
    #[error("No claimable amount for session {0}")]
    NoClaimableAmount(u64),

    /// Only the node's registered owner may claim
    #[error("Caller is not the node owner")]
    NotNodeOwner,
}
