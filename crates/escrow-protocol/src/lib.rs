//! # escrow-protocol
//!
//! Session-and-escrow settlement core.
//!
//! A paying user pre-funds a balance, opens a metered usage session
//! against a service node, and settles through an amount the node signed.
//! No intermediary adjudicates what is owed: a node's signature over
//! `(session id, amount)` is the only evidence the protocol trusts, and a
//! node can never claim more than the user authorized.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): ledger, session store, settlement digest
//! - **Ports Layer** (`ports/`): the inbound API trait and the read-only
//!   `NodeDirectory` / `Clock` collaborators
//! - **Service Layer** (`service.rs`): wires domain logic to ports behind
//!   one coarse lock, so every operation is all-or-nothing
//! - **Adapters** (`adapters/`): in-memory directory and clocks for tests
//!   and embedding
//!
//! ## Trust Model
//!
//! The node directory is trusted to report node ownership; the node is
//! trusted to sign honestly once engaged. The protocol's defenses are
//! limited to signature verification and the cost-limit cap.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryNodeDirectory, ManualClock, SystemClock};
pub use domain::{
    settlement_digest, BalanceLedger, EscrowError, Session, SessionStore,
};
pub use events::EscrowEvent;
pub use ports::{Clock, NodeDetails, NodeDirectory, SessionEscrowApi};
pub use service::{SessionEscrowService, SESSION_TIMEOUT_SECS};
