//! Domain layer: pure settlement logic with no I/O dependencies.

pub mod digest;
pub mod entities;
pub mod errors;
pub mod ledger;
pub mod sessions;

pub use digest::settlement_digest;
pub use entities::Session;
pub use errors::EscrowError;
pub use ledger::BalanceLedger;
pub use sessions::SessionStore;
