//! Primitive types shared by the signature and protocol crates.
//!
//! ## Type Decisions
//!
//! - `Amount = u128` - Sufficient for 340 undecillion base units. A 256-bit
//!   integer would require an extra dependency and wider arithmetic for no
//!   practical gain; balances can never go negative by construction.
//! - `SessionId = u64` - Assigned by an incrementing counter seeded at 1,
//!   so 0 stays free as a "no such session" sentinel.

/// Keccak-256 digest.
pub type Hash = [u8; 32];

/// Principal identity: the last 20 bytes of keccak256 of the uncompressed
/// secp256k1 public key (Ethereum address derivation).
pub type Address = [u8; 20];

/// Monetary amount in base units.
pub type Amount = u128;

/// Session identifier. 0 is reserved as the not-found sentinel; real
/// sessions are numbered from 1 with no gaps and no reuse.
pub type SessionId = u64;

/// Identifier of a service node in the external node directory.
pub type NodeId = u64;

/// Wall-clock timestamp in seconds since the Unix epoch.
pub type UnixSeconds = u64;

/// The null identity. Signature checks against this address always fail;
/// no principal can ever hold it.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Render an address as a 0x-prefixed lowercase hex string.
pub fn hex_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}
