//! # Signature Authority
//!
//! Verifies that a settlement message was signed by a claimed principal,
//! using secp256k1 public-key recovery.
//!
//! ## Layout
//!
//! - [`entities`]: the 65-byte wire signature and its decoder
//! - [`message`]: Keccak-256 and the domain-separated signed-message framing
//! - [`ecdsa`]: recovery and signer verification
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are
//!   rejected
//! - **Domain Separation**: digests are framed with the standard
//!   `"\x19Ethereum Signed Message:\n32"` prefix so a settlement signature
//!   cannot be replayed as any other kind of message
//! - **Null Identity**: verification against the zero address always fails
//!
//! This crate holds no mutable state; every function is pure.

pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod message;

pub use ecdsa::{address_from_pubkey, recover_signer, verify_signer};
#[cfg(any(test, feature = "test-helpers"))]
pub use ecdsa::test_helpers;
pub use entities::{EcdsaSignature, SIGNATURE_LENGTH};
pub use errors::SignatureError;
pub use message::{eth_signed_message_hash, keccak256};
