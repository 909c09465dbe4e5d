//! Message digests and signed-message framing.

use escrow_types::Hash;
use sha3::{Digest, Keccak256};

/// Prefix applied to every digest before recovery, per the standard
/// personal-message convention. Signing `prefix ‖ digest` instead of the
/// raw digest prevents a settlement signature from doubling as a
/// signature over transaction data or any other protocol message.
const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Wrap a 32-byte digest in the signed-message framing and hash again.
///
/// Signers are expected to have applied the same framing; recovery runs
/// over this outer digest, never over the inner one.
pub fn eth_signed_message_hash(inner: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(inner);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}
