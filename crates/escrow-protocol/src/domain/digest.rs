//! The settlement digest: the exact message a node signs.

use escrow_signature::{eth_signed_message_hash, keccak256};
use escrow_types::{Amount, Hash, SessionId};

/// Digest over exactly `(session id, amount)`, the sole authorization
/// artifact of the protocol. A node's signature over this digest is the
/// only evidence that it agrees to be paid that amount and no more;
/// changing either value invalidates any previously produced signature.
///
/// Both values are packed as 32-byte big-endian words, hashed with
/// Keccak-256, then wrapped in the signed-message framing.
pub fn settlement_digest(session_id: SessionId, amount: Amount) -> Hash {
    let mut packed = [0u8; 64];
    packed[24..32].copy_from_slice(&session_id.to_be_bytes());
    packed[48..64].copy_from_slice(&amount.to_be_bytes());

    eth_signed_message_hash(&keccak256(&packed))
}
