//! Error types for signature decoding and recovery.

use thiserror::Error;

/// Errors that can occur while decoding or recovering a signature.
///
/// Decoding errors (`InvalidLength`, `InvalidRecoveryId`) are hard
/// input-validation failures: the bytes are not a signature at all.
/// The remaining variants mean the bytes parsed but do not authenticate
/// anything.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The wire encoding is not exactly 65 bytes (r ‖ s ‖ v)
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    /// Invalid recovery byte (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// R or S is outside the valid scalar range [1, n-1]
    #[error("Signature scalar out of range")]
    InvalidScalar,

    /// Signature has a high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Failed to recover a public key from the signature
    #[error("Failed to recover public key")]
    RecoveryFailed,
}
