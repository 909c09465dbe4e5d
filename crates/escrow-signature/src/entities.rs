//! Wire signature encoding.
//!
//! Settlement signatures travel as a fixed 65-byte blob: two 32-byte
//! scalars followed by one recovery byte. Some signers emit the raw
//! recovery parameter (0/1), others the legacy offset form (27/28);
//! decoding normalizes to the legacy form so the rest of the crate only
//! ever sees 27 or 28.

use crate::errors::SignatureError;
use serde::{Deserialize, Serialize};

/// Length of the wire encoding: r (32) ‖ s (32) ‖ v (1).
pub const SIGNATURE_LENGTH: usize = 65;

/// A recoverable ECDSA signature on the secp256k1 curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery byte, normalized to 27 or 28
    pub v: u8,
}

impl EcdsaSignature {
    /// Decode the fixed 65-byte wire form.
    ///
    /// # Errors
    ///
    /// - [`SignatureError::InvalidLength`] if the input is not 65 bytes.
    ///   This is an input-validation failure, not a verification failure.
    /// - [`SignatureError::InvalidRecoveryId`] if the recovery byte is not
    ///   one of 0, 1, 27, 28.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        let v = match bytes[64] {
            0 | 27 => 27,
            1 | 28 => 28,
            other => return Err(SignatureError::InvalidRecoveryId(other)),
        };

        Ok(Self { r, s, v })
    }

    /// Re-encode as the 65-byte wire form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}
