//! secp256k1 recovery and signer verification.
//!
//! ## Security Notes
//!
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Malleability Prevention (EIP-2)**: S must be strictly less than n/2
//! - **Constant-Time Comparisons**: range checks use the `subtle` crate
//! - Curve arithmetic is delegated to the `k256` crate; nothing here
//!   reimplements point recovery

use crate::entities::EcdsaSignature;
use crate::errors::SignatureError;
use crate::message::keccak256;
use escrow_types::{Address, Hash, ZERO_ADDRESS};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// secp256k1 curve order n.
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (malleability boundary).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Check whether a claimed signer produced `signature` over `digest`.
///
/// Returns `false` and never errors: a malformed scalar, a failed
/// recovery, a mismatched signer, and the null identity all collapse to
/// "not verified". Callers that need to distinguish decoding failures
/// should decode with [`EcdsaSignature::from_bytes`] first.
pub fn verify_signer(expected: Address, digest: &Hash, signature: &EcdsaSignature) -> bool {
    if expected == ZERO_ADDRESS {
        return false;
    }

    matches!(recover_signer(digest, signature), Ok(recovered) if recovered == expected)
}

/// Recover the signer's address from a signature over `digest`.
///
/// # Errors
///
/// - [`SignatureError::InvalidScalar`] if R or S is outside [1, n-1]
/// - [`SignatureError::MalleableSignature`] if S is in the upper half of
///   the curve order (EIP-2)
/// - [`SignatureError::InvalidRecoveryId`] if the recovery byte is not a
///   normalized 27/28 (or raw 0/1)
/// - [`SignatureError::RecoveryFailed`] if no public key can be recovered
pub fn recover_signer(digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidScalar);
    }

    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = match Signature::from_slice(&sig_bytes) {
        Ok(s) => {
            sig_bytes.zeroize();
            s
        }
        Err(_) => {
            sig_bytes.zeroize();
            return Err(SignatureError::InvalidScalar);
        }
    };

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Derive the address of a public key: last 20 bytes of
/// keccak256(uncompressed key without the 0x04 prefix).
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Invert an S value: s' = n - s. Turns a low-S signature into its
/// malleable twin; exposed for adversarial tests.
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = i32::from(SECP256K1_ORDER[i]) - i32::from(s[i]) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

/// Constant-time big-endian comparison: a < b.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(a[i] < b[i]));
        let byte_greater = Choice::from(u8::from(a[i] > b[i]));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less
}

/// S must be strictly below n/2 (EIP-2).
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less_than(s, &SECP256K1_HALF_ORDER).into()
}

/// Scalars must be in [1, n-1] per SEC1.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let valid = !is_zero & ct_less_than(scalar, &SECP256K1_ORDER);
    valid.into()
}

/// Map a recovery byte to the canonical recovery id the curve primitive
/// expects. Raw 0/1 is accepted alongside the legacy 27/28 form.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Signing fixtures for tests. Enabled in-crate under `cfg(test)` and for
/// downstream suites via the `test-helpers` feature; never part of the
/// production surface.
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use super::*;
    use k256::ecdsa::SigningKey;

    pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let verifying_key = *signing_key.verifying_key();
        (signing_key, verifying_key)
    }

    /// Sign a digest, normalizing to a low-S signature with a matching
    /// recovery byte.
    pub fn sign(digest: &Hash, private_key: &SigningKey) -> EcdsaSignature {
        let (sig, recid) = private_key
            .sign_prehash_recoverable(digest)
            .expect("signing failed");

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        if is_low_s(&s) {
            EcdsaSignature {
                r,
                s,
                v: recid.to_byte() + 27,
            }
        } else {
            // Flip both S and the recovery id
            EcdsaSignature {
                r,
                s: invert_s(&s),
                v: if recid.to_byte() == 0 { 28 } else { 27 },
            }
        }
    }
}
