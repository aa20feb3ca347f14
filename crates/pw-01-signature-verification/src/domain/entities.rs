//! # Domain Entities
//!
//! Signature encoding and the `Authorization` capability produced by a
//! successful recovery.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};

// =============================================================================
// ECDSA Types (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
///
/// Wire format is 65 bytes: `r (32) || s (32) || v (1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID; 0 and 1 are normalized to 27 and 28 when built through this type
    pub v: u8,
}

impl EcdsaSignature {
    /// Length of the packed `r || s || v` encoding.
    pub const LEN: usize = 65;

    /// Build a signature from its components, normalizing `v` (0/1 → 27/28).
    #[must_use]
    pub fn from_parts(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Self {
            r,
            s,
            v: normalize_v(v),
        }
    }

    /// Parse a packed 65-byte signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != Self::LEN {
            return Err(SignatureError::InvalidFormat);
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        Ok(Self::from_parts(r, s, bytes[64]))
    }

    /// Pack into the 65-byte wire format.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

/// Wallets sign with v ∈ {0, 1}; the contract ABI expects {27, 28}.
/// Any other value is kept as sent so a rejection reports it unchanged.
fn normalize_v(v: u8) -> u8 {
    match v {
        0 | 1 => v + 27,
        other => other,
    }
}

// =============================================================================
// Authorization capability
// =============================================================================

/// Proof that `signer` signed `digest`.
///
/// Only this crate can construct one, so holding an `Authorization` means a
/// signature was actually recovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Authorization {
    signer: Address,
    digest: Hash,
}

impl Authorization {
    pub(crate) fn new(signer: Address, digest: Hash) -> Self {
        Self { signer, digest }
    }

    /// The recovered signer.
    #[must_use]
    pub fn signer(&self) -> Address {
        self.signer
    }

    /// The (unprefixed) digest that was signed.
    #[must_use]
    pub fn digest(&self) -> &Hash {
        &self.digest
    }
}
