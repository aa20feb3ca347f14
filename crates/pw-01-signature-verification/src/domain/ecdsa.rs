//! # ECDSA Recovery (secp256k1)
//!
//! Pure domain logic for signed-message recovery.
//!
//! ## Signed-message prefix
//!
//! `recover_address` recovers over the digest exactly as supplied. Clients
//! that personal-sign a 32-byte hash sign
//! `keccak256("\x19Ethereum Signed Message:\n32" || digest)` instead; pass
//! that prefixed hash (see `sign_message`), or use
//! `recover_personal_signer`, which applies the prefix itself.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be STRICTLY LESS THAN SECP256K1_HALF_ORDER
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: Uses `subtle` crate for side-channel resistance
//! - Uses k256 crate for cryptographic operations

use super::entities::EcdsaSignature;
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};
use subtle::{Choice, ConstantTimeEq};

/// Prefix wallets apply to a 32-byte digest before personal-signing it.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Required digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// DIGEST HANDLING
// =============================================================================

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Reject anything that is not a 32-byte digest.
///
/// A hex hash with its `0x` stripped, or a hash cut short by a client, must
/// fail here instead of being recovered against the wrong message.
pub fn check_digest(digest: &[u8]) -> Result<Hash, SignatureError> {
    Hash::try_from(digest).map_err(|_| SignatureError::InvalidDigestLength {
        expected: DIGEST_LEN,
        actual: digest.len(),
    })
}

/// Apply the signed-message prefix to a digest and hash the result.
pub fn to_signed_message_hash(digest: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(digest);
    hasher.finalize().into()
}

/// Prefixed hash for a caller-supplied digest of unchecked length.
pub fn sign_message(digest: &[u8]) -> Result<Hash, SignatureError> {
    let digest = check_digest(digest)?;
    Ok(to_signed_message_hash(&digest))
}

/// Digest a device session payload is signed over.
pub fn session_digest(first: &Hash, second: &Hash, hashed: &Hash, subject: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(first);
    hasher.update(second);
    hasher.update(hashed);
    hasher.update(subject);
    hasher.finalize().into()
}

// =============================================================================
// RECOVERY
// =============================================================================

/// Recover the signer of a digest from a packed 65-byte signature.
///
/// No prefix is applied; see module docs.
pub fn recover_address(digest: &[u8], signature: &[u8]) -> Result<Address, SignatureError> {
    let digest = check_digest(digest)?;
    let signature = EcdsaSignature::from_bytes(signature)?;
    recover_signer(&digest, &signature)
}

/// Recover the signer of an already length-checked digest, as supplied.
pub fn recover_signer(digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    validate_components(signature)?;
    recover_prehashed(digest, signature)
}

/// Recover the signer of a personal-signed digest.
///
/// Same as `recover_signer` over `to_signed_message_hash(digest)`.
pub fn recover_personal_signer(
    digest: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    recover_signer(&to_signed_message_hash(digest), signature)
}

/// Scalar range and low-S checks, run before any curve arithmetic.
fn validate_components(signature: &EcdsaSignature) -> Result<(), SignatureError> {
    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }

    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    Ok(())
}

/// Public-key recovery over a 32-byte prehash.
fn recover_prehashed(prehash: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Derive an address from a public key: last 20 bytes of keccak256(x || y).
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address::new(address)
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Compare two 32-byte big-endian values in constant time.
///
/// Returns `(less, greater)`.
fn ct_compare(a: &[u8; 32], b: &[u8; 32]) -> (Choice, Choice) {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(a[i] < b[i]));
        let byte_greater = Choice::from(u8::from(a[i] > b[i]));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (less, greater)
}

/// Check if S value is in lower half of curve order (EIP-2).
///
/// S must be STRICTLY LESS THAN half_order.
fn is_low_s(s: &[u8; 32]) -> bool {
    let (less, _) = ct_compare(s, &SECP256K1_HALF_ORDER);
    less.into()
}

/// Check if a scalar value is in valid range [1, n-1] for ECDSA.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let (less, _) = ct_compare(scalar, &SECP256K1_ORDER);
    (!is_zero & less).into()
}

/// Parse recovery ID from a v value.
///
/// Accepted: 0, 1, 27, 28.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Invert S value: s' = n - s
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

// =============================================================================
// TEST HELPERS
// =============================================================================

/// Key generation and client-side signing, mirroring what a wallet does
/// before handing a signature to a relayer.
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use super::*;
    use k256::ecdsa::SigningKey;

    /// Generate a new random ECDSA keypair.
    pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let verifying_key = *signing_key.verifying_key();
        (signing_key, verifying_key)
    }

    /// Deterministic key for fixtures. `seed` must be non-zero.
    pub fn keypair_from_seed(seed: u8) -> SigningKey {
        SigningKey::from_slice(&[seed; 32]).expect("non-zero seed is a valid scalar")
    }

    /// Address controlled by a signing key.
    pub fn address_of(key: &SigningKey) -> Address {
        address_from_pubkey(key.verifying_key())
    }

    /// Sign a hash as-is, normalizing to low S.
    pub fn sign_prehash(message_hash: &Hash, private_key: &SigningKey) -> EcdsaSignature {
        let (sig, recid) = private_key
            .sign_prehash_recoverable(message_hash)
            .expect("signing failed");

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        let s_normalized = if is_low_s(&s) { s } else { invert_s(&s) };

        // Inverting S flips the parity of R's y-coordinate
        let v = if s_normalized == s {
            recid.to_byte() + 27
        } else if recid.to_byte() == 0 {
            28
        } else {
            27
        };

        EcdsaSignature {
            r,
            s: s_normalized,
            v,
        }
    }

    /// Personal-sign a 32-byte digest (prefix, hash, sign).
    pub fn sign_digest(digest: &Hash, private_key: &SigningKey) -> EcdsaSignature {
        sign_prehash(&to_signed_message_hash(digest), private_key)
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
