//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{Authorization, EcdsaSignature};
use crate::domain::errors::SignatureError;
use shared_types::{Address, Hash};

/// Primary Signature Verification API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SignatureVerificationApi: Send + Sync {
    /// Recover the signer of a digest from a packed 65-byte signature.
    ///
    /// The digest is used as supplied. For a personal-signed digest pass the
    /// hash returned by `sign_message`.
    ///
    /// # Errors
    /// - `InvalidDigestLength` if `digest` is not exactly 32 bytes
    /// - `InvalidFormat` / `MalleableSignature` / `InvalidRecoveryId` for
    ///   malformed signatures
    fn recover_address(&self, digest: &[u8], signature: &[u8]) -> Result<Address, SignatureError>;

    /// Compute the prefixed hash a wallet signs for `digest`.
    fn sign_message(&self, digest: &[u8]) -> Result<Hash, SignatureError>;

    /// Recover the personal-signer of `digest` (signed-message prefix
    /// applied) and wrap it in an `Authorization`.
    fn authorize(&self, digest: &[u8], signature: &[u8]) -> Result<Authorization, SignatureError>;

    /// Same as `authorize`, for a checked digest and a parsed signature.
    fn authorize_signature(
        &self,
        digest: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Authorization, SignatureError>;

    /// Recover the signer and require it to be `expected`.
    ///
    /// # Errors
    /// - `SignerMismatch` if another key produced the signature
    fn verify_signer(
        &self,
        digest: &[u8],
        signature: &[u8],
        expected: Address,
    ) -> Result<Authorization, SignatureError>;
}
