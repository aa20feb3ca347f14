//! # Signature Verification Service
//!
//! Application service layer that implements the `SignatureVerificationApi` trait.
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SignatureVerificationApi`)
//! - Delegates cryptographic operations to the domain layer
//! - Logs recovery outcomes

use crate::domain::ecdsa;
use crate::domain::entities::{Authorization, EcdsaSignature};
use crate::domain::errors::SignatureError;
use crate::ports::inbound::SignatureVerificationApi;
use shared_types::{Address, Hash};
use tracing::{debug, warn};

/// Signature Verification Service.
///
/// Stateless; cheap to clone and share behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SignatureVerificationService;

impl SignatureVerificationService {
    /// Create a new signature verification service.
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerificationApi for SignatureVerificationService {
    fn recover_address(&self, digest: &[u8], signature: &[u8]) -> Result<Address, SignatureError> {
        let result = ecdsa::recover_address(digest, signature);
        match &result {
            Ok(address) => debug!(recovered = %address, "Signer recovered"),
            Err(e) => warn!(error = %e, digest_len = digest.len(), "Signer recovery failed"),
        }
        result
    }

    fn sign_message(&self, digest: &[u8]) -> Result<Hash, SignatureError> {
        ecdsa::sign_message(digest)
    }

    fn authorize(&self, digest: &[u8], signature: &[u8]) -> Result<Authorization, SignatureError> {
        let checked = ecdsa::check_digest(digest)?;
        let signature = EcdsaSignature::from_bytes(signature)?;
        self.authorize_signature(&checked, &signature)
    }

    fn authorize_signature(
        &self,
        digest: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Authorization, SignatureError> {
        let signer = ecdsa::recover_personal_signer(digest, signature).map_err(|e| {
            warn!(error = %e, "Authorization rejected");
            e
        })?;
        debug!(signer = %signer, "Authorization issued");
        Ok(Authorization::new(signer, *digest))
    }

    fn verify_signer(
        &self,
        digest: &[u8],
        signature: &[u8],
        expected: Address,
    ) -> Result<Authorization, SignatureError> {
        let authorization = self.authorize(digest, signature)?;

        if authorization.signer() != expected {
            warn!(expected = %expected, actual = %authorization.signer(), "Signer mismatch");
            return Err(SignatureError::SignerMismatch {
                expected,
                actual: authorization.signer(),
            });
        }

        Ok(authorization)
    }
}
