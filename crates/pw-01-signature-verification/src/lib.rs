//! # Signature Verification Subsystem (PW-01)
//!
//! Recovers the signer of off-chain signed messages for the Proxy-Wallet.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for the inbound interface
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Prefixing**: `recover_address` takes the digest as supplied;
//!   authorizations recover personal-signed digests with the prefix applied
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Capability**: an `Authorization` can only be minted by this crate

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::ecdsa::{
    address_from_pubkey, keccak256, recover_address, recover_personal_signer, session_digest,
    sign_message, to_signed_message_hash, DIGEST_LEN, SIGNED_MESSAGE_PREFIX,
};
pub use domain::entities::{Authorization, EcdsaSignature};
pub use domain::errors::SignatureError;
pub use ports::inbound::SignatureVerificationApi;
pub use service::SignatureVerificationService;

#[cfg(any(test, feature = "test-helpers"))]
pub use domain::ecdsa::test_helpers;
