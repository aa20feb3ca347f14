//! # Error Types
//!
//! All error types for the Proxy-Wallet.

use crate::ports::outbound::StoreError;
use pw_01_signature_verification::SignatureError;
use shared_types::{Address, DataId, U256};
use thiserror::Error;

// =============================================================================
// WALLET ERRORS
// =============================================================================

/// Errors returned by wallet operations.
///
/// Every error aborts the call as a whole: no state is committed, no gas is
/// accrued and no notification is published.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Principal lacks the required role.
    #[error("unauthorized: {principal} may not call {operation}")]
    Unauthorized {
        /// Address the call ran on behalf of.
        principal: Address,
        /// Operation that was refused.
        operation: &'static str,
    },

    /// Address is already an administrator.
    #[error("administrator already registered: {0}")]
    DuplicateAdministrator(Address),

    /// Refund recipient is neither owner nor administrator.
    #[error("not an administrator: {0}")]
    UnknownAdministrator(Address),

    /// No user registered under this identity.
    #[error("user not found: {0}")]
    UserNotFound(Address),

    /// Session signer is not owner, administrator or registered user.
    #[error("session signer not authorized: {signer}")]
    UnauthorizedSession {
        /// Address recovered from the session signature.
        signer: Address,
    },

    /// No session is stored under this key.
    #[error("session not found: {0}")]
    SessionNotFound(DataId),

    /// A session is already open under this key.
    #[error("session already open: {0}")]
    SessionAlreadyOpen(DataId),

    /// The session under this key was already closed.
    #[error("session already closed: {0}")]
    SessionAlreadyClosed(DataId),

    /// Debit exceeds the account balance.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the call needed.
        required: U256,
        /// Balance actually held.
        available: U256,
    },

    /// Credit would overflow a 256-bit balance.
    #[error("balance overflow crediting {0}")]
    BalanceOverflow(Address),

    /// Gas accumulator would overflow.
    #[error("gas accumulator overflow")]
    GasOverflow,

    /// The contract was killed.
    #[error("contract is inactive")]
    ContractInactive,

    /// Signature recovery failed.
    #[error("signature error: {0}")]
    Signature(#[from] SignatureError),

    /// Committing the new state failed.
    #[error("state store error: {0}")]
    Store(#[from] StoreError),

    /// Construction-time configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WalletError {
    /// Short, stable label used for metrics and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::DuplicateAdministrator(_) => "duplicate_administrator",
            Self::UnknownAdministrator(_) => "unknown_administrator",
            Self::UserNotFound(_) => "user_not_found",
            Self::UnauthorizedSession { .. } => "unauthorized_session",
            Self::SessionNotFound(_) => "session_not_found",
            Self::SessionAlreadyOpen(_) => "session_already_open",
            Self::SessionAlreadyClosed(_) => "session_already_closed",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::BalanceOverflow(_) => "balance_overflow",
            Self::GasOverflow => "gas_overflow",
            Self::ContractInactive => "contract_inactive",
            Self::Signature(SignatureError::InvalidDigestLength { .. }) => "invalid_digest_length",
            Self::Signature(_) => "signature",
            Self::Store(_) => "store",
            Self::Config(_) => "config",
        }
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors raised while loading or validating a `WalletConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config: {0}")]
    Io(String),

    /// The configuration is not valid JSON for this schema.
    #[error("cannot parse config: {0}")]
    Parse(String),

    /// At least one administrator is required.
    #[error("administrator list is empty")]
    NoAdministrators,

    /// The same address appears twice in the administrator list.
    #[error("duplicate administrator in config: {0}")]
    DuplicateAdministrator(Address),

    /// `owner_index` does not select an administrator.
    #[error("owner index {index} out of range for {count} administrators")]
    OwnerIndexOutOfRange {
        /// Configured index.
        index: usize,
        /// Number of administrators.
        count: usize,
    },

    /// Genesis allocations overflow the 256-bit total supply.
    #[error("allocation overflow for {0}")]
    AllocationOverflow(Address),

    /// The contract account is also the owner or an administrator.
    #[error("contract address {0} is a privileged account")]
    ContractAddressPrivileged(Address),
}
