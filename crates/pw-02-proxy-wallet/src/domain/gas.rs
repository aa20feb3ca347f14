//! # Gas Accounting
//!
//! Relayers pay network cost for calls they submit on a principal's behalf.
//! The wallet keeps a running total of that cost so an administrator can be
//! reimbursed from the contract account later.

use crate::errors::WalletError;
use serde::{Deserialize, Serialize};
use shared_types::U256;

// =============================================================================
// BASE COSTS
// =============================================================================

/// EVM base costs the default schedule is built from.
pub mod costs {
    /// Base transaction gas.
    pub const TX_BASE: u64 = 21_000;
    /// SSTORE when setting zero to non-zero.
    pub const SSTORE_SET: u64 = 20_000;
    /// SSTORE when overwriting a non-zero slot.
    pub const SSTORE_RESET: u64 = 2_900;
    /// ecrecover precompile.
    pub const ECRECOVER: u64 = 3_000;
    /// KECCAK256 static cost.
    pub const KECCAK256: u64 = 30;
    /// KECCAK256 cost per 32-byte word.
    pub const KECCAK256_WORD: u64 = 6;
    /// LOG base cost.
    pub const LOG: u64 = 375;
    /// Cost per LOG topic.
    pub const LOG_TOPIC: u64 = 375;
    /// Cost per byte of LOG data.
    pub const LOG_DATA: u64 = 8;
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Every state-changing wallet operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `recover_address`
    RecoverAddress,
    /// `sign_message`
    SignMessage,
    /// `add_administrator`
    AddAdministrator,
    /// `set_new_user`
    SetNewUser,
    /// `set_new_username`
    SetNewUsername,
    /// `set_new_user_public_key`
    SetNewUserPublicKey,
    /// `start_session`
    StartSession,
    /// `close_session`
    CloseSession,
    /// `transfer`
    Transfer,
    /// `deposit`
    Deposit,
    /// `refund_gas_costs`
    RefundGasCosts,
    /// `kill`
    Kill,
}

impl Operation {
    /// Operation name as used in logs and metric labels.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RecoverAddress => "recover_address",
            Self::SignMessage => "sign_message",
            Self::AddAdministrator => "add_administrator",
            Self::SetNewUser => "set_new_user",
            Self::SetNewUsername => "set_new_username",
            Self::SetNewUserPublicKey => "set_new_user_public_key",
            Self::StartSession => "start_session",
            Self::CloseSession => "close_session",
            Self::Transfer => "transfer",
            Self::Deposit => "deposit",
            Self::RefundGasCosts => "refund_gas_costs",
            Self::Kill => "kill",
        }
    }

    /// Whether a successful relayed call of this operation adds to the
    /// accumulator. The refund itself never does, otherwise it could never
    /// leave the counter at zero.
    #[must_use]
    pub fn accrues_gas(self) -> bool {
        !matches!(self, Self::RefundGasCosts)
    }
}

// =============================================================================
// SCHEDULE
// =============================================================================

/// Per-operation cost charged for relayed calls.
///
/// Missing fields in a configuration file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSchedule {
    /// Cost of a relayed `recover_address`.
    pub recover_address: u64,
    /// Cost of a relayed `sign_message`.
    pub sign_message: u64,
    /// Cost of a relayed `add_administrator`.
    pub add_administrator: u64,
    /// Cost of a relayed `set_new_user`.
    pub set_new_user: u64,
    /// Cost of a relayed `set_new_username`.
    pub set_new_username: u64,
    /// Cost of a relayed `set_new_user_public_key`.
    pub set_new_user_public_key: u64,
    /// Cost of a relayed `start_session`.
    pub start_session: u64,
    /// Cost of a relayed `close_session`.
    pub close_session: u64,
    /// Cost of a relayed `transfer`.
    pub transfer: u64,
    /// Cost of a relayed `deposit`.
    pub deposit: u64,
    /// Cost of a relayed `kill`.
    pub kill: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        use costs::*;

        let event = |topics: u64, words: u64| LOG + LOG_TOPIC * topics + LOG_DATA * 32 * words;
        let prefix_hash = KECCAK256 + KECCAK256_WORD * 2;

        Self {
            recover_address: TX_BASE + prefix_hash + ECRECOVER + event(1, 1),
            sign_message: TX_BASE + prefix_hash + event(1, 1),
            add_administrator: TX_BASE + SSTORE_SET * 2 + event(1, 1),
            set_new_user: TX_BASE + SSTORE_SET * 3,
            set_new_username: TX_BASE + SSTORE_RESET + event(1, 3),
            set_new_user_public_key: TX_BASE + SSTORE_RESET + event(1, 3),
            start_session: TX_BASE
                + KECCAK256
                + KECCAK256_WORD * 4
                + prefix_hash
                + ECRECOVER
                + SSTORE_SET * 8
                + event(1, 3),
            close_session: TX_BASE + SSTORE_RESET + event(1, 3) * 2,
            transfer: TX_BASE + SSTORE_RESET * 2 + event(3, 1),
            deposit: TX_BASE + SSTORE_RESET + event(2, 1),
            kill: TX_BASE + SSTORE_RESET * 2 + event(1, 1),
        }
    }
}

impl GasSchedule {
    /// A schedule that charges nothing.
    #[must_use]
    pub fn free() -> Self {
        Self {
            recover_address: 0,
            sign_message: 0,
            add_administrator: 0,
            set_new_user: 0,
            set_new_username: 0,
            set_new_user_public_key: 0,
            start_session: 0,
            close_session: 0,
            transfer: 0,
            deposit: 0,
            kill: 0,
        }
    }

    /// Cost charged for a relayed call of `operation`.
    #[must_use]
    pub fn cost(&self, operation: Operation) -> U256 {
        let units = match operation {
            Operation::RecoverAddress => self.recover_address,
            Operation::SignMessage => self.sign_message,
            Operation::AddAdministrator => self.add_administrator,
            Operation::SetNewUser => self.set_new_user,
            Operation::SetNewUsername => self.set_new_username,
            Operation::SetNewUserPublicKey => self.set_new_user_public_key,
            Operation::StartSession => self.start_session,
            Operation::CloseSession => self.close_session,
            Operation::Transfer => self.transfer,
            Operation::Deposit => self.deposit,
            Operation::RefundGasCosts => 0,
            Operation::Kill => self.kill,
        };
        U256::from(units)
    }
}

// =============================================================================
// ACCUMULATOR
// =============================================================================

/// Running total of unrefunded relayer cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasMeter {
    accumulated: U256,
}

impl GasMeter {
    /// Current unrefunded total.
    #[must_use]
    pub fn accumulated(&self) -> U256 {
        self.accumulated
    }

    /// Add `cost` to the total.
    pub fn accrue(&mut self, cost: U256) -> Result<(), WalletError> {
        self.accumulated = self
            .accumulated
            .checked_add(cost)
            .ok_or(WalletError::GasOverflow)?;
        Ok(())
    }

    /// Reset the total to zero, returning what it held.
    pub fn take(&mut self) -> U256 {
        std::mem::take(&mut self.accumulated)
    }
}
