//! # Driving Ports (API - Inbound)
//!
//! Every operation the wallet exposes. Mutating operations take the
//! `Caller`; reads do not. Once the contract is killed every method except
//! `is_active` returns `WalletError::ContractInactive`.

use crate::domain::caller::Caller;
use crate::domain::sessions::{Session, StartSessionRequest};
use crate::domain::users::User;
use crate::errors::WalletError;
use shared_types::{Address, DataId, Hash, SessionState, U256};

/// Proxy-Wallet API.
pub trait ProxyWalletApi: Send + Sync {
    // =========================================================================
    // SIGNATURES
    // =========================================================================

    /// Recover the signer of `digest`, publishing `AddressRecovered`.
    fn recover_address(
        &self,
        caller: &Caller,
        digest: &[u8],
        signature: &[u8],
    ) -> Result<Address, WalletError>;

    /// Compute the signed-message hash of `digest`, publishing
    /// `MessageSigned`.
    fn sign_message(&self, caller: &Caller, digest: &[u8]) -> Result<Hash, WalletError>;

    // =========================================================================
    // ADMINISTRATORS
    // =========================================================================

    /// Add an administrator. Owner or administrator only.
    fn add_administrator(&self, caller: &Caller, admin: Address) -> Result<(), WalletError>;

    fn get_administrators_count(&self) -> Result<usize, WalletError>;

    /// Administrators in insertion order.
    fn get_all_administrators(&self) -> Result<Vec<Address>, WalletError>;

    fn is_administrator(&self, address: Address) -> Result<bool, WalletError>;

    // =========================================================================
    // USERS
    // =========================================================================

    /// Create or replace a user. No notification.
    fn set_new_user(
        &self,
        caller: &Caller,
        id: Address,
        username: String,
        public_key: String,
    ) -> Result<(), WalletError>;

    fn set_new_username(
        &self,
        caller: &Caller,
        id: Address,
        username: String,
    ) -> Result<(), WalletError>;

    fn set_new_user_public_key(
        &self,
        caller: &Caller,
        id: Address,
        public_key: String,
    ) -> Result<(), WalletError>;

    fn get_user(&self, id: Address) -> Result<User, WalletError>;

    fn get_users_count(&self) -> Result<usize, WalletError>;

    // =========================================================================
    // SESSIONS
    // =========================================================================

    /// Open a session for a device. Returns `SessionState::Open`.
    fn start_session(
        &self,
        caller: &Caller,
        request: StartSessionRequest,
    ) -> Result<SessionState, WalletError>;

    fn check_session_state(&self, data_id: DataId) -> Result<SessionState, WalletError>;

    fn get_session(&self, data_id: DataId) -> Result<Session, WalletError>;

    /// Close a session. Returns `SessionState::Closed`.
    fn close_session(&self, caller: &Caller, data_id: DataId)
        -> Result<SessionState, WalletError>;

    fn open_sessions_count(&self) -> Result<usize, WalletError>;

    // =========================================================================
    // LEDGER
    // =========================================================================

    fn get_balance(&self, account: Address) -> Result<U256, WalletError>;

    /// Move value out of the principal's own account.
    fn transfer(
        &self,
        caller: &Caller,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), WalletError>;

    /// Credit value attached to the call to the contract account.
    fn deposit(&self, caller: &Caller, amount: U256) -> Result<(), WalletError>;

    fn total_supply(&self) -> Result<U256, WalletError>;

    // =========================================================================
    // GAS
    // =========================================================================

    fn get_gas_cost(&self) -> Result<U256, WalletError>;

    /// Pay the accumulated cost to `admin` and reset it. Returns the amount.
    fn refund_gas_costs(&self, caller: &Caller, admin: Address) -> Result<U256, WalletError>;

    // =========================================================================
    // OWNER CONTROL
    // =========================================================================

    fn owner(&self) -> Result<Address, WalletError>;

    fn name_registry(&self) -> Result<Option<Address>, WalletError>;

    /// Lifecycle flag. Never fails.
    fn is_active(&self) -> bool;

    /// Sweep the contract account to the owner and deactivate permanently.
    fn kill(&self, caller: &Caller) -> Result<(), WalletError>;
}
