//! # Wallet Configuration
//!
//! Construction-time parameters. Loadable from JSON:
//!
//! ```json
//! {
//!   "contract_address": "0x00000000000000000000000000000000000000cc",
//!   "administrators": ["0x…", "0x…"],
//!   "owner_index": 0,
//!   "initial_user": { "id": "0x…", "username": "alice", "public_key": "0x04…" },
//!   "allocations": [{ "address": "0x…", "amount": "0x3e8" }],
//!   "gas_schedule": { "transfer": 30000 },
//!   "name_registry": "0x…"
//! }
//! ```

use crate::domain::gas::GasSchedule;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use std::collections::HashSet;
use std::path::Path;

/// User registered at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialUser {
    pub id: Address,
    pub username: String,
    pub public_key: String,
}

/// Genesis balance. Repeated addresses are summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub address: Address,
    pub amount: U256,
}

/// Wallet construction parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// The contract's own ledger account.
    pub contract_address: Address,
    /// Initial governance set, in order.
    pub administrators: Vec<Address>,
    /// Index into `administrators` selecting the owner.
    #[serde(default)]
    pub owner_index: usize,
    #[serde(default)]
    pub initial_user: Option<InitialUser>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    #[serde(default)]
    pub gas_schedule: GasSchedule,
    /// Opaque name-registry address.
    #[serde(default)]
    pub name_registry: Option<Address>,
}

impl WalletConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Check structural rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.administrators.is_empty() {
            return Err(ConfigError::NoAdministrators);
        }

        let mut seen = HashSet::with_capacity(self.administrators.len());
        for admin in &self.administrators {
            if !seen.insert(admin) {
                return Err(ConfigError::DuplicateAdministrator(*admin));
            }
        }

        self.owner()?;

        // A refund or kill from the contract account must move value out of it
        if seen.contains(&self.contract_address) {
            return Err(ConfigError::ContractAddressPrivileged(self.contract_address));
        }

        // Every balance must stay summable into the total supply
        let mut supply = U256::zero();
        for allocation in &self.allocations {
            supply = supply
                .checked_add(allocation.amount)
                .ok_or(ConfigError::AllocationOverflow(allocation.address))?;
        }

        Ok(())
    }

    /// The administrator selected by `owner_index`.
    pub fn owner(&self) -> Result<Address, ConfigError> {
        self.administrators
            .get(self.owner_index)
            .copied()
            .ok_or(ConfigError::OwnerIndexOutOfRange {
                index: self.owner_index,
                count: self.administrators.len(),
            })
    }
}
