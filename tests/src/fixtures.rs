//! # Test Fixtures
//!
//! Deterministic keys, a five-administrator wallet on the in-memory
//! adapters, and signing helpers shared by integration tests and benchmarks.

use k256::ecdsa::SigningKey;
use pw_01_signature_verification::test_helpers::{address_of, keypair_from_seed, sign_digest};
use pw_01_signature_verification::keccak256;
use pw_02_proxy_wallet::prelude::*;
use shared_bus::InMemoryEventBus;
use shared_types::{Address, DataId, DeviceId, U256};
use std::sync::Arc;

/// The contract's own ledger account.
pub const CONTRACT: Address = Address::new([0xCC; 20]);

/// Session key used by the end-to-end scenario.
pub const E2E_DATA_ID: &str = "0xbe0945aeb93b0db5e5d52f4d7c9fc3f2ba5d7b0e5ef5bb3ea3a5e2e5f7c0d6a1";

/// Device used by the end-to-end scenario.
pub const E2E_DEVICE_ID: &str = "0x65950f4fa1a3e7d3c2b1a09f8e7d6c5b4a39281706f5e4d3c2b1a0f9e8d7c6b5";

/// Funds held by the contract at genesis.
pub const CONTRACT_FUNDS: u64 = 10_000_000;

/// A wallet plus the keys of its administrators.
pub struct WalletHarness {
    pub wallet: InMemoryWallet,
    pub bus: Arc<InMemoryEventBus>,
    pub admins: Vec<SigningKey>,
}

impl WalletHarness {
    /// Five administrators from seeds 1..=5; the first is the owner.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(|_| {})
    }

    /// Same as `new`, with a hook to adjust the configuration.
    pub fn with_config(adjust: impl FnOnce(&mut WalletConfig)) -> anyhow::Result<Self> {
        let admins: Vec<SigningKey> = (1..=5).map(keypair_from_seed).collect();
        let mut config = WalletConfig {
            contract_address: CONTRACT,
            administrators: admins.iter().map(address_of).collect(),
            owner_index: 0,
            allocations: vec![Allocation {
                address: CONTRACT,
                amount: U256::from(CONTRACT_FUNDS),
            }],
            ..WalletConfig::default()
        };
        adjust(&mut config);

        let bus = Arc::new(InMemoryEventBus::new());
        let wallet = ProxyWalletService::new(config, InMemoryStateStore::new(), bus.clone())?;
        Ok(Self { wallet, bus, admins })
    }

    pub fn admin(&self, index: usize) -> Address {
        address_of(&self.admins[index])
    }

    pub fn owner(&self) -> Caller {
        Caller::Direct(self.admin(0))
    }

    /// A relayed caller whose principal is `key`.
    pub fn relayed_by(&self, key: &SigningKey) -> anyhow::Result<Caller> {
        let digest = keccak256(b"relayed call");
        let signature = sign_digest(&digest, key).to_bytes();
        Ok(Caller::Relayed {
            relayer: Address::new([0xEE; 20]),
            authorization: self.wallet.authorize(&digest, &signature)?,
        })
    }
}

/// Signed session request for `key`.
pub fn session_request(
    key: &SigningKey,
    data_id: DataId,
    device_id: DeviceId,
) -> StartSessionRequest {
    let payload = SessionPayload {
        first: keccak256(b"first"),
        second: keccak256(b"second"),
        hashed: keccak256(b"hashed"),
        subject: keccak256(b"subject"),
    };
    StartSessionRequest {
        data_id,
        device_id,
        signature: sign_digest(&payload.digest(), key),
        payload,
        start_time: 0,
        duration: 0,
    }
}
