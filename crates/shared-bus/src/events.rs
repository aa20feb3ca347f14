//! # Wallet Events
//!
//! Notifications emitted by the Proxy-Wallet. Field names follow the
//! contract's event arguments so tooling can match on them directly.

use serde::{Deserialize, Serialize};
use shared_types::{Address, DataId, DeviceId, Hash, SessionState, U256};

/// All notifications that can be published to the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "args")]
pub enum WalletEvent {
    // =========================================================================
    // SIGNATURES
    // =========================================================================
    /// Result of `recover_address`.
    AddressRecovered {
        /// The signer recovered from the digest and signature.
        recovered_address: Address,
    },

    /// Result of `sign_message`.
    MessageSigned {
        /// The prefixed hash a wallet would sign.
        signed_message: Hash,
    },

    // =========================================================================
    // GOVERNANCE
    // =========================================================================
    /// An administrator joined the governance set.
    AdministratorAdded {
        /// The new administrator.
        admin: Address,
    },

    // =========================================================================
    // USERS
    // =========================================================================
    /// A user's name was replaced.
    UsernameChanged {
        /// User identity.
        id: Address,
        /// New username.
        username: String,
    },

    /// A user's public key was replaced.
    PublicKeyChanged {
        /// User identity.
        id: Address,
        /// New hex-encoded public key.
        public_key: String,
    },

    // =========================================================================
    // SESSIONS
    // =========================================================================
    /// A device session was opened.
    SessionStarted {
        /// Device the session is bound to.
        device_id: DeviceId,
        /// Session key.
        data_id: DataId,
        /// Always `Open`.
        state: SessionState,
    },

    /// A session was closed (session-scoped notification).
    SessionClosed {
        /// Device the session was bound to.
        device_id: DeviceId,
        /// Session key.
        data_id: DataId,
        /// Always `Closed`.
        state: SessionState,
    },

    /// A session was closed (device-scoped notification).
    DeviceSessionClosed {
        /// Device the session was bound to.
        device_id: DeviceId,
        /// Session key.
        data_id: DataId,
        /// Always `Closed`.
        state: SessionState,
    },

    // =========================================================================
    // LEDGER
    // =========================================================================
    /// Value moved between two ledger accounts.
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Amount moved.
        amount: U256,
    },

    /// Value attached to a call was credited to the contract account.
    Deposited {
        /// The call's principal.
        from: Address,
        /// Amount received.
        amount: U256,
    },

    // =========================================================================
    // GAS / LIFECYCLE
    // =========================================================================
    /// Accumulated relayer cost was paid out.
    GasRefunded {
        /// Administrator that received the refund.
        admin: Address,
        /// Amount paid (zero when nothing had accrued).
        amount: U256,
    },

    /// The contract was permanently deactivated.
    ContractKilled {
        /// Owner that received the residual balance.
        contract_owner: Address,
    },
}

impl WalletEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AddressRecovered { .. } | Self::MessageSigned { .. } => EventTopic::Signatures,
            Self::AdministratorAdded { .. } => EventTopic::Governance,
            Self::UsernameChanged { .. } | Self::PublicKeyChanged { .. } => EventTopic::Users,
            Self::SessionStarted { .. }
            | Self::SessionClosed { .. }
            | Self::DeviceSessionClosed { .. } => EventTopic::Sessions,
            Self::Transfer { .. } | Self::Deposited { .. } => EventTopic::Ledger,
            Self::GasRefunded { .. } => EventTopic::Gas,
            Self::ContractKilled { .. } => EventTopic::Lifecycle,
        }
    }

    /// Event name as it appears in a call receipt.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddressRecovered { .. } => "AddressRecovered",
            Self::MessageSigned { .. } => "MessageSigned",
            Self::AdministratorAdded { .. } => "AdministratorAdded",
            Self::UsernameChanged { .. } => "UsernameChanged",
            Self::PublicKeyChanged { .. } => "PublicKeyChanged",
            Self::SessionStarted { .. } => "SessionStarted",
            Self::SessionClosed { .. } => "SessionClosed",
            Self::DeviceSessionClosed { .. } => "DeviceSessionClosed",
            Self::Transfer { .. } => "Transfer",
            Self::Deposited { .. } => "Deposited",
            Self::GasRefunded { .. } => "GasRefunded",
            Self::ContractKilled { .. } => "ContractKilled",
        }
    }

    /// Device this event concerns, if any.
    #[must_use]
    pub fn device_id(&self) -> Option<DeviceId> {
        match self {
            Self::SessionStarted { device_id, .. }
            | Self::SessionClosed { device_id, .. }
            | Self::DeviceSessionClosed { device_id, .. } => Some(*device_id),
            _ => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Recovery and prefixing results.
    Signatures,
    /// Administrator set changes.
    Governance,
    /// User record changes.
    Users,
    /// Session lifecycle.
    Sessions,
    /// Transfers and deposits.
    Ledger,
    /// Gas refunds.
    Gas,
    /// Contract teardown.
    Lifecycle,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Only events bound to this device, when set.
    pub device: Option<DeviceId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            device: None,
        }
    }

    /// Create a filter for the notifications of a single device.
    #[must_use]
    pub fn device(device: DeviceId) -> Self {
        Self {
            topics: Vec::new(),
            device: Some(device),
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &WalletEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let device_match = match self.device {
            None => true,
            Some(device) => event.device_id() == Some(device),
        };

        topic_match && device_match
    }
}
