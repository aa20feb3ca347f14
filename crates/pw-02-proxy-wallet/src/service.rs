//! # Proxy Wallet Service
//!
//! Application service implementing `ProxyWalletApi`.
//!
//! ## Call Pipeline
//!
//! ```text
//! lock ─→ active? ─→ clone state ─→ run operation ─→ accrue gas (relayed)
//!                                        │                    │
//!                                      error               commit ─→ swap ─→ publish
//!                                        ↓
//!                            drop clone, count rejection
//! ```
//!
//! The lock is held for the whole call, so calls are totally ordered and
//! notifications leave in commit order.

use crate::adapters::InMemoryStateStore;
use crate::config::WalletConfig;
use crate::domain::caller::Caller;
use crate::domain::gas::{GasSchedule, Operation};
use crate::domain::invariants;
use crate::domain::sessions::{Session, StartSessionRequest};
use crate::domain::state::{Lifecycle, WalletState};
use crate::domain::users::User;
use crate::errors::WalletError;
use crate::ports::inbound::ProxyWalletApi;
use crate::ports::outbound::WalletStateStore;
use parking_lot::Mutex;
use pw_01_signature_verification::{
    Authorization, SignatureVerificationApi, SignatureVerificationService,
};
use shared_bus::{EventPublisher, InMemoryEventBus, WalletEvent};
use shared_types::{Address, DataId, Hash, SessionState, U256};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use wallet_telemetry::metrics::{
    CALL_REJECTIONS, GAS_REFUNDS, SESSIONS_CLOSED, SESSIONS_STARTED, SIGNATURES_RECOVERED,
    TRANSFERS,
};

/// Wallet wired to the in-memory adapters.
pub type InMemoryWallet = ProxyWalletService<InMemoryStateStore, InMemoryEventBus>;

/// Service counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceStats {
    /// Calls whose state was committed.
    pub calls_committed: u64,
    /// Calls rejected with an error.
    pub calls_rejected: u64,
    /// Committed calls that arrived through a relayer.
    pub relayed_calls: u64,
    /// Notifications handed to the publisher.
    pub events_published: u64,
}

/// The Proxy-Wallet.
pub struct ProxyWalletService<S: WalletStateStore, P: EventPublisher> {
    state: Mutex<WalletState>,
    store: S,
    publisher: Arc<P>,
    verifier: SignatureVerificationService,
    gas_schedule: GasSchedule,
    stats: Mutex<ServiceStats>,
}

impl<S: WalletStateStore, P: EventPublisher> ProxyWalletService<S, P> {
    /// Create the wallet.
    ///
    /// Resumes from the store's snapshot when there is one; otherwise builds
    /// the genesis state from `config` and commits it.
    pub fn new(config: WalletConfig, store: S, publisher: Arc<P>) -> Result<Self, WalletError> {
        config.validate()?;

        let state = match store.load()? {
            Some(snapshot) => {
                info!(
                    owner = %snapshot.owner,
                    active = snapshot.is_active(),
                    "Resuming wallet from stored snapshot"
                );
                snapshot
            }
            None => {
                let genesis = WalletState::genesis(&config)?;
                store.commit(&genesis)?;
                info!(
                    owner = %genesis.owner,
                    contract = %genesis.contract_address,
                    administrators = genesis.administrators.len(),
                    "Wallet created"
                );
                genesis
            }
        };

        Ok(Self {
            state: Mutex::new(state),
            store,
            publisher,
            verifier: SignatureVerificationService::new(),
            gas_schedule: config.gas_schedule,
            stats: Mutex::new(ServiceStats::default()),
        })
    }

    /// Recover a relayer authorization from a principal's signature.
    pub fn authorize(&self, digest: &[u8], signature: &[u8]) -> Result<Authorization, WalletError> {
        let authorization = self.verifier.authorize(digest, signature)?;
        SIGNATURES_RECOVERED.inc();
        Ok(authorization)
    }

    /// Copy of the committed state.
    pub fn snapshot(&self) -> WalletState {
        self.state.lock().clone()
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    pub fn publisher(&self) -> &Arc<P> {
        &self.publisher
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn gas_schedule(&self) -> &GasSchedule {
        &self.gas_schedule
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    /// Run a state-changing call.
    fn execute<T, F>(&self, caller: &Caller, operation: Operation, call: F) -> Result<T, WalletError>
    where
        F: FnOnce(&mut WalletState, Address, &mut Vec<WalletEvent>) -> Result<T, WalletError>,
    {
        let mut state = self.state.lock();

        match self.run(&state, caller, operation, call) {
            Ok((working, value, events)) => {
                *state = working;

                let published = events.len() as u64;
                for event in events {
                    self.publisher.publish(event);
                }

                let mut stats = self.stats.lock();
                stats.calls_committed += 1;
                stats.events_published += published;
                if caller.is_relayed() {
                    stats.relayed_calls += 1;
                }

                debug!(
                    operation = operation.name(),
                    events = published,
                    gas_cost = %state.gas.accumulated(),
                    "Call committed"
                );
                Ok(value)
            }
            Err(error) => {
                self.stats.lock().calls_rejected += 1;
                CALL_REJECTIONS
                    .with_label_values(&[operation.name()])
                    .inc();
                warn!(
                    operation = operation.name(),
                    principal = %caller.principal(),
                    kind = error.kind(),
                    error = %error,
                    "Call rejected"
                );
                Err(error)
            }
        }
    }

    fn run<T, F>(
        &self,
        committed: &WalletState,
        caller: &Caller,
        operation: Operation,
        call: F,
    ) -> Result<(WalletState, T, Vec<WalletEvent>), WalletError>
    where
        F: FnOnce(&mut WalletState, Address, &mut Vec<WalletEvent>) -> Result<T, WalletError>,
    {
        committed.ensure_active()?;

        let mut working = committed.clone();
        let mut events = Vec::new();
        let value = call(&mut working, caller.principal(), &mut events)?;

        if caller.is_relayed() && operation.accrues_gas() {
            working.gas.accrue(self.gas_schedule.cost(operation))?;
        }

        debug_assert!(invariants::check_state(&working), "{operation:?} broke state");
        debug_assert!(
            invariants::check_supply_conserved(committed, &working, operation, deposited(&events)),
            "{operation:?} changed supply"
        );
        debug_assert!(
            invariants::check_gas_monotonic(committed, &working, operation),
            "{operation:?} lowered gas"
        );

        self.store.commit(&working)?;
        Ok((working, value, events))
    }

    /// Run a read against the committed state.
    fn read<T>(&self, query: impl FnOnce(&WalletState) -> Result<T, WalletError>) -> Result<T, WalletError> {
        let state = self.state.lock();
        state.ensure_active()?;
        query(&state)
    }
}

fn deposited(events: &[WalletEvent]) -> U256 {
    events
        .iter()
        .filter_map(|event| match event {
            WalletEvent::Deposited { amount, .. } => Some(*amount),
            _ => None,
        })
        .fold(U256::zero(), U256::saturating_add)
}

impl<S: WalletStateStore, P: EventPublisher> ProxyWalletApi for ProxyWalletService<S, P> {
    // =========================================================================
    // SIGNATURES
    // =========================================================================

    #[instrument(skip_all, fields(digest_len = digest.len()))]
    fn recover_address(
        &self,
        caller: &Caller,
        digest: &[u8],
        signature: &[u8],
    ) -> Result<Address, WalletError> {
        let recovered = self.execute(caller, Operation::RecoverAddress, |_, _, events| {
            let recovered_address = self.verifier.recover_address(digest, signature)?;
            events.push(WalletEvent::AddressRecovered { recovered_address });
            Ok(recovered_address)
        })?;
        SIGNATURES_RECOVERED.inc();
        Ok(recovered)
    }

    #[instrument(skip_all, fields(digest_len = digest.len()))]
    fn sign_message(&self, caller: &Caller, digest: &[u8]) -> Result<Hash, WalletError> {
        self.execute(caller, Operation::SignMessage, |_, _, events| {
            let signed_message = self.verifier.sign_message(digest)?;
            events.push(WalletEvent::MessageSigned { signed_message });
            Ok(signed_message)
        })
    }

    // =========================================================================
    // ADMINISTRATORS
    // =========================================================================

    #[instrument(skip_all, fields(principal = %caller.principal(), admin = %admin))]
    fn add_administrator(&self, caller: &Caller, admin: Address) -> Result<(), WalletError> {
        self.execute(caller, Operation::AddAdministrator, |state, principal, events| {
            state.require_privileged(principal, Operation::AddAdministrator.name())?;
            state.administrators.add(admin)?;
            events.push(WalletEvent::AdministratorAdded { admin });
            Ok(())
        })?;
        info!(admin = %admin, "Administrator added");
        Ok(())
    }

    fn get_administrators_count(&self) -> Result<usize, WalletError> {
        self.read(|state| Ok(state.administrators.len()))
    }

    fn get_all_administrators(&self) -> Result<Vec<Address>, WalletError> {
        self.read(|state| Ok(state.administrators.members().to_vec()))
    }

    fn is_administrator(&self, address: Address) -> Result<bool, WalletError> {
        self.read(|state| Ok(state.administrators.contains(&address)))
    }

    // =========================================================================
    // USERS
    // =========================================================================

    #[instrument(skip_all, fields(id = %id))]
    fn set_new_user(
        &self,
        caller: &Caller,
        id: Address,
        username: String,
        public_key: String,
    ) -> Result<(), WalletError> {
        self.execute(caller, Operation::SetNewUser, |state, _, _| {
            state.users.upsert(id, username, public_key);
            Ok(())
        })
    }

    #[instrument(skip_all, fields(id = %id))]
    fn set_new_username(
        &self,
        caller: &Caller,
        id: Address,
        username: String,
    ) -> Result<(), WalletError> {
        self.execute(caller, Operation::SetNewUsername, |state, _, events| {
            state.users.set_username(id, username.clone());
            events.push(WalletEvent::UsernameChanged { id, username });
            Ok(())
        })
    }

    #[instrument(skip_all, fields(id = %id))]
    fn set_new_user_public_key(
        &self,
        caller: &Caller,
        id: Address,
        public_key: String,
    ) -> Result<(), WalletError> {
        self.execute(caller, Operation::SetNewUserPublicKey, |state, _, events| {
            state.users.set_public_key(id, public_key.clone());
            events.push(WalletEvent::PublicKeyChanged { id, public_key });
            Ok(())
        })
    }

    fn get_user(&self, id: Address) -> Result<User, WalletError> {
        self.read(|state| state.users.get(&id).cloned())
    }

    fn get_users_count(&self) -> Result<usize, WalletError> {
        self.read(|state| Ok(state.users.len()))
    }

    // =========================================================================
    // SESSIONS
    // =========================================================================

    #[instrument(skip_all, fields(data_id = %request.data_id, device_id = %request.device_id))]
    fn start_session(
        &self,
        caller: &Caller,
        request: StartSessionRequest,
    ) -> Result<SessionState, WalletError> {
        let opened = self.execute(caller, Operation::StartSession, |state, _, events| {
            state.sessions.ensure_vacant(&request.data_id)?;

            let digest = request.payload.digest();
            let signer = self
                .verifier
                .authorize_signature(&digest, &request.signature)?
                .signer();
            if !state.may_open_session(&signer) {
                return Err(WalletError::UnauthorizedSession { signer });
            }

            events.push(WalletEvent::SessionStarted {
                device_id: request.device_id,
                data_id: request.data_id,
                state: SessionState::Open,
            });
            state.sessions.insert(Session::open(request, signer))?;
            Ok(SessionState::Open)
        })?;
        SIGNATURES_RECOVERED.inc();
        SESSIONS_STARTED.inc();
        Ok(opened)
    }

    fn check_session_state(&self, data_id: DataId) -> Result<SessionState, WalletError> {
        self.read(|state| state.sessions.state(&data_id))
    }

    fn get_session(&self, data_id: DataId) -> Result<Session, WalletError> {
        self.read(|state| state.sessions.get(&data_id).cloned())
    }

    #[instrument(skip_all, fields(data_id = %data_id))]
    fn close_session(
        &self,
        caller: &Caller,
        data_id: DataId,
    ) -> Result<SessionState, WalletError> {
        let closed = self.execute(caller, Operation::CloseSession, |state, _, events| {
            let session = state.sessions.close(&data_id)?;
            events.push(WalletEvent::SessionClosed {
                device_id: session.device_id,
                data_id,
                state: session.state,
            });
            events.push(WalletEvent::DeviceSessionClosed {
                device_id: session.device_id,
                data_id,
                state: session.state,
            });
            Ok(session.state)
        })?;
        SESSIONS_CLOSED.inc();
        Ok(closed)
    }

    fn open_sessions_count(&self) -> Result<usize, WalletError> {
        self.read(|state| Ok(state.sessions.open_count()))
    }

    // =========================================================================
    // LEDGER
    // =========================================================================

    fn get_balance(&self, account: Address) -> Result<U256, WalletError> {
        self.read(|state| Ok(state.ledger.balance(&account)))
    }

    #[instrument(skip_all, fields(from = %from, to = %to, amount = %amount))]
    fn transfer(
        &self,
        caller: &Caller,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), WalletError> {
        self.execute(caller, Operation::Transfer, |state, principal, events| {
            if principal != from {
                return Err(WalletError::Unauthorized {
                    principal,
                    operation: Operation::Transfer.name(),
                });
            }
            state.ledger.transfer(from, to, amount)?;
            events.push(WalletEvent::Transfer { from, to, amount });
            Ok(())
        })?;
        TRANSFERS.inc();
        Ok(())
    }

    #[instrument(skip_all, fields(amount = %amount))]
    fn deposit(&self, caller: &Caller, amount: U256) -> Result<(), WalletError> {
        self.execute(caller, Operation::Deposit, |state, principal, events| {
            state
                .ledger
                .total_supply()
                .and_then(|supply| supply.checked_add(amount))
                .ok_or(WalletError::BalanceOverflow(state.contract_address))?;
            state.ledger.credit(state.contract_address, amount)?;
            events.push(WalletEvent::Deposited {
                from: principal,
                amount,
            });
            Ok(())
        })
    }

    fn total_supply(&self) -> Result<U256, WalletError> {
        self.read(|state| {
            state
                .ledger
                .total_supply()
                .ok_or(WalletError::BalanceOverflow(state.contract_address))
        })
    }

    // =========================================================================
    // GAS
    // =========================================================================

    fn get_gas_cost(&self) -> Result<U256, WalletError> {
        self.read(|state| Ok(state.gas.accumulated()))
    }

    #[instrument(skip_all, fields(principal = %caller.principal(), admin = %admin))]
    fn refund_gas_costs(&self, caller: &Caller, admin: Address) -> Result<U256, WalletError> {
        let refunded = self.execute(caller, Operation::RefundGasCosts, |state, principal, events| {
            state.require_privileged(principal, Operation::RefundGasCosts.name())?;
            if !state.is_privileged(&admin) {
                return Err(WalletError::UnknownAdministrator(admin));
            }

            let amount = state.gas.accumulated();
            state.ledger.transfer(state.contract_address, admin, amount)?;
            state.gas.take();

            events.push(WalletEvent::GasRefunded { admin, amount });
            Ok(amount)
        })?;
        GAS_REFUNDS.inc();
        info!(admin = %admin, amount = %refunded, "Gas costs refunded");
        Ok(refunded)
    }

    // =========================================================================
    // OWNER CONTROL
    // =========================================================================

    fn owner(&self) -> Result<Address, WalletError> {
        self.read(|state| Ok(state.owner))
    }

    fn name_registry(&self) -> Result<Option<Address>, WalletError> {
        self.read(|state| Ok(state.name_registry))
    }

    fn is_active(&self) -> bool {
        self.state.lock().is_active()
    }

    #[instrument(skip_all, fields(principal = %caller.principal()))]
    fn kill(&self, caller: &Caller) -> Result<(), WalletError> {
        let swept = self.execute(caller, Operation::Kill, |state, principal, events| {
            state.require_owner(principal, Operation::Kill.name())?;

            let swept = state.ledger.sweep(state.contract_address, state.owner)?;
            state.lifecycle = Lifecycle::Inactive;

            events.push(WalletEvent::ContractKilled {
                contract_owner: state.owner,
            });
            Ok(swept)
        })?;
        info!(swept = %swept, "Contract killed");
        Ok(())
    }
}
