//! # Domain Invariants
//!
//! Properties every committed `WalletState` satisfies. The service checks
//! them on the working copy before commit in debug builds.

use super::gas::Operation;
use super::state::{Lifecycle, WalletState};
use shared_types::U256;
use std::collections::HashSet;

/// Administrators are unique.
#[must_use]
pub fn check_unique_administrators(state: &WalletState) -> bool {
    let members = state.administrators.members();
    members.iter().collect::<HashSet<_>>().len() == members.len()
}

/// The owner is always privileged.
#[must_use]
pub fn check_owner_privileged(state: &WalletState) -> bool {
    state.administrators.contains(&state.owner)
}

/// Open sessions and tombstones never overlap.
#[must_use]
pub fn check_session_book(state: &WalletState) -> bool {
    state.sessions.is_consistent()
}

/// A killed contract holds no value.
#[must_use]
pub fn check_inactive_drained(state: &WalletState) -> bool {
    state.lifecycle == Lifecycle::Active
        || state.ledger.balance(&state.contract_address).is_zero()
}

/// Total supply only changes through deposits.
#[must_use]
pub fn check_supply_conserved(
    before: &WalletState,
    after: &WalletState,
    operation: Operation,
    deposited: U256,
) -> bool {
    let (Some(before), Some(after)) = (before.ledger.total_supply(), after.ledger.total_supply())
    else {
        return false;
    };
    match operation {
        Operation::Deposit => before.checked_add(deposited) == Some(after),
        _ => before == after,
    }
}

/// The gas accumulator only drops on refund.
#[must_use]
pub fn check_gas_monotonic(before: &WalletState, after: &WalletState, operation: Operation) -> bool {
    operation == Operation::RefundGasCosts
        || after.gas.accumulated() >= before.gas.accumulated()
}

/// All single-state invariants.
#[must_use]
pub fn check_state(state: &WalletState) -> bool {
    check_unique_administrators(state)
        && check_owner_privileged(state)
        && check_session_book(state)
        && check_inactive_drained(state)
}
