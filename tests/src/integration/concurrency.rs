//! # Concurrent Callers
//!
//! Calls are serialized by the service: racing callers observe exactly one
//! winner for any conflicting mutation, and the ledger never goes negative.

#[cfg(test)]
mod tests {
    use crate::fixtures::{session_request, WalletHarness};
    use pw_02_proxy_wallet::prelude::*;
    use shared_types::{Address, DataId, DeviceId, U256};
    use std::sync::Arc;
    use std::thread;

    const THREADS: usize = 8;

    fn race<T: Send + 'static>(
        wallet: &Arc<WalletHarness>,
        call: impl Fn(&WalletHarness, usize) -> T + Send + Sync + 'static,
    ) -> Vec<T> {
        let call = Arc::new(call);
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let h = Arc::clone(wallet);
                let call = Arc::clone(&call);
                thread::spawn(move || call(&h, i))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    }

    #[test]
    fn test_duplicate_administrator_race_has_one_winner() {
        let h = Arc::new(WalletHarness::new().unwrap());
        let newcomer = Address::new([6; 20]);

        let results = race(&h, move |h, i| {
            h.wallet
                .add_administrator(&Caller::Direct(h.admin(i % 5)), newcomer)
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == WalletError::DuplicateAdministrator(newcomer)));
        assert_eq!(h.wallet.get_administrators_count().unwrap(), 6);
    }

    #[test]
    fn test_close_session_race_has_one_winner() {
        let h = Arc::new(WalletHarness::new().unwrap());
        let data_id = DataId::new([0xBE; 32]);
        h.wallet
            .start_session(
                &h.owner(),
                session_request(&h.admins[0], data_id, DeviceId::new([0x65; 32])),
            )
            .unwrap();

        let results = race(&h, move |h, _| h.wallet.close_session(&h.owner(), data_id));

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == WalletError::SessionAlreadyClosed(data_id)));
        assert_eq!(h.wallet.open_sessions_count().unwrap(), 0);
    }

    #[test]
    fn test_overspend_race_keeps_balance_non_negative() {
        let alice = Address::new([0xA1; 20]);
        let h = Arc::new(
            WalletHarness::with_config(|config| {
                config.allocations.push(Allocation {
                    address: alice,
                    amount: U256::from(100u64),
                });
            })
            .unwrap(),
        );
        let supply = h.wallet.total_supply().unwrap();

        // Each thread tries to move 60 of the 100 to its own account
        let results = race(&h, move |h, i| {
            h.wallet.transfer(
                &Caller::Direct(alice),
                alice,
                Address::new([0xB0 + i as u8; 20]),
                U256::from(60u64),
            )
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(h.wallet.get_balance(alice).unwrap(), U256::from(40u64));
        assert_eq!(h.wallet.total_supply().unwrap(), supply);
    }

    #[test]
    fn test_relayed_gas_accrual_under_contention() {
        let h = Arc::new(WalletHarness::new().unwrap());
        let cost = h.wallet.gas_schedule().cost(Operation::SetNewUser);

        race(&h, |h, i| {
            let caller = h.relayed_by(&h.admins[i % 5]).unwrap();
            h.wallet
                .set_new_user(
                    &caller,
                    Address::new([i as u8 + 1; 20]),
                    format!("user-{i}"),
                    "0x04".into(),
                )
                .unwrap();
        });

        assert_eq!(h.wallet.get_users_count().unwrap(), THREADS);
        assert_eq!(
            h.wallet.get_gas_cost().unwrap(),
            cost * U256::from(THREADS as u64)
        );
        assert_eq!(h.wallet.stats().relayed_calls, THREADS as u64);
    }
}
