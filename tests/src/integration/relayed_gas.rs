//! # Relayed Calls and Gas Refunds
//!
//! A relayer submits calls on behalf of principals; the accumulated cost is
//! refunded to an administrator from the contract account, and `kill`
//! returns what is left to the owner.

#[cfg(test)]
mod tests {
    use crate::fixtures::{WalletHarness, CONTRACT, CONTRACT_FUNDS};
    use pw_01_signature_verification::test_helpers::{address_of, keypair_from_seed};
    use pw_02_proxy_wallet::prelude::*;
    use shared_bus::{EventFilter, EventSubscriber, WalletEvent};
    use shared_types::{Address, U256};

    #[test]
    fn test_relayed_calls_accrue_and_refund() {
        let h = WalletHarness::new().unwrap();
        let schedule = h.wallet.gas_schedule().clone();
        let user = keypair_from_seed(42);

        // Relayed on behalf of the owner and of a plain user
        h.wallet
            .add_administrator(&h.relayed_by(&h.admins[0]).unwrap(), Address::new([6; 20]))
            .unwrap();
        h.wallet
            .set_new_user(
                &h.relayed_by(&user).unwrap(),
                address_of(&user),
                "relayed".into(),
                "0x04".into(),
            )
            .unwrap();
        // Direct call: free
        h.wallet
            .set_new_username(&h.owner(), address_of(&user), "renamed".into())
            .unwrap();

        let owed = schedule.cost(Operation::AddAdministrator) + schedule.cost(Operation::SetNewUser);
        assert_eq!(h.wallet.get_gas_cost().unwrap(), owed);

        let supply = h.wallet.total_supply().unwrap();
        let paid = h
            .wallet
            .refund_gas_costs(&h.relayed_by(&h.admins[1]).unwrap(), h.admin(3))
            .unwrap();

        assert_eq!(paid, owed);
        assert_eq!(h.wallet.get_gas_cost().unwrap(), U256::zero());
        assert_eq!(h.wallet.get_balance(h.admin(3)).unwrap(), owed);
        assert_eq!(
            h.wallet.get_balance(CONTRACT).unwrap(),
            U256::from(CONTRACT_FUNDS) - owed
        );
        assert_eq!(h.wallet.total_supply().unwrap(), supply);

        // Nothing accrued by the refund itself
        assert_eq!(
            h.wallet.refund_gas_costs(&h.owner(), h.admin(3)).unwrap(),
            U256::zero()
        );
    }

    #[test]
    fn test_failed_relayed_call_accrues_nothing() {
        let h = WalletHarness::new().unwrap();
        let outsider = keypair_from_seed(77);

        let result = h.wallet.add_administrator(
            &h.relayed_by(&outsider).unwrap(),
            Address::new([6; 20]),
        );

        assert!(matches!(result, Err(WalletError::Unauthorized { .. })));
        assert_eq!(h.wallet.get_gas_cost().unwrap(), U256::zero());
    }

    #[test]
    fn test_transfer_conservation_both_sides() {
        let h = WalletHarness::with_config(|config| {
            config.allocations.push(Allocation {
                address: Address::new([0xA1; 20]),
                amount: U256::from(1_000u64),
            });
        })
        .unwrap();
        let alice = Address::new([0xA1; 20]);
        let bob = Address::new([0xB0; 20]);
        let supply = h.wallet.total_supply().unwrap();

        h.wallet
            .transfer(&Caller::Direct(alice), alice, bob, U256::from(400u64))
            .unwrap();
        assert_eq!(h.wallet.get_balance(alice).unwrap(), U256::from(600u64));
        assert_eq!(h.wallet.get_balance(bob).unwrap(), U256::from(400u64));

        assert_eq!(
            h.wallet
                .transfer(&Caller::Direct(alice), alice, bob, U256::from(601u64)),
            Err(WalletError::InsufficientBalance {
                required: U256::from(601u64),
                available: U256::from(600u64),
            })
        );
        assert_eq!(h.wallet.get_balance(alice).unwrap(), U256::from(600u64));
        assert_eq!(h.wallet.get_balance(bob).unwrap(), U256::from(400u64));
        assert_eq!(h.wallet.total_supply().unwrap(), supply);
    }

    #[test]
    fn test_kill_sweeps_and_deactivates() {
        let h = WalletHarness::new().unwrap();
        let mut lifecycle = h.bus.subscribe(EventFilter::all());

        h.wallet
            .deposit(&Caller::Direct(Address::new([0x42; 20])), U256::from(5u64))
            .unwrap();
        assert!(matches!(
            h.wallet.kill(&Caller::Direct(h.admin(1))),
            Err(WalletError::Unauthorized { .. })
        ));

        h.wallet.kill(&h.owner()).unwrap();

        assert!(!h.wallet.is_active());
        let snapshot = h.wallet.snapshot();
        assert_eq!(
            snapshot.ledger.balance(&h.admin(0)),
            U256::from(CONTRACT_FUNDS + 5)
        );
        assert_eq!(
            lifecycle.drain().last(),
            Some(&WalletEvent::ContractKilled {
                contract_owner: h.admin(0)
            })
        );

        assert_eq!(
            h.wallet.get_administrators_count(),
            Err(WalletError::ContractInactive)
        );
        assert_eq!(
            h.wallet.refund_gas_costs(&h.owner(), h.admin(0)),
            Err(WalletError::ContractInactive)
        );
    }
}
