//! # Metrics Exposure
//!
//! Counters move with committed and rejected calls and render in the
//! Prometheus text format.

#[cfg(test)]
mod tests {
    use crate::fixtures::WalletHarness;
    use pw_02_proxy_wallet::prelude::*;
    use shared_types::{Address, U256};
    use wallet_telemetry::{gather_metrics, register_metrics, CALL_REJECTIONS, TRANSFERS};

    #[test]
    fn test_counters_track_calls() {
        register_metrics().unwrap();
        let alice = Address::new([0xA1; 20]);
        let h = WalletHarness::with_config(|config| {
            config.allocations.push(Allocation {
                address: alice,
                amount: U256::from(10u64),
            });
        })
        .unwrap();

        // Counters are process-wide; other tests may bump them concurrently
        let transfers = TRANSFERS.get();
        let rejected = CALL_REJECTIONS.with_label_values(&["kill"]).get();

        h.wallet
            .transfer(&Caller::Direct(alice), alice, h.admin(1), U256::one())
            .unwrap();
        assert!(h.wallet.kill(&Caller::Direct(alice)).is_err());

        assert!(TRANSFERS.get() > transfers);
        assert!(CALL_REJECTIONS.with_label_values(&["kill"]).get() > rejected);

        let text = gather_metrics().unwrap();
        assert!(text.contains("pw_transfers_total"));
        assert!(text.contains("pw_call_rejections_total"));
    }
}
