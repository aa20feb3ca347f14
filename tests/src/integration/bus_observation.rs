//! # Bus Observation
//!
//! Observers attached to the event bus see exactly the notifications of
//! committed calls, in commit order, filtered by topic or device.

#[cfg(test)]
mod tests {
    use crate::fixtures::{session_request, WalletHarness};
    use pw_02_proxy_wallet::prelude::*;
    use shared_bus::{EventFilter, EventPublisher, EventSubscriber, EventTopic, WalletEvent};
    use shared_types::{Address, DataId, DeviceId, SessionState, U256};
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_device_stream_sees_only_its_sessions() {
        let h = WalletHarness::new().unwrap();
        let watched = DeviceId::new([0x65; 32]);
        let other = DeviceId::new([0x66; 32]);
        let mut stream = h.bus.event_stream(EventFilter::device(watched));

        h.wallet
            .start_session(&h.owner(), session_request(&h.admins[0], DataId::new([1; 32]), other))
            .unwrap();
        h.wallet
            .start_session(&h.owner(), session_request(&h.admins[0], DataId::new([2; 32]), watched))
            .unwrap();
        h.wallet.close_session(&h.owner(), DataId::new([2; 32])).unwrap();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let event = timeout(Duration::from_millis(200), stream.next())
                .await
                .expect("timeout")
                .expect("event");
            seen.push(event);
        }

        assert!(seen.iter().all(|event| event.device_id() == Some(watched)));
        assert_eq!(
            seen.iter().map(WalletEvent::name).collect::<Vec<_>>(),
            vec!["SessionStarted", "SessionClosed", "DeviceSessionClosed"]
        );
    }

    #[tokio::test]
    async fn test_topic_subscription_receives_in_commit_order() {
        let h = WalletHarness::new().unwrap();
        let mut governance = h
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Governance]));

        for byte in 6..9u8 {
            h.wallet
                .add_administrator(&h.owner(), Address::new([byte; 20]))
                .unwrap();
        }

        for byte in 6..9u8 {
            let event = timeout(Duration::from_millis(200), governance.recv())
                .await
                .expect("timeout")
                .expect("event");
            assert_eq!(
                event,
                WalletEvent::AdministratorAdded {
                    admin: Address::new([byte; 20])
                }
            );
        }
    }

    #[test]
    fn test_rejected_calls_publish_nothing() {
        let h = WalletHarness::new().unwrap();
        let mut all = h.bus.subscribe(EventFilter::all());
        let before = h.bus.events_published();
        let outsider = Caller::Direct(Address::new([0x77; 20]));

        assert!(h
            .wallet
            .add_administrator(&outsider, Address::new([6; 20]))
            .is_err());
        assert!(h
            .wallet
            .transfer(&outsider, Address::new([0x77; 20]), h.admin(0), U256::one())
            .is_err());
        assert!(h.wallet.close_session(&outsider, DataId::new([9; 32])).is_err());
        assert!(h.wallet.kill(&outsider).is_err());

        assert!(all.drain().is_empty());
        assert_eq!(h.bus.events_published(), before);

        let stats = h.wallet.stats();
        assert_eq!(stats.calls_rejected, 4);
        assert_eq!(stats.events_published, 0);
    }

    #[test]
    fn test_signature_results_are_published() {
        let h = WalletHarness::new().unwrap();
        let mut signatures = h
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Signatures]));
        let digest = pw_01_signature_verification::keccak256(b"hello");
        let signature =
            pw_01_signature_verification::test_helpers::sign_digest(&digest, &h.admins[2]);

        // Personal-signed digest: recover over the prefixed hash
        let prefixed = h.wallet.sign_message(&h.owner(), &digest).unwrap();
        let recovered = h
            .wallet
            .recover_address(&h.owner(), &prefixed, &signature.to_bytes())
            .unwrap();

        assert_eq!(recovered, h.admin(2));
        assert_eq!(
            signatures.drain(),
            vec![
                WalletEvent::MessageSigned {
                    signed_message: prefixed
                },
                WalletEvent::AddressRecovered {
                    recovered_address: h.admin(2)
                },
            ]
        );
    }

    #[test]
    fn test_events_serialize_for_observers() {
        let h = WalletHarness::new().unwrap();
        let mut sessions = h.bus.subscribe(EventFilter::topics(vec![EventTopic::Sessions]));
        let data_id = DataId::new([0xBE; 32]);

        h.wallet
            .start_session(
                &h.owner(),
                session_request(&h.admins[0], data_id, DeviceId::new([0x65; 32])),
            )
            .unwrap();

        let event = sessions.drain().remove(0);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "SessionStarted");
        assert_eq!(json["args"]["data_id"], data_id.to_string());
        assert_eq!(
            serde_json::from_value::<WalletEvent>(json).unwrap(),
            WalletEvent::SessionStarted {
                device_id: DeviceId::new([0x65; 32]),
                data_id,
                state: SessionState::Open,
            }
        );
    }
}
