//! # Known-Answer Vectors
//!
//! Signatures produced by an external wallet for `keccak256("OpenZeppelin")`,
//! recovered through the wallet's public operations.

#[cfg(test)]
mod tests {
    use crate::fixtures::WalletHarness;
    use pw_01_signature_verification::keccak256;
    use pw_02_proxy_wallet::prelude::*;
    use shared_bus::{EventFilter, EventSubscriber, EventTopic, WalletEvent};
    use shared_types::{decode_fixed, Address};

    const SIGNATURE_V0: &str = "0x5d99b6f7f6d1f73d1a26497f2b1c89b24c0993913f86e9a2d02cd69887d9c94f\
                                3c880358579d811b21dd1b7fd9bb01c1d81d10e69f0384e675c32b39643be89200";
    const SIGNER_V0: &str = "0x2cc1166f6212628a0deef2b33befb2187d35b86c";

    const SIGNATURE_V1: &str = "0x331fe75a821c982f9127538858900d87d3ec1f9f737338ad67cad133fa48feff\
                                48e6fa0c18abc62e42820f05943e47af3e9fbe306ce74d64094bdf1691ee53e001";
    const SIGNER_V1: &str = "0x1e318623ab09fe6de3c9b8672098464aeda9100e";

    const PREFIXED_DIGEST: &str =
        "0x7d768af957ef8cbf6219a37e743d5546d911dae3e46449d8a5810522db2ef65e";

    fn recover(h: &WalletHarness, signature: &str) -> Address {
        let digest = keccak256(b"OpenZeppelin");
        let signature = decode_fixed::<65>(signature).unwrap();
        h.wallet
            .recover_address(&h.owner(), &digest, &signature)
            .unwrap()
    }

    #[test]
    fn test_recover_vector_v0() {
        let h = WalletHarness::new().unwrap();
        assert_eq!(recover(&h, SIGNATURE_V0), SIGNER_V0.parse::<Address>().unwrap());
    }

    #[test]
    fn test_recover_vector_v1() {
        let h = WalletHarness::new().unwrap();
        let mut signatures = h
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Signatures]));

        let recovered = recover(&h, SIGNATURE_V1);

        assert_eq!(recovered, SIGNER_V1.parse::<Address>().unwrap());
        assert_eq!(
            signatures.drain(),
            vec![WalletEvent::AddressRecovered {
                recovered_address: recovered
            }]
        );
    }

    #[test]
    fn test_sign_message_vector() {
        let h = WalletHarness::new().unwrap();

        let prefixed = h
            .wallet
            .sign_message(&h.owner(), &keccak256(b"OpenZeppelin"))
            .unwrap();

        assert_eq!(prefixed, decode_fixed::<32>(PREFIXED_DIGEST).unwrap());
    }

    #[test]
    fn test_hex_text_digest_rejected() {
        let h = WalletHarness::new().unwrap();
        let text = &PREFIXED_DIGEST[2..];
        let signature = decode_fixed::<65>(SIGNATURE_V0).unwrap();

        assert!(matches!(
            h.wallet.recover_address(&h.owner(), text.as_bytes(), &signature),
            Err(WalletError::Signature(_))
        ));
    }
}
