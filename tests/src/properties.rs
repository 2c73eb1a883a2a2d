//! # Property Tests
//!
//! Randomized checks of the engine's core guarantees:
//!
//! - **Exclusivity**: at most one swap or cancel succeeds per record
//! - **Authorization**: only the recipient swaps, only the sender cancels
//! - **Commitment**: a counter-asset changed before re-locking never matches

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use escrow_swap::{
        Coin, CommitmentPrimitive, EscrowApi, EscrowConfig, EscrowError, EscrowService,
        EscrowStatus, HashLockCommitment, InMemoryCustody, Key, Locked, RecordingSink,
    };
    use shared_types::Address;

    type TestService =
        EscrowService<Coin, HashLockCommitment, Arc<RecordingSink>, Arc<InMemoryCustody>>;

    fn create_service() -> (TestService, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let service = EscrowService::new(
            HashLockCommitment::new(),
            Arc::clone(&sink),
            Arc::new(InMemoryCustody::new()),
            EscrowConfig::default(),
        );
        (service, sink)
    }

    fn address(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    #[derive(Debug, Clone, Copy)]
    enum Attempt {
        Swap(u8),
        Cancel(u8),
    }

    fn attempt() -> impl Strategy<Value = Attempt> {
        // Callers drawn from a small pool so the real parties come up often.
        prop_oneof![
            (0u8..4).prop_map(Attempt::Swap),
            (0u8..4).prop_map(Attempt::Cancel),
        ]
    }

    proptest! {
        #[test]
        fn prop_exclusivity(attempts in prop::collection::vec(attempt(), 1..20)) {
            let (service, sink) = create_service();
            let sender = address(0);
            let recipient = address(1);

            let (locked, key) = service.commitment().lock(Coin::mint(42));
            let escrow_id = service.create(
                sender,
                recipient,
                service.commitment().identity(&key),
                Coin::mint(7),
            );
            let mut inputs: Option<(Key, Locked<Coin>)> = Some((key, locked));
            let mut successes = 0;

            for attempt in attempts {
                let consumed = successes > 0;
                let outcome = match attempt {
                    Attempt::Swap(caller) => {
                        let (key, locked) = inputs
                            .take()
                            .unwrap_or_else(|| {
                                let (l, k) = service.commitment().lock(Coin::mint(1));
                                (k, l)
                            });
                        match service.swap(address(caller), escrow_id, key, locked) {
                            Ok(_) => Ok(()),
                            Err(rejected) => {
                                let (error, key, locked) = rejected.into_parts();
                                inputs = Some((key, locked));
                                Err(error)
                            }
                        }
                    }
                    Attempt::Cancel(caller) => service
                        .return_to_sender(address(caller), escrow_id)
                        .map(|_| ()),
                };

                match outcome {
                    Ok(()) => {
                        prop_assert!(!consumed);
                        successes += 1;
                    }
                    Err(error) if consumed => {
                        prop_assert_eq!(error, EscrowError::RecordNotFound(escrow_id));
                    }
                    Err(error) => {
                        let is_party_mismatch =
                            matches!(error, EscrowError::MismatchedParty { .. });
                        prop_assert!(is_party_mismatch);
                    }
                }
            }

            prop_assert!(successes <= 1);
            let terminal = sink.events().iter().filter(|e| e.is_terminal()).count();
            prop_assert_eq!(terminal, successes);
            if successes == 0 {
                prop_assert_eq!(service.status(&escrow_id), Some(EscrowStatus::Active));
            }
        }

        #[test]
        fn prop_authorization(caller in any::<[u8; 32]>()) {
            let caller = Address::new(caller);
            let sender = address(0xAA);
            let recipient = address(0xBB);
            prop_assume!(caller != sender && caller != recipient);

            let (service, sink) = create_service();
            let (locked, key) = service.commitment().lock(Coin::mint(42));
            let escrow_id = service.create(
                sender,
                recipient,
                service.commitment().identity(&key),
                Coin::mint(7),
            );

            // A valid key and handle do not help the wrong caller.
            let rejected = service.swap(caller, escrow_id, key, locked).unwrap_err();
            let is_party_mismatch =
                matches!(rejected.error, EscrowError::MismatchedParty { .. });
            prop_assert!(is_party_mismatch);

            let cancel = service.return_to_sender(caller, escrow_id);
            let is_party_mismatch = matches!(cancel, Err(EscrowError::MismatchedParty { .. }));
            prop_assert!(is_party_mismatch);

            // The recipient cannot cancel and the sender cannot swap.
            let (key, locked) = (rejected.key, rejected.locked);
            let cancel = service.return_to_sender(recipient, escrow_id);
            let is_party_mismatch = matches!(cancel, Err(EscrowError::MismatchedParty { .. }));
            prop_assert!(is_party_mismatch);
            let rejected = service.swap(sender, escrow_id, key, locked).unwrap_err();
            let is_party_mismatch =
                matches!(rejected.error, EscrowError::MismatchedParty { .. });
            prop_assert!(is_party_mismatch);

            prop_assert_eq!(sink.len(), 1);
            prop_assert_eq!(service.status(&escrow_id), Some(EscrowStatus::Active));
        }

        #[test]
        fn prop_tampered_commitment(value in 2u64..1_000_000, cut in 1u64..1_000_000) {
            let cut = 1 + cut % (value - 1);
            let (service, sink) = create_service();
            let (locked, key) = service.commitment().lock(Coin::mint(value));
            let promised = service.commitment().identity(&key);
            let escrow_id = service.create(address(0), address(1), promised, Coin::mint(7));

            let mut coin = service.commitment().unlock(locked, key).unwrap();
            let _cut = coin.split(cut).unwrap();
            let (relocked, new_key) = service.commitment().lock(coin);
            let presented = service.commitment().identity(&new_key);
            prop_assert_ne!(presented, promised);

            let error: EscrowError = service
                .swap(address(1), escrow_id, new_key, relocked)
                .unwrap_err()
                .into();
            prop_assert_eq!(
                error,
                EscrowError::MismatchedCommitment {
                    expected: promised,
                    presented,
                }
            );
            prop_assert_eq!(sink.len(), 1);
            prop_assert_eq!(service.status(&escrow_id), Some(EscrowStatus::Active));
        }
    }
}
