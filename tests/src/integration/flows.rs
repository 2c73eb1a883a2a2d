//! # Integration Test Flows
//!
//! The escrow engine publishing to the shared bus.
//!
//! ## Flows Tested:
//!
//! 1. **Swap**: Created then Swapped reach a subscriber in sequence order
//! 2. **Filtering**: per-record and per-topic subscriptions
//! 3. **Races**: concurrent swap and cancel on one record, one winner
//! 4. **Ordering**: sequences from concurrent creates have no gaps

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use escrow_swap::{
        Asset, Coin, CommitmentPrimitive, EscrowApi, EscrowConfig, EscrowError, EscrowService,
        EscrowStatus, HashLockCommitment, InMemoryCustody, Key, Locked,
    };
    use shared_bus::{EscrowEvent, EventFilter, EventTopic, InMemoryEventBus, SequencedEvent};
    use shared_types::{Address, ObjectId};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ALICE: Address = Address::new([0xAA; 32]);
    const BOB: Address = Address::new([0xBB; 32]);

    type BusService =
        EscrowService<Coin, HashLockCommitment, Arc<InMemoryEventBus>, Arc<InMemoryCustody>>;

    fn create_service() -> (Arc<BusService>, Arc<InMemoryEventBus>, Arc<InMemoryCustody>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let custody = Arc::new(InMemoryCustody::new());
        let service = EscrowService::new(
            HashLockCommitment::new(),
            Arc::clone(&bus),
            Arc::clone(&custody),
            EscrowConfig::default(),
        );
        (Arc::new(service), bus, custody)
    }

    /// Bob's locked counter-asset and Alice's offer naming its key.
    fn open_offer(service: &BusService) -> (ObjectId, Key, Locked<Coin>) {
        let (locked, key) = service.commitment().lock(Coin::mint(42));
        let escrow_id = service.create(
            ALICE,
            BOB,
            service.commitment().identity(&key),
            Coin::mint(7),
        );
        (escrow_id, key, locked)
    }

    async fn next(sub: &mut shared_bus::Subscription) -> SequencedEvent {
        timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("timed out waiting for event")
            .expect("bus closed")
    }

    // =============================================================================
    // SWAP FLOW
    // =============================================================================

    #[tokio::test]
    async fn test_swap_flow_publishes_in_order() {
        let (service, bus, custody) = create_service();
        let mut sub = bus.subscribe(EventFilter::all());

        let (escrow_id, key, locked) = open_offer(&service);
        let key_id = key.id();
        let x_id = locked.item_id();
        let y = service.swap(BOB, escrow_id, key, locked).unwrap();

        let created = next(&mut sub).await;
        assert_eq!(created.sequence, 0);
        match created.event {
            EscrowEvent::Created {
                escrow_id: id,
                key_id: k,
                sender,
                recipient,
                item_id,
            } => {
                assert_eq!(id, escrow_id);
                assert_eq!(k, key_id);
                assert_eq!(sender, ALICE);
                assert_eq!(recipient, BOB);
                assert_eq!(item_id, y.id());
            }
            other => panic!("expected Created, got {other:?}"),
        }

        let swapped = next(&mut sub).await;
        assert_eq!(swapped.sequence, 1);
        assert_eq!(swapped.event, EscrowEvent::Swapped { escrow_id });
        assert_ne!(swapped.tx_id, created.tx_id);

        assert!(custody.owns(&ALICE, &x_id));
    }

    #[tokio::test]
    async fn test_rejected_swap_publishes_nothing() {
        let (service, bus, _) = create_service();
        let (escrow_id, key, locked) = open_offer(&service);
        let mut sub = bus.subscribe(EventFilter::all());

        let dave = Address::new([0xDD; 32]);
        assert!(service.swap(dave, escrow_id, key, locked).is_err());

        assert!(sub.try_recv().unwrap().is_none());
    }

    // =============================================================================
    // FILTERING
    // =============================================================================

    #[tokio::test]
    async fn test_subscription_follows_one_record() {
        let (service, bus, _) = create_service();
        let (first, key, locked) = open_offer(&service);
        let mut sub = bus.subscribe(EventFilter::escrow(first));

        let (second, _k, _l) = open_offer(&service);
        service.return_to_sender(ALICE, second).unwrap();
        service.swap(BOB, first, key, locked).unwrap();

        let event = next(&mut sub).await;
        assert_eq!(event.event, EscrowEvent::Swapped { escrow_id: first });
        assert!(sub.try_recv().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_topic_subscription() {
        let (service, bus, _) = create_service();
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Cancelled]));

        let (escrow_id, _key, _locked) = open_offer(&service);
        service.return_to_sender(ALICE, escrow_id).unwrap();

        let event = next(&mut sub).await;
        assert_eq!(event.sequence, 1);
        assert_eq!(event.event, EscrowEvent::Cancelled { escrow_id });
    }

    // =============================================================================
    // RACES
    // =============================================================================

    #[test]
    fn test_swap_and_cancel_race_has_one_winner() {
        for _ in 0..50 {
            let (service, bus, _) = create_service();
            let (escrow_id, key, locked) = open_offer(&service);

            let (swap_ok, cancel_ok) = std::thread::scope(|s| {
                let swapper = s.spawn(|| service.swap(BOB, escrow_id, key, locked).is_ok());
                let canceller = s.spawn(|| service.return_to_sender(ALICE, escrow_id));
                (
                    swapper.join().unwrap(),
                    canceller.join().unwrap(),
                )
            });

            assert!(swap_ok ^ cancel_ok.is_ok());
            if let Err(error) = cancel_ok {
                assert_eq!(error, EscrowError::RecordNotFound(escrow_id));
                assert_eq!(service.status(&escrow_id), Some(EscrowStatus::Swapped));
            } else {
                assert_eq!(service.status(&escrow_id), Some(EscrowStatus::Cancelled));
            }
            assert_eq!(bus_events(&bus), 2);
        }
    }

    fn bus_events(bus: &InMemoryEventBus) -> u64 {
        use shared_bus::EventPublisher;
        bus.events_published()
    }

    // =============================================================================
    // ORDERING
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_gapless() {
        let (service, bus, _) = create_service();
        let mut sub = bus.subscribe(EventFilter::all());

        let mut handles = Vec::new();
        for i in 0..8u8 {
            let service = Arc::clone(&service);
            handles.push(tokio::task::spawn_blocking(move || {
                (0..10)
                    .map(|_| {
                        service.create(
                            Address::new([i; 32]),
                            BOB,
                            ObjectId::new([i; 32]),
                            Coin::mint(1),
                        )
                    })
                    .count()
            }));
        }
        let mut total = 0;
        for handle in handles {
            total += handle.await.unwrap();
        }
        assert_eq!(total, 80);

        for expected in 0..80u64 {
            assert_eq!(next(&mut sub).await.sequence, expected);
        }
        assert_eq!(service.active_count(), 80);
    }
}
