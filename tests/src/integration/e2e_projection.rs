//! # End-to-End Projection Tests
//!
//! Runs the scenario against the real bus while the projection task
//! consumes the stream, then checks the projection agrees with the engine
//! without ever reading the engine's ledger.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::RwLock;
    use tokio::sync::watch;
    use tokio::time::timeout;

    use escrow_runtime::{run_projection, run_scenario, OfferProjection, Parties};
    use escrow_swap::{
        Coin, CommitmentPrimitive, EscrowApi, EscrowConfig, EscrowService, HashLockCommitment,
        InMemoryCustody,
    };
    use shared_bus::{EventFilter, InMemoryEventBus};
    use shared_types::Address;

    async fn wait_for_sequence(projection: &RwLock<OfferProjection>, sequence: u64) {
        timeout(Duration::from_secs(2), async {
            while projection.read().cursor().map(|c| c.sequence) != Some(sequence) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("projection did not reach sequence");
    }

    #[tokio::test]
    async fn test_projection_tracks_scenario() {
        let bus = Arc::new(InMemoryEventBus::new());
        let service = EscrowService::new(
            HashLockCommitment::new(),
            Arc::clone(&bus),
            Arc::new(InMemoryCustody::new()),
            EscrowConfig::default(),
        );
        let projection = Arc::new(RwLock::new(OfferProjection::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_projection(
            bus.event_stream(EventFilter::all()),
            Arc::clone(&projection),
            shutdown_rx,
        ));

        let report = run_scenario(&service, Parties::default()).await.unwrap();

        // Two creates, one swap, one cancel.
        wait_for_sequence(&projection, 3).await;
        {
            let view = projection.read();
            assert_eq!(view.open_count(), 0);
            assert_eq!(view.swapped(), 1);
            assert_eq!(view.cancelled(), 1);
            assert!(view.offer(&report.swapped_offer.unwrap()).is_none());
        }

        shutdown_tx.send(true).unwrap();
        assert_eq!(task.await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_projection_sees_open_offer() {
        let bus = Arc::new(InMemoryEventBus::new());
        let service: EscrowService<Coin, _, _, _> = EscrowService::new(
            HashLockCommitment::new(),
            Arc::clone(&bus),
            Arc::new(InMemoryCustody::new()),
            EscrowConfig::default(),
        );
        let projection = Arc::new(RwLock::new(OfferProjection::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_projection(
            bus.event_stream(EventFilter::all()),
            Arc::clone(&projection),
            shutdown_rx,
        ));

        let alice = Address::new([0xAA; 32]);
        let bob = Address::new([0xBB; 32]);
        let (_locked, key) = service.commitment().lock(Coin::mint(42));
        let key_id = service.commitment().identity(&key);
        let escrow_id = service.create(alice, bob, key_id, Coin::mint(7));

        wait_for_sequence(&projection, 0).await;
        {
            let view = projection.read();
            let offer = view.offer(&escrow_id).expect("offer projected");
            assert_eq!(offer.key_id, key_id);
            assert_eq!(offer.sender, alice);
            assert_eq!(offer.recipient, bob);
            assert_eq!(
                Some(offer.item_id),
                service.get(&escrow_id).map(|v| v.item_id)
            );
        }

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
    }
}
