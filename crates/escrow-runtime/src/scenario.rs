//! # Swap Scenario
//!
//! The canonical exchange between two parties, plus the ways it can go
//! wrong: a third party trying to take the offer, a tampered counter-asset,
//! and a swap attempted after the sender cancelled.

use anyhow::{bail, ensure, Context, Result};
use escrow_swap::{
    Asset, Coin, CommitmentPrimitive, Custody, EscrowApi, EscrowError, EscrowService, EventSink,
    InMemoryCustody,
};
use serde::Serialize;
use shared_types::{Address, ObjectId};
use std::sync::Arc;
use tracing::info;

/// Parties taking part in the scenario.
#[derive(Debug, Clone, Copy)]
pub struct Parties {
    /// Makes the offer.
    pub alice: Address,
    /// Holds the counter-asset.
    pub bob: Address,
    /// Uninvolved third party.
    pub dave: Address,
}

impl Default for Parties {
    fn default() -> Self {
        Self {
            alice: Address::new([0xAA; 32]),
            bob: Address::new([0xBB; 32]),
            dave: Address::new([0xDD; 32]),
        }
    }
}

/// What happened, step by step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioReport {
    /// Offer completed by swap.
    pub swapped_offer: Option<ObjectId>,
    /// Offer reclaimed by its sender.
    pub cancelled_offer: Option<ObjectId>,
    /// Rejections observed, in order.
    pub rejections: Vec<String>,
}

/// Run the scenario against `service`.
///
/// Every step checks its outcome; an unexpected result aborts with an error.
pub async fn run_scenario<P, S>(
    service: &EscrowService<Coin, P, S, Arc<InMemoryCustody>>,
    parties: Parties,
) -> Result<ScenarioReport>
where
    P: CommitmentPrimitive,
    S: EventSink,
{
    let Parties { alice, bob, dave } = parties;
    let mut report = ScenarioReport::default();

    // Bob locks X (42); Alice offers Y to Bob against Bob's key.
    let x = Coin::mint(42);
    let x_id = x.id();
    let (locked, key) = service.commitment().lock(x);
    let y = Coin::mint(7);
    let y_id = y.id();
    let first = service.create(alice, bob, service.commitment().identity(&key), y);
    info!(escrow = %first, "Alice offered Y to Bob");

    // Dave tries to take it.
    let rejected = match service.swap(dave, first, key, locked) {
        Ok(_) => bail!("third party swap on {first} was accepted"),
        Err(rejected) => rejected,
    };
    let (error, key, locked) = rejected.into_parts();
    ensure!(
        matches!(error, EscrowError::MismatchedParty { .. }),
        "unexpected rejection for third party: {error}"
    );
    report.rejections.push(error.to_string());

    // Bob takes it.
    let received = service
        .swap(bob, first, key, locked)
        .map_err(EscrowError::from)
        .context("Bob's swap failed")?;
    ensure!(received.id() == y_id, "Bob received the wrong asset");
    ensure!(
        service.custody().owns(&alice, &x_id),
        "counter-asset did not reach Alice"
    );
    report.swapped_offer = Some(first);
    info!(escrow = %first, "Swap complete");

    // Second offer: Bob tampers with the counter-asset before swapping.
    let (locked, key) = service.commitment().lock(Coin::mint(42));
    let second = service.create(
        alice,
        bob,
        service.commitment().identity(&key),
        Coin::mint(7),
    );

    let mut x = service
        .commitment()
        .unlock(locked, key)
        .map_err(|e| e.error)
        .context("Bob could not reopen his own lock")?;
    let change = x.split(1).context("split failed")?;
    let (relocked, new_key) = service.commitment().lock(x);

    let error: EscrowError = match service.swap(bob, second, new_key, relocked) {
        Ok(_) => bail!("tampered swap on {second} was accepted"),
        Err(rejected) => rejected.into(),
    };
    ensure!(
        matches!(error, EscrowError::MismatchedCommitment { .. }),
        "unexpected rejection for tampered asset: {error}"
    );
    report.rejections.push(error.to_string());
    service.custody().deliver(bob, change);

    // Alice gives up and cancels; Bob's later attempt finds nothing.
    let returned = service
        .return_to_sender(alice, second)
        .context("Alice's cancel failed")?;
    ensure!(returned.value() == 7, "Alice got back the wrong amount");
    report.cancelled_offer = Some(second);
    info!(escrow = %second, "Offer cancelled");

    let (late_locked, late_key) = service.commitment().lock(Coin::mint(42));
    let error: EscrowError = match service.swap(bob, second, late_key, late_locked) {
        Ok(_) => bail!("swap on cancelled offer {second} was accepted"),
        Err(rejected) => rejected.into(),
    };
    ensure!(
        error == EscrowError::RecordNotFound(second),
        "unexpected rejection after cancel: {error}"
    );
    report.rejections.push(error.to_string());

    tokio::task::yield_now().await;
    Ok(report)
}
