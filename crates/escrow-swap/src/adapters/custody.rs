//! Custody Adapter
//!
//! Implements `Custody` with per-address in-memory holdings.

use crate::domain::Asset;
use crate::ports::outbound::Custody;
use parking_lot::RwLock;
use shared_types::{Address, ObjectId};
use std::any::Any;
use std::collections::HashMap;
use tracing::debug;

type Held = (ObjectId, Box<dyn Any + Send + Sync>);

/// In-memory owner registry for delivered assets.
///
/// Holds assets of any type; `take` hands back the first one of the
/// requested type.
#[derive(Default)]
pub struct InMemoryCustody {
    holdings: RwLock<HashMap<Address, Vec<Held>>>,
}

impl InMemoryCustody {
    /// Create empty custody.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of everything held for `owner`, in delivery order.
    pub fn holdings(&self, owner: &Address) -> Vec<ObjectId> {
        self.holdings
            .read()
            .get(owner)
            .map(|held| held.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default()
    }

    /// True if `owner` holds the item `item_id`.
    pub fn owns(&self, owner: &Address, item_id: &ObjectId) -> bool {
        self.holdings
            .read()
            .get(owner)
            .is_some_and(|held| held.iter().any(|(id, _)| id == item_id))
    }

    /// Withdraw the oldest asset of type `U` held for `owner`.
    pub fn take<U: Asset>(&self, owner: &Address) -> Option<U> {
        let mut holdings = self.holdings.write();
        let held = holdings.get_mut(owner)?;
        let index = held.iter().position(|(_, asset)| asset.is::<U>())?;
        let (id, asset) = held.remove(index);
        if held.is_empty() {
            holdings.remove(owner);
        }

        debug!("[escrow] Withdrew {} from {}", id.short(), owner.short());
        asset.downcast::<U>().ok().map(|boxed| *boxed)
    }
}

impl Custody for InMemoryCustody {
    fn deliver<U: Asset>(&self, recipient: Address, asset: U) {
        let id = asset.id();
        debug!("[escrow] Delivered {} to {}", id.short(), recipient.short());
        self.holdings
            .write()
            .entry(recipient)
            .or_default()
            .push((id, Box::new(asset)));
    }
}
