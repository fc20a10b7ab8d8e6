//! Registry of in-flight deals.
//!
//! Holds only deals in the `HELD` state; a deal is removed the moment it is
//! captured or released. Identifiers come from an atomic counter and are
//! never handed out twice, even for deals that were later released.

use std::{
    collections::HashMap,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use cardgate_types::{Deal, DealId, constants};

/// Storage for in-flight deals.
pub trait DealStore: Send + Sync {
    /// Reserve the next deal identifier.
    fn allocate_id(&self) -> DealId;

    fn insert(&self, deal: Deal);

    fn get(&self, id: DealId) -> Option<Deal>;

    fn remove(&self, id: DealId) -> Option<Deal>;

    /// Number of in-flight deals.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory deal registry.
pub struct InMemoryDealRegistry {
    deals: Mutex<HashMap<DealId, Deal>>,
    next_id: AtomicU64,
}

impl InMemoryDealRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            deals: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(constants::FIRST_DEAL_ID),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<DealId, Deal>> {
        self.deals.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryDealRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DealStore for InMemoryDealRegistry {
    fn allocate_id(&self) -> DealId {
        DealId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn insert(&self, deal: Deal) {
        let id = deal.id;
        if self.lock().insert(id, deal).is_some() {
            tracing::error!(deal = %id, "Deal identifier registered twice");
        }
    }

    fn get(&self, id: DealId) -> Option<Deal> {
        self.lock().get(&id).cloned()
    }

    fn remove(&self, id: DealId) -> Option<Deal> {
        self.lock().remove(&id)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
