//! Card ledger: the source of truth for balances and holds.
//!
//! Each card lives in its own [`CardCell`]. The engine locks a single cell
//! for the whole validate-then-mutate section of a request, so requests on
//! unrelated cards never contend and requests on the same card serialize in
//! lock-acquisition order.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
};

use cardgate_types::{CardNumber, CardRecord, ConfigError, GatewayConfig};
use rust_decimal::Decimal;

use crate::card_validator;

/// A lockable card row shared between the ledger and in-flight requests.
pub type CardCell = Arc<Mutex<CardRecord>>;

/// Storage for card rows.
///
/// `get`/`put`/`delete` are each atomic. Read-modify-write sequences must go
/// through [`CardStore::entry`] and hold the returned cell's lock.
pub trait CardStore: Send + Sync {
    /// The lockable cell for a card, if the card is known.
    fn entry(&self, number: &CardNumber) -> Option<CardCell>;

    /// Insert a card, or overwrite an existing card's row in place.
    fn put(&self, card: CardRecord);

    /// Remove a card. Cells already handed out keep their last state.
    fn delete(&self, number: &CardNumber) -> Option<CardRecord>;

    /// Number of known cards.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of a card row.
    fn get(&self, number: &CardNumber) -> Option<CardRecord> {
        self.entry(number).map(|cell| lock_card(&cell).clone())
    }
}

/// Lock a card cell, recovering the row if a previous holder panicked.
///
/// Every mutation of a row is a single checked step on [`CardRecord`], so a
/// poisoned row is still internally consistent.
pub fn lock_card(cell: &Mutex<CardRecord>) -> MutexGuard<'_, CardRecord> {
    cell.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Recovering poisoned card lock");
        PoisonError::into_inner(poisoned)
    })
}

/// In-memory card ledger with per-card locks.
#[derive(Default)]
pub struct InMemoryCardLedger {
    cards: RwLock<HashMap<CardNumber, CardCell>>,
}

impl InMemoryCardLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from trusted cards.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = CardRecord>) -> Self {
        let ledger = Self::new();
        for card in cards {
            ledger.put(card);
        }
        ledger
    }

    /// Build a ledger from a configuration's seed set, rejecting seeds that
    /// fail structural checks or the card-number checksum.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(bad) = config
            .seed_cards
            .iter()
            .find(|card| !card_validator::is_valid_card_number(card.number.as_str()))
        {
            return Err(ConfigError::InvalidSeedCard {
                card: bad.number.to_string(),
                reason: "card number fails checksum".to_string(),
            });
        }
        let ledger = Self::from_cards(config.seed_cards.iter().cloned());
        tracing::info!(cards = ledger.len(), "Card ledger seeded");
        Ok(ledger)
    }

    /// Copies of every card row, in no particular order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CardRecord> {
        self.read_index()
            .values()
            .map(|cell| lock_card(cell).clone())
            .collect()
    }

    /// Sum of balance + held across all cards. Holds and releases leave it
    /// unchanged; only captures reduce it.
    #[must_use]
    pub fn total_funds(&self) -> Decimal {
        self.snapshot().iter().map(CardRecord::total).sum()
    }

    fn read_index(&self) -> std::sync::RwLockReadGuard<'_, HashMap<CardNumber, CardCell>> {
        self.cards.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_index(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<CardNumber, CardCell>> {
        self.cards.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CardStore for InMemoryCardLedger {
    fn entry(&self, number: &CardNumber) -> Option<CardCell> {
        self.read_index().get(number).cloned()
    }

    fn put(&self, card: CardRecord) {
        let mut index = self.write_index();
        if let Some(cell) = index.get(&card.number) {
            *lock_card(cell) = card;
        } else {
            index.insert(card.number.clone(), Arc::new(Mutex::new(card)));
        }
    }

    fn delete(&self, number: &CardNumber) -> Option<CardRecord> {
        let cell = self.write_index().remove(number)?;
        let card = lock_card(&cell).clone();
        Some(card)
    }

    fn len(&self) -> usize {
        self.read_index().len()
    }
}
