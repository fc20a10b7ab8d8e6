//! # Deal: one hold-to-capture lifecycle
//!
//! A deal exists only once its hold has committed against the ledger.
//!
//! ## State Machine
//!
//! ```text
//!   ┌──────┐   capture    ┌──────────┐
//!   │ HELD ├─────────────▶│ CAPTURED │
//!   └──┬───┘              └──────────┘
//!      │ release / rollback
//!      ▼
//!   ┌──────────┐
//!   │ RELEASED │
//!   └──────────┘
//! ```
//!
//! Both terminal states are final; the registry drops a deal as soon as it
//! leaves `Held`, so its identifier can never be captured twice.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CardNumber, DealId, GatewayError, MerchantContractId, OrderId, Result};

/// Lifecycle state of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealState {
    /// Funds are reserved on the card.
    Held,
    /// Held funds were spent.
    Captured,
    /// Held funds went back to the card's balance.
    Released,
}

impl DealState {
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Held, Self::Captured | Self::Released))
    }
}

impl std::fmt::Display for DealState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Held => write!(f, "HELD"),
            Self::Captured => write!(f, "CAPTURED"),
            Self::Released => write!(f, "RELEASED"),
        }
    }
}

/// An in-flight authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub order_id: OrderId,
    /// Card the funds are held on.
    pub card: CardNumber,
    pub merchant_contract_id: MerchantContractId,
    /// Amount moved from balance to held when the deal was created.
    pub amount: Decimal,
    pub state: DealState,
    pub created_at: DateTime<Utc>,
}

impl Deal {
    #[must_use]
    pub fn new(
        id: DealId,
        order_id: OrderId,
        card: CardNumber,
        merchant_contract_id: MerchantContractId,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            card,
            merchant_contract_id,
            amount,
            state: DealState::Held,
            created_at,
        }
    }

    /// # Errors
    /// `UnableToExecute` unless the deal is `Held`.
    pub fn mark_captured(&mut self) -> Result<()> {
        self.transition(DealState::Captured)
    }

    /// # Errors
    /// `UnableToExecute` unless the deal is `Held`.
    pub fn mark_released(&mut self) -> Result<()> {
        self.transition(DealState::Released)
    }

    fn transition(&mut self, target: DealState) -> Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(GatewayError::UnableToExecute);
        }
        self.state = target;
        Ok(())
    }
}
