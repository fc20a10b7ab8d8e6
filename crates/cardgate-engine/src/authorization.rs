//! # Authorization engine
//!
//! Turns validated requests into ledger mutations and tracked deals.
//!
//! ## Hold
//!
//! 1. Lock the card's cell
//! 2. Run the transaction validator against the locked row
//! 3. Check funds (8 on failure, no deal id consumed)
//! 4. Move the amount from balance to held
//! 5. Allocate a deal id and register the deal
//!
//! ## Capture
//!
//! 1. Find the deal (9 if unknown) and check the amount against it
//! 2. Lock the card's cell and take the deal out of the registry
//! 3. If the card no longer holds the deal's amount, roll the deal back (8)
//! 4. Otherwise spend the captured amount and return any remainder
//!
//! Telemetry events are emitted after every lock has been dropped.

use std::sync::Arc;

use cardgate_types::{
    CardRecord, ConfigError, Deal, DealId, GatewayConfig, GatewayError, HoldRequest, Result,
};
use rust_decimal::Decimal;

use crate::{
    CardStore, Clock, DealEvent, DealStore, InMemoryCardLedger, InMemoryDealRegistry,
    NoopTelemetry, Operation, SystemClock, TelemetrySink, card_ledger::lock_card,
    transaction_validator,
};

/// Outcome of a successful capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureReceipt {
    pub deal_id: DealId,
    /// Amount spent from the hold.
    pub captured: Decimal,
    /// Part of the hold returned to the spendable balance.
    pub released: Decimal,
}

/// The hold/capture/release state machine over a card store and a deal store.
pub struct AuthorizationEngine<C = InMemoryCardLedger, D = InMemoryDealRegistry> {
    cards: C,
    deals: D,
    clock: Arc<dyn Clock>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl AuthorizationEngine {
    /// In-memory engine seeded from `config`.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the seed set is invalid.
    pub fn from_config(config: &GatewayConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(
            InMemoryCardLedger::from_config(config)?,
            InMemoryDealRegistry::new(),
        ))
    }
}

impl<C: CardStore, D: DealStore> AuthorizationEngine<C, D> {
    /// Engine using the system clock and no telemetry.
    pub fn new(cards: C, deals: D) -> Self {
        Self {
            cards,
            deals,
            clock: Arc::new(SystemClock),
            telemetry: Arc::new(NoopTelemetry),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn cards(&self) -> &C {
        &self.cards
    }

    pub fn deals(&self) -> &D {
        &self.deals
    }

    /// Place a hold for `request.deal.amount` on the request's card.
    ///
    /// # Errors
    /// Codes 1–7 from validation, 8 if the balance does not cover the
    /// amount. No state changes on error.
    pub fn hold(&self, request: &HoldRequest) -> Result<DealId> {
        match self.try_hold(request) {
            Ok(deal) => {
                self.telemetry.record(DealEvent::Held {
                    deal_id: deal.id,
                    order_id: deal.order_id,
                    card: deal.card.fingerprint(),
                    amount: deal.amount,
                });
                Ok(deal.id)
            }
            Err(error) => {
                self.reject(Operation::Hold, error);
                Err(error)
            }
        }
    }

    /// Capture `amount` of the deal's hold.
    ///
    /// # Errors
    /// - `UnableToExecute` for an unknown deal, or an amount that is not a
    ///   positive whole number or exceeds the hold
    /// - `InsufficientFunds` if the card no longer backs the hold; the deal
    ///   is released
    pub fn capture(&self, deal_id: DealId, amount: Decimal) -> Result<CaptureReceipt> {
        let mut events = Vec::new();
        let result = self.try_capture(deal_id, amount, &mut events);
        match result {
            Ok(receipt) => events.push(DealEvent::Captured {
                deal_id,
                captured: receipt.captured,
                released: receipt.released,
            }),
            Err(error) => {
                tracing::debug!(deal = %deal_id, code = error.code(), "Capture rejected");
                events.push(DealEvent::Rejected {
                    operation: Operation::Capture,
                    error,
                });
            }
        }
        for event in events {
            self.telemetry.record(event);
        }
        result
    }

    /// Return the deal's hold to the card's balance and drop the deal.
    /// Returns the amount restored.
    ///
    /// # Errors
    /// `UnableToExecute` if the deal is unknown.
    pub fn release(&self, deal_id: DealId) -> Result<Decimal> {
        match self.try_release(deal_id) {
            Ok(restored) => {
                self.telemetry.record(DealEvent::Released {
                    deal_id,
                    amount: restored,
                });
                Ok(restored)
            }
            Err(error) => {
                self.reject(Operation::Release, error);
                Err(error)
            }
        }
    }

    fn try_hold(&self, request: &HoldRequest) -> Result<Deal> {
        let now = self.clock.now();
        let today = now.date_naive();
        let Some(cell) = self.cards.entry(&request.card.pan) else {
            // An unknown card fails no later than the holder check.
            transaction_validator::validate(request, None, today)?;
            return Err(GatewayError::WrongCardHolder);
        };

        let mut card = lock_card(&cell);
        transaction_validator::validate(request, Some(&*card), today)?;
        transaction_validator::validate_funds(&card, &request.deal)?;
        card.hold(request.deal.amount)?;

        let deal = Deal::new(
            self.deals.allocate_id(),
            request.deal.order_id.clone(),
            card.number.clone(),
            request.merchant_contract_id,
            request.deal.amount,
            now,
        );
        self.deals.insert(deal.clone());

        tracing::info!(
            deal = %deal.id,
            order = %deal.order_id,
            card = %card.number.fingerprint(),
            amount = %deal.amount,
            balance = %card.balance,
            "Funds held"
        );
        Ok(deal)
    }

    fn try_capture(
        &self,
        deal_id: DealId,
        amount: Decimal,
        events: &mut Vec<DealEvent>,
    ) -> Result<CaptureReceipt> {
        let snapshot = self.deals.get(deal_id).ok_or(GatewayError::UnableToExecute)?;
        if amount <= Decimal::ZERO || !amount.fract().is_zero() || amount > snapshot.amount {
            return Err(GatewayError::UnableToExecute);
        }

        let Some(cell) = self.cards.entry(&snapshot.card) else {
            let mut deal = self
                .deals
                .remove(deal_id)
                .ok_or(GatewayError::UnableToExecute)?;
            deal.mark_released()?;
            tracing::warn!(deal = %deal_id, "Card vanished, deal dropped");
            events.push(DealEvent::Released {
                deal_id,
                amount: Decimal::ZERO,
            });
            return Err(GatewayError::InsufficientFunds);
        };

        let mut card = lock_card(&cell);
        // A concurrent capture or release may have won the card lock.
        let mut deal = self
            .deals
            .remove(deal_id)
            .ok_or(GatewayError::UnableToExecute)?;

        if card.held < deal.amount {
            let restored = roll_back(&mut card, &mut deal)?;
            tracing::warn!(
                deal = %deal_id,
                card = %card.number.fingerprint(),
                expected = %deal.amount,
                held = %card.held,
                restored = %restored,
                "Hold no longer backed, deal rolled back"
            );
            events.push(DealEvent::Released {
                deal_id,
                amount: restored,
            });
            return Err(GatewayError::InsufficientFunds);
        }

        card.consume_held(amount)?;
        let remainder = deal.amount - amount;
        card.release(remainder)?;
        deal.mark_captured()?;

        tracing::info!(
            deal = %deal_id,
            card = %card.number.fingerprint(),
            captured = %amount,
            released = %remainder,
            balance = %card.balance,
            "Deal captured"
        );
        Ok(CaptureReceipt {
            deal_id,
            captured: amount,
            released: remainder,
        })
    }

    fn try_release(&self, deal_id: DealId) -> Result<Decimal> {
        let snapshot = self.deals.get(deal_id).ok_or(GatewayError::UnableToExecute)?;
        let cell = self.cards.entry(&snapshot.card);
        let mut card = cell.as_deref().map(lock_card);

        let mut deal = self
            .deals
            .remove(deal_id)
            .ok_or(GatewayError::UnableToExecute)?;
        let restored = match card.as_deref_mut() {
            Some(card) => roll_back(card, &mut deal)?,
            None => {
                deal.mark_released()?;
                Decimal::ZERO
            }
        };

        tracing::info!(deal = %deal_id, restored = %restored, "Deal released");
        Ok(restored)
    }

    fn reject(&self, operation: Operation, error: GatewayError) {
        tracing::debug!(%operation, code = error.code(), "Request rejected");
        self.telemetry.record(DealEvent::Rejected { operation, error });
    }
}

/// Put back as much of the deal's hold as the card still carries.
fn roll_back(card: &mut CardRecord, deal: &mut Deal) -> Result<Decimal> {
    let restored = card.held.min(deal.amount);
    card.release(restored)?;
    deal.mark_released()?;
    Ok(restored)
}
