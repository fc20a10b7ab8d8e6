//! Card types.
//!
//! Two views of a card exist:
//!
//! - [`CardDetails`] is what a caller *asserts* in a hold request. Nothing in
//!   it is trusted until the transaction validator has compared it with the
//!   ledger.
//! - [`CardRecord`] is the ledger's row: reference data plus the spendable
//!   `balance` and the `held` amount. Both are non-negative at all times and
//!   a debit moves funds from `balance` to `held`, never duplicates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CardNumber, GatewayError, Result};

/// Card fields as supplied by the caller.
///
/// Missing fields decode to zero values so that an absent holder is reported
/// as a holder error rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    pub pan: CardNumber,
    pub e_month: i32,
    pub e_year: i32,
    pub cvv: i32,
    pub holder: String,
}

/// A card as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(rename = "pan")]
    pub number: CardNumber,
    #[serde(rename = "e_month")]
    pub expiry_month: u32,
    #[serde(rename = "e_year")]
    pub expiry_year: i32,
    pub cvv: u16,
    pub holder: String,
    /// Spendable funds.
    pub balance: Decimal,
    /// Funds reserved by outstanding deals. Never read from a seed.
    #[serde(skip_deserializing)]
    pub held: Decimal,
}

impl CardRecord {
    #[must_use]
    pub fn new(
        number: impl Into<CardNumber>,
        expiry_month: u32,
        expiry_year: i32,
        cvv: u16,
        holder: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Self {
            number: number.into(),
            expiry_month,
            expiry_year,
            cvv,
            holder: holder.into(),
            balance,
            held: Decimal::ZERO,
        }
    }

    /// Spendable plus held funds.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.balance + self.held
    }

    /// Whether the spendable balance covers `amount`.
    #[must_use]
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    /// Move `amount` from balance to held.
    ///
    /// # Errors
    /// `InsufficientFunds` if balance < amount. The record is unchanged.
    pub fn hold(&mut self, amount: Decimal) -> Result<()> {
        if !self.can_cover(amount) {
            return Err(GatewayError::InsufficientFunds);
        }
        self.balance -= amount;
        self.held += amount;
        Ok(())
    }

    /// Move `amount` from held back to balance.
    ///
    /// # Errors
    /// `UnableToExecute` if held < amount.
    pub fn release(&mut self, amount: Decimal) -> Result<()> {
        if self.held < amount {
            return Err(GatewayError::UnableToExecute);
        }
        self.held -= amount;
        self.balance += amount;
        Ok(())
    }

    /// Spend `amount` of held funds. Nothing returns to balance.
    ///
    /// # Errors
    /// `UnableToExecute` if held < amount.
    pub fn consume_held(&mut self, amount: Decimal) -> Result<()> {
        if self.held < amount {
            return Err(GatewayError::UnableToExecute);
        }
        self.held -= amount;
        Ok(())
    }
}

/// Fixture cards for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl CardRecord {
    /// PAN of [`CardRecord::dummy`].
    pub const DUMMY_PAN: &'static str = "4012888888881881";
    /// Holder of [`CardRecord::dummy`].
    pub const DUMMY_HOLDER: &'static str = "IVANOV IVAN";
    /// CVV of [`CardRecord::dummy`].
    pub const DUMMY_CVV: u16 = 100;

    /// A valid card expiring far in the future with the given balance.
    pub fn dummy(balance: Decimal) -> Self {
        Self::new(
            Self::DUMMY_PAN,
            12,
            2099,
            Self::DUMMY_CVV,
            Self::DUMMY_HOLDER,
            balance,
        )
    }

    /// The caller-side details matching this record.
    pub fn details(&self) -> CardDetails {
        CardDetails {
            pan: self.number.clone(),
            e_month: i32::try_from(self.expiry_month).unwrap_or_default(),
            e_year: self.expiry_year,
            cvv: i32::from(self.cvv),
            holder: self.holder.clone(),
        }
    }
}
