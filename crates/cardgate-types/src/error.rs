//! Error taxonomy for the cardgate gateway.
//!
//! Every rejection the gateway reports is one of nine numbered reasons.
//! The number and message are part of the wire contract; `Display` adds the
//! `CG_ERR_` prefix for easy grepping in logs.

use thiserror::Error;

use crate::wire::ErrorEnvelope;

/// Closed set of reasons a hold or charge can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GatewayError {
    /// The card number failed the Luhn checksum.
    #[error("CG_ERR_1: Wrong card number")]
    WrongCardNumber,

    /// Expiry month/year are missing or not a real date.
    #[error("CG_ERR_2: Wrong card expired date")]
    WrongCardExpiryDate,

    /// Holder name is missing or differs from the ledger.
    #[error("CG_ERR_3: Wrong card holder")]
    WrongCardHolder,

    /// CVV is out of range or differs from the ledger.
    #[error("CG_ERR_4: Wrong CVV")]
    WrongCvv,

    /// Order identifier is empty.
    #[error("CG_ERR_5: Wrong order id")]
    WrongOrderId,

    /// Deal amount is not positive.
    #[error("CG_ERR_6: Wrong order Amount")]
    WrongAmount,

    /// Expiry fields are valid but the date has passed.
    #[error("CG_ERR_7: Card Has Expired")]
    CardHasExpired,

    /// Spendable balance does not cover the amount.
    #[error("CG_ERR_8: You do not have enough funds on the card")]
    InsufficientFunds,

    /// The operation cannot be carried out (unknown deal, over-capture, ...).
    #[error("CG_ERR_9: Unable to execute")]
    UnableToExecute,
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// Every variant, in code order.
    pub const ALL: [Self; 9] = [
        Self::WrongCardNumber,
        Self::WrongCardExpiryDate,
        Self::WrongCardHolder,
        Self::WrongCvv,
        Self::WrongOrderId,
        Self::WrongAmount,
        Self::CardHasExpired,
        Self::InsufficientFunds,
        Self::UnableToExecute,
    ];

    /// Wire error number (1–9).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::WrongCardNumber => 1,
            Self::WrongCardExpiryDate => 2,
            Self::WrongCardHolder => 3,
            Self::WrongCvv => 4,
            Self::WrongOrderId => 5,
            Self::WrongAmount => 6,
            Self::CardHasExpired => 7,
            Self::InsufficientFunds => 8,
            Self::UnableToExecute => 9,
        }
    }

    /// Wire error message, without the log prefix.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::WrongCardNumber => "Wrong card number",
            Self::WrongCardExpiryDate => "Wrong card expired date",
            Self::WrongCardHolder => "Wrong card holder",
            Self::WrongCvv => "Wrong CVV",
            Self::WrongOrderId => "Wrong order id",
            Self::WrongAmount => "Wrong order Amount",
            Self::CardHasExpired => "Card Has Expired",
            Self::InsufficientFunds => "You do not have enough funds on the card",
            Self::UnableToExecute => "Unable to execute",
        }
    }

    /// The `{ "error": { ... } }` body reported to callers.
    #[must_use]
    pub fn envelope(self) -> ErrorEnvelope {
        ErrorEnvelope::from(self)
    }
}
