//! Configuration types for a cardgate node.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CardRecord, constants};

/// Errors raised while building or checking a [`GatewayConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A listen port could not be parsed.
    #[error("Invalid port {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },

    /// The seed file could not be read.
    #[error("Could not read seed file {path}: {reason}")]
    SeedFileUnreadable { path: String, reason: String },

    /// The seed file is not a JSON array of cards.
    #[error("Could not decode seed cards: {0}")]
    SeedDecode(#[from] serde_json::Error),

    /// A seed card failed a sanity check.
    #[error("Invalid seed card {card}: {reason}")]
    InvalidSeedCard { card: String, reason: String },

    /// The same card number appears twice in the seed set.
    #[error("Duplicate seed card {0}")]
    DuplicateSeedCard(String),
}

/// Configuration for a single gateway process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host to bind the HTTP surface to.
    pub host: String,
    /// Port to bind the HTTP surface to.
    pub port: u16,
    /// Cards loaded into the ledger before any request is accepted.
    pub seed_cards: Vec<CardRecord>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
            seed_cards: default_seed_cards(),
        }
    }
}

impl GatewayConfig {
    /// `host:port`, as passed to the listener.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Replace the seed set with cards decoded from a JSON array.
    pub fn with_seed_json(mut self, json: &str) -> Result<Self, ConfigError> {
        self.seed_cards = serde_json::from_str(json)?;
        Ok(self)
    }

    /// Structural checks on the seed set. Checksum validation of card
    /// numbers happens when the ledger is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for card in &self.seed_cards {
            let invalid = |reason: &str| ConfigError::InvalidSeedCard {
                card: card.number.to_string(),
                reason: reason.to_string(),
            };
            if card.number.is_empty() {
                return Err(invalid("empty card number"));
            }
            if card.balance < Decimal::ZERO {
                return Err(invalid("negative balance"));
            }
            if !card.held.is_zero() {
                return Err(invalid("seed card has held funds"));
            }
            if !(1..=12).contains(&card.expiry_month) {
                return Err(invalid("expiry month out of range"));
            }
            if !(constants::CVV_MIN..=constants::CVV_MAX).contains(&card.cvv) {
                return Err(invalid("cvv out of range"));
            }
            if card.holder.trim().is_empty() {
                return Err(invalid("empty holder"));
            }
            if !seen.insert(card.number.clone()) {
                return Err(ConfigError::DuplicateSeedCard(card.number.to_string()));
            }
        }
        Ok(())
    }
}

/// The built-in seed set.
#[must_use]
pub fn default_seed_cards() -> Vec<CardRecord> {
    vec![
        CardRecord::new(
            "4012888888881881",
            9,
            2030,
            100,
            "IVANOV IVAN",
            Decimal::new(55_555, 0),
        ),
        CardRecord::new(
            "4111111111111111",
            3,
            2029,
            123,
            "PETROV PETR",
            Decimal::new(10_000, 0),
        ),
        CardRecord::new(
            "5555555555554444",
            12,
            2031,
            456,
            "SIDOROVA ANNA",
            Decimal::new(250_000, 0),
        ),
    ]
}
