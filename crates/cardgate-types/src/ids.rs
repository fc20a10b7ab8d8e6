//! Identifiers used throughout cardgate.
//!
//! Card numbers are sensitive: [`CardNumber`] never prints the full PAN in
//! `Display` or `Debug` output. Deal identifiers are plain sequence numbers
//! handed out by the deal registry.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants;

// ---------------------------------------------------------------------------
// CardNumber
// ---------------------------------------------------------------------------

/// Primary account number of a card, with spaces removed.
///
/// `"4012 8888 8888 1881"` and `"4012888888881881"` are the same card.
#[derive(Clone, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CardNumber(String);

impl CardNumber {
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().chars().filter(|c| *c != ' ').collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short SHA-256 digest of the PAN, safe to put in logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let hash = Sha256::digest(self.0.as_bytes());
        hex::encode(&hash[..constants::FINGERPRINT_BYTES])
    }
}

impl From<String> for CardNumber {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for CardNumber {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<CardNumber> for String {
    fn from(number: CardNumber) -> Self {
        number.0
    }
}

/// Masks everything but the last four characters.
impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.chars().count();
        let hidden = len.saturating_sub(4);
        let tail: String = self.0.chars().skip(hidden).collect();
        if hidden == 0 {
            return f.write_str(&"*".repeat(len));
        }
        write!(f, "{}{tail}", "*".repeat(hidden))
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardNumber({self})")
    }
}

// ---------------------------------------------------------------------------
// DealId
// ---------------------------------------------------------------------------

/// Sequential identifier assigned to a deal when its hold commits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DealId(pub u64);

impl DealId {
    /// The first identifier a fresh registry assigns.
    pub const FIRST: Self = Self(constants::FIRST_DEAL_ID);
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deal:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Merchant-supplied order reference. Opaque to the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// MerchantContractId
// ---------------------------------------------------------------------------

/// Identifier of the merchant contract a hold was requested under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantContractId(pub i64);

impl fmt::Display for MerchantContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contract:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
