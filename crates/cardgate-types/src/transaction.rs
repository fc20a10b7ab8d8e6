//! Request payloads for the two stateful operations.
//!
//! Every field carries a `serde(default)` so that a structurally valid body
//! with missing fields reaches the validator and is rejected with the
//! matching taxonomy code. Amounts must be whole numbers; anything else
//! fails to decode.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{CardDetails, DealId, MerchantContractId, OrderId};

/// Deal fields of a hold request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealDetails {
    pub order_id: OrderId,
    #[serde(deserialize_with = "whole_amount")]
    pub amount: Decimal,
}

/// A request to hold funds on a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldRequest {
    pub merchant_contract_id: MerchantContractId,
    pub card: CardDetails,
    pub deal: DealDetails,
}

/// A request to capture a held deal. Unknown fields such as `order_id`
/// are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeRequest {
    pub deal_id: DealId,
    #[serde(deserialize_with = "whole_amount")]
    pub amount: Decimal,
}

fn whole_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
    if amount.fract().is_zero() {
        Ok(amount.normalize())
    } else {
        Err(de::Error::custom(format!("amount {amount} is not a whole number")))
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl HoldRequest {
    /// A well-formed hold request against `card` for `amount`.
    pub fn dummy(card: &crate::CardRecord, order_id: &str, amount: Decimal) -> Self {
        Self {
            merchant_contract_id: MerchantContractId(1),
            card: card.details(),
            deal: DealDetails {
                order_id: OrderId::new(order_id),
                amount,
            },
        }
    }
}
