//! Response bodies exchanged with callers.
//!
//! ```text
//! hold ok      { "deal_id": 1 }
//! charge ok    { "Operation": "Success" }
//! any failure  { "error": { "error_number": 8, "error_msg": "..." } }
//! ```

use serde::{Deserialize, Serialize};

use crate::{DealId, GatewayError, constants};

/// Successful hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldResponse {
    pub deal_id: DealId,
}

/// Successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeResponse {
    #[serde(rename = "Operation")]
    pub operation: String,
}

impl ChargeResponse {
    #[must_use]
    pub fn success() -> Self {
        Self {
            operation: constants::OPERATION_SUCCESS.to_string(),
        }
    }
}

/// Number and message of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDesc {
    pub error_number: u8,
    pub error_msg: String,
}

/// Failure body: `{ "error": { "error_number", "error_msg" } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDesc,
}

impl From<GatewayError> for ErrorEnvelope {
    fn from(err: GatewayError) -> Self {
        Self {
            error: ErrorDesc {
                error_number: err.code(),
                error_msg: err.message().to_string(),
            },
        }
    }
}
