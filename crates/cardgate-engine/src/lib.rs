//! # cardgate-engine
//!
//! The hold/capture core of the gateway and the validation pipeline that
//! guards it.
//!
//! ## Architecture
//!
//! 1. **card_validator**: Luhn checksum and expiry checks (pure functions)
//! 2. **transaction_validator**: ordered checks of a hold request against the ledger
//! 3. **CardStore**: per-card locked balance/held state
//! 4. **DealStore**: in-flight deals keyed by sequential [`DealId`](cardgate_types::DealId)
//! 5. **AuthorizationEngine**: the `HELD → {CAPTURED, RELEASED}` state machine
//!
//! ## Request Flow
//!
//! ```text
//! hold:    lock card → validate → validate_funds → debit → allocate id → register deal
//! capture: find deal → lock card → re-validate hold → spend → drop deal
//! ```
//!
//! Lock order is always card, then registry.

pub mod authorization;
pub mod card_ledger;
pub mod card_validator;
pub mod clock;
pub mod deal_registry;
pub mod telemetry;
pub mod transaction_validator;

pub use authorization::{AuthorizationEngine, CaptureReceipt};
pub use card_ledger::{CardCell, CardStore, InMemoryCardLedger};
pub use clock::{Clock, FixedClock, SystemClock};
pub use deal_registry::{DealStore, InMemoryDealRegistry};
pub use telemetry::{DealEvent, NoopTelemetry, Operation, TelemetrySink};
