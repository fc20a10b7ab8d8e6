//! # cardgate-types
//!
//! Shared types, errors, and configuration for the **cardgate** card
//! authorization gateway.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`CardNumber`], [`DealId`], [`OrderId`], [`MerchantContractId`]
//! - **Card model**: [`CardDetails`] (as asserted by a caller), [`CardRecord`] (ledger row)
//! - **Deal model**: [`Deal`], [`DealState`]
//! - **Requests**: [`HoldRequest`], [`DealDetails`], [`ChargeRequest`]
//! - **Wire envelopes**: [`HoldResponse`], [`ChargeResponse`], [`ErrorEnvelope`]
//! - **Errors**: [`GatewayError`], the closed 1–9 taxonomy, with `CG_ERR_` prefixes
//! - **Configuration**: [`GatewayConfig`], [`ConfigError`]
//! - **Constants**: validation bounds and defaults

pub mod card;
pub mod config;
pub mod constants;
pub mod deal;
pub mod error;
pub mod ids;
pub mod transaction;
pub mod wire;

pub use card::*;
pub use config::*;
pub use deal::*;
pub use error::*;
pub use ids::*;
pub use transaction::*;
pub use wire::*;

// Constants are accessed via `cardgate_types::constants::FOO`.
