//! Outbound telemetry port.
//!
//! The engine reports every outcome to a [`TelemetrySink`] after it has
//! released its locks. Sinks must not block and cannot fail the request:
//! `record` has no return value.

use cardgate_types::{DealId, GatewayError, OrderId};
use rust_decimal::Decimal;

/// Which engine operation produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Hold,
    Capture,
    Release,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hold => write!(f, "HOLD"),
            Self::Capture => write!(f, "CAPTURE"),
            Self::Release => write!(f, "RELEASE"),
        }
    }
}

/// Something that happened to a deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealEvent {
    Held {
        deal_id: DealId,
        order_id: OrderId,
        /// Card fingerprint, never the PAN.
        card: String,
        amount: Decimal,
    },
    Captured {
        deal_id: DealId,
        captured: Decimal,
        /// Uncaptured part of the hold returned to the balance.
        released: Decimal,
    },
    Released {
        deal_id: DealId,
        amount: Decimal,
    },
    Rejected {
        operation: Operation,
        error: GatewayError,
    },
}

/// Fire-and-forget receiver of deal events.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: DealEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record(&self, _event: DealEvent) {}
}
