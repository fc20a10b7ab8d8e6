//! Channel-backed telemetry sink.
//!
//! The engine pushes [`DealEvent`]s into an unbounded channel; a spawned task
//! drains it and writes each event to the `cardgate::telemetry` log target.

use cardgate_engine::{DealEvent, TelemetrySink};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, trace, warn};

pub struct ChannelTelemetry {
    tx: UnboundedSender<DealEvent>,
}

impl ChannelTelemetry {
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<DealEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TelemetrySink for ChannelTelemetry {
    fn record(&self, event: DealEvent) {
        if self.tx.send(event).is_err() {
            trace!("Telemetry channel closed, event dropped");
        }
    }
}

/// Log every event until all senders are gone.
pub async fn drain(mut events: UnboundedReceiver<DealEvent>) {
    while let Some(event) = events.recv().await {
        log_event(&event);
    }
    trace!("Telemetry channel drained");
}

fn log_event(event: &DealEvent) {
    match event {
        DealEvent::Held {
            deal_id,
            order_id,
            card,
            amount,
        } => info!(
            target: "cardgate::telemetry",
            deal = %deal_id, order = %order_id, card = %card, amount = %amount, "held"
        ),
        DealEvent::Captured {
            deal_id,
            captured,
            released,
        } => info!(
            target: "cardgate::telemetry",
            deal = %deal_id, captured = %captured, released = %released, "captured"
        ),
        DealEvent::Released { deal_id, amount } => info!(
            target: "cardgate::telemetry",
            deal = %deal_id, amount = %amount, "released"
        ),
        DealEvent::Rejected { operation, error } => warn!(
            target: "cardgate::telemetry",
            operation = %operation, code = error.code(), "{error}"
        ),
    }
}
