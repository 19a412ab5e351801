//! Invoice mutation events for real-time subscribers
//!
//! Successful actions publish an [`InvoiceEvent`] on the [`EventBus`], a thin
//! wrapper over `tokio::sync::broadcast`. Failed actions publish nothing.
//!
//! ```rust,ignore
//! let bus = EventBus::new(1024);
//! let mut rx = bus.subscribe();
//!
//! let actions = InvoiceActions::new(store, cache, "/dashboard/invoices")
//!     .with_event_bus(bus.clone());
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{} {}", envelope.event.action(), envelope.event.invoice_id());
//! }
//! ```

use crate::core::invoice::{Invoice, InvoiceStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// A committed invoice mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InvoiceEvent {
    Created {
        invoice: Invoice,
    },
    Updated {
        invoice_id: String,
        customer_id: String,
        amount: i64,
        status: InvoiceStatus,
        /// Rows the store reported as changed (0 for an unknown id)
        rows_affected: u64,
    },
    Deleted {
        invoice_id: String,
        rows_affected: u64,
    },
}

impl InvoiceEvent {
    pub fn invoice_id(&self) -> &str {
        match self {
            InvoiceEvent::Created { invoice } => &invoice.id,
            InvoiceEvent::Updated { invoice_id, .. } | InvoiceEvent::Deleted { invoice_id, .. } => {
                invoice_id
            }
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            InvoiceEvent::Created { .. } => "created",
            InvoiceEvent::Updated { .. } => "updated",
            InvoiceEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: InvoiceEvent,
}

impl EventEnvelope {
    pub fn new(event: InvoiceEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; all clones share one channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per lagging receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers
    ///
    /// Never fails. Returns the number of receivers reached (0 when nobody
    /// is listening).
    pub fn publish(&self, event: InvoiceEvent) -> usize {
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_invoice() -> Invoice {
        Invoice {
            id: "inv-1".to_string(),
            customer_id: "c1".to_string(),
            amount: 5000,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_created_event_serializes_with_action_tag() {
        let event = InvoiceEvent::Created {
            invoice: sample_invoice(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "created");
        assert_eq!(json["invoice"]["customerId"], "c1");
    }

    #[test]
    fn test_event_accessors() {
        let event = InvoiceEvent::Deleted {
            invoice_id: "inv-9".to_string(),
            rows_affected: 0,
        };
        assert_eq!(event.invoice_id(), "inv-9");
        assert_eq!(event.action(), "deleted");

        let event = InvoiceEvent::Created {
            invoice: sample_invoice(),
        };
        assert_eq!(event.invoice_id(), "inv-1");
    }

    #[test]
    fn test_envelope_serialization_roundtrip() {
        let envelope = EventEnvelope::new(InvoiceEvent::Updated {
            invoice_id: "inv-1".to_string(),
            customer_id: "c2".to_string(),
            amount: 7550,
            status: InvoiceStatus::Paid,
            rows_affected: 1,
        });
        let json = serde_json::to_string(&envelope).unwrap();
        let back: EventEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, envelope.id);
        assert_eq!(back.event, envelope.event);
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let reached = bus.publish(InvoiceEvent::Created {
            invoice: sample_invoice(),
        });
        assert_eq!(reached, 2);

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1.id, e2.id);
        assert_eq!(e1.event.action(), "created");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        let reached = bus.publish(InvoiceEvent::Deleted {
            invoice_id: "x".to_string(),
            rows_affected: 0,
        });
        assert_eq!(reached, 0);
    }
}
